//! Application setup and server configuration.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{get, post},
    Extension, Router,
};
use sqlx::PgPool;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use twilio::{TwilioOptions, TwilioService};

use crate::config::Config;
use crate::domains::auth::{CodeCipher, JwtService};
use crate::kernel::{GoogleVerifier, ServerDeps, SmtpMailer, TwilioSmsSender};
use crate::server::middleware::jwt_auth_middleware;
use crate::server::routes::{
    add_comment_handler, add_event_handler, add_reply_handler, approve_attendee_handler,
    create_log_handler, delete_comment_handler, delete_event_handler, delete_reply_handler,
    edit_comment_handler, edit_reply_handler, get_address_and_attendees_handler,
    get_comments_handler, get_event_by_title_handler, get_events_by_page_handler,
    get_events_handler, get_user_profile_handler, get_user_status_handler, get_userid_handler,
    google_login_handler, health_handler, login_handler, register_for_event_handler,
    remove_attendee_handler, request_otp_handler, request_password_reset_handler,
    reset_password_handler, search_events_handler, signup_handler,
    unregister_from_event_handler, update_event_handler, update_user_profile_handler,
    verify_email_handler, verify_otp_handler,
};

/// Build the Axum application router with all dependencies wired up.
pub fn build_app(pool: PgPool, config: &Config) -> Result<Router> {
    // External service clients
    let twilio = Arc::new(TwilioService::new(TwilioOptions {
        account_sid: config.twilio_account_sid.clone(),
        auth_token: config.twilio_auth_token.clone(),
        from_number: config.twilio_from_number.clone(),
    }));

    let mailer = SmtpMailer::new(
        &config.smtp_host,
        config.smtp_port,
        config.smtp_user.clone(),
        config.smtp_pass.clone(),
        &config.email_name,
        &config.smtp_user,
    )
    .context("Failed to build SMTP mailer")?;

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt_secret,
        config.jwt_issuer.clone(),
    ));

    let code_cipher = CodeCipher::from_hex(&config.encryption_key, &config.encryption_iv)
        .context("Failed to build code cipher")?;

    let deps = Arc::new(ServerDeps::new(
        pool,
        Arc::new(mailer),
        Arc::new(TwilioSmsSender::new(twilio)),
        Arc::new(GoogleVerifier::new(config.google_client_id.clone())),
        jwt_service.clone(),
        Arc::new(code_cipher),
        config.email_hash_secret.clone(),
        config.bcrypt_cost,
        config.auth_code_ttl_secs,
        config.frontend_url.clone(),
        config.email_name.clone(),
    ));

    // CORS: the frontend is the only allowed origin
    let cors = CorsLayer::new()
        .allow_origin(
            config
                .frontend_url
                .parse::<HeaderValue>()
                .context("FRONTEND_URL is not a valid origin")?,
        )
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    // Rate limiting: 10 requests per second per IP with bursts up to 20
    let rate_limit_config = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(10)
            .burst_size(20)
            .use_headers() // Extract IP from X-Forwarded-For header
            .finish()
            .expect("Rate limiter configuration is valid and should never fail"),
    );
    let rate_limit_layer = GovernorLayer {
        config: rate_limit_config,
    };

    // Clone jwt_service for middleware closure
    let jwt_service_for_middleware = jwt_service.clone();

    let app = Router::new()
        // User/credential workflow
        .route("/signup", post(signup_handler))
        .route("/login", post(login_handler))
        .route("/google-login", post(google_login_handler))
        .route("/verify-email-code", post(verify_email_handler))
        .route("/reset-password", post(reset_password_handler))
        .route("/request-password-reset", post(request_password_reset_handler))
        .route("/get-user-profile", post(get_user_profile_handler))
        .route("/update-user-profile", post(update_user_profile_handler))
        .route("/request-otp", post(request_otp_handler))
        .route("/verify-otp", post(verify_otp_handler))
        .route("/get-userid", post(get_userid_handler))
        // Event aggregate
        .route("/add-event", post(add_event_handler))
        .route("/get-events", post(get_events_handler))
        .route("/get-events-by-page", post(get_events_by_page_handler))
        .route("/delete-event", post(delete_event_handler))
        .route("/get-event-by-title", post(get_event_by_title_handler))
        .route("/update-event", post(update_event_handler))
        .route("/register-for-event", post(register_for_event_handler))
        .route("/unregister-from-event", post(unregister_from_event_handler))
        .route("/get-user-status", post(get_user_status_handler))
        .route(
            "/get-address-and-attendees",
            post(get_address_and_attendees_handler),
        )
        .route("/approve-attendee", post(approve_attendee_handler))
        .route("/remove-attendee", post(remove_attendee_handler))
        // Comments
        .route("/add-comment", post(add_comment_handler))
        .route("/add-reply", post(add_reply_handler))
        .route("/get-comments", post(get_comments_handler))
        .route("/delete-comment", post(delete_comment_handler))
        .route("/delete-reply", post(delete_reply_handler))
        .route("/edit-comment", post(edit_comment_handler))
        .route("/edit-reply", post(edit_reply_handler))
        // Search
        .route("/search-events", post(search_events_handler))
        // Audit log sink
        .route("/log", post(create_log_handler))
        // Health check
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service_for_middleware.clone(), req, next)
        }))
        .layer(rate_limit_layer)
        .layer(Extension(deps))
        .layer(cors)
        .layer(TimeoutLayer::new(std::time::Duration::from_secs(30)))
        .layer(TraceLayer::new_for_http());

    Ok(app)
}
