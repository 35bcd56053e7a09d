//! User/credential route handlers.

use axum::{extract::Extension, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::common::ApiResult;
use crate::domains::users::actions;
use crate::kernel::ServerDeps;
use crate::server::middleware::AuthUser;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub img_url: Option<String>,
}

pub async fn signup_handler(
    Extension(deps): Extension<Arc<ServerDeps>>,
    Json(req): Json<SignupRequest>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    actions::signup(req.name, req.email, req.password, req.img_url, &deps).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "message": "User created successfully" })),
    ))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn login_handler(
    Extension(deps): Extension<Arc<ServerDeps>>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<Value>> {
    let token = actions::login(req.email, req.password, &deps).await?;
    Ok(Json(json!({ "token": token })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleLoginRequest {
    pub id_token: String,
}

pub async fn google_login_handler(
    Extension(deps): Extension<Arc<ServerDeps>>,
    Json(req): Json<GoogleLoginRequest>,
) -> ApiResult<Json<Value>> {
    let token = actions::google_login(req.id_token, &deps).await?;
    Ok(Json(json!({ "token": token })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyEmailRequest {
    pub auth_code: String,
}

pub async fn verify_email_handler(
    Extension(deps): Extension<Arc<ServerDeps>>,
    Json(req): Json<VerifyEmailRequest>,
) -> ApiResult<Json<Value>> {
    actions::verify_email(req.auth_code, &deps).await?;
    Ok(Json(json!({ "message": "Email verified successfully" })))
}

#[derive(Debug, Deserialize)]
pub struct RequestPasswordResetRequest {
    pub email: String,
}

pub async fn request_password_reset_handler(
    Extension(deps): Extension<Arc<ServerDeps>>,
    Json(req): Json<RequestPasswordResetRequest>,
) -> ApiResult<Json<Value>> {
    actions::request_password_reset(req.email, &deps).await?;
    Ok(Json(
        json!({ "success": true, "message": "Password reset request successful" }),
    ))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub auth_code: String,
    pub password: String,
}

pub async fn reset_password_handler(
    Extension(deps): Extension<Arc<ServerDeps>>,
    Json(req): Json<ResetPasswordRequest>,
) -> ApiResult<Json<Value>> {
    actions::reset_password(req.auth_code, req.password, &deps).await?;
    Ok(Json(json!({ "message": "Password Reset Successfully" })))
}

pub async fn get_user_profile_handler(
    auth: AuthUser,
    Extension(deps): Extension<Arc<ServerDeps>>,
) -> ApiResult<Json<actions::ProfileView>> {
    let profile = actions::get_profile(auth.user_id, &deps).await?;
    Ok(Json(profile))
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub pfp: Option<String>,
    pub phone: Option<String>,
}

pub async fn update_user_profile_handler(
    auth: AuthUser,
    Extension(deps): Extension<Arc<ServerDeps>>,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<Value>> {
    actions::update_profile(auth.user_id, req.name, req.pfp, req.phone, &deps).await?;
    Ok(Json(json!({ "message": "Profile updated successfully" })))
}

pub async fn request_otp_handler(
    auth: AuthUser,
    Extension(deps): Extension<Arc<ServerDeps>>,
) -> ApiResult<Json<Value>> {
    actions::request_otp(auth.user_id, &deps).await?;
    Ok(Json(json!({ "message": "Verification code sent" })))
}

#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    pub code: String,
}

pub async fn verify_otp_handler(
    auth: AuthUser,
    Extension(deps): Extension<Arc<ServerDeps>>,
    Json(req): Json<VerifyOtpRequest>,
) -> ApiResult<Json<Value>> {
    actions::verify_otp(auth.user_id, req.code, &deps).await?;
    Ok(Json(json!({ "message": "Phone verified successfully" })))
}

pub async fn get_userid_handler(auth: AuthUser) -> ApiResult<Json<Value>> {
    Ok(Json(json!({ "userId": auth.user_id })))
}
