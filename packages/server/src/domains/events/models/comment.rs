//! Comments and replies, owned by the event that contains them.
//!
//! They live in the event row's JSONB column and are only addressable
//! through their parent event. Ids are generated at insertion so individual
//! items can be edited or deleted later.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::common::{CommentId, ReplyId, UserId};
use crate::domains::users::models::UserSummary;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub author_id: UserId,
    pub text: String,
    pub replies: Vec<Reply>,
}

impl Comment {
    pub fn new(author_id: UserId, text: String) -> Self {
        Self {
            id: CommentId::new(),
            author_id,
            text,
            replies: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reply {
    pub id: ReplyId,
    pub author_id: UserId,
    pub text: String,
}

impl Reply {
    pub fn new(author_id: UserId, text: String) -> Self {
        Self {
            id: ReplyId::new(),
            author_id,
            text,
        }
    }
}

// ============================================================================
// Populated views (authors resolved to {name, pfp})
// ============================================================================

#[derive(Debug, Serialize)]
pub struct CommentView {
    pub id: CommentId,
    pub author: Option<UserSummary>,
    pub text: String,
    pub replies: Vec<ReplyView>,
}

#[derive(Debug, Serialize)]
pub struct ReplyView {
    pub id: ReplyId,
    pub author: Option<UserSummary>,
    pub text: String,
}

/// Resolve every author reference in the tree against the given summaries.
/// Authors missing from the map come through as `None`.
pub fn populate(
    comments: &[Comment],
    authors: &HashMap<UserId, UserSummary>,
) -> Vec<CommentView> {
    comments
        .iter()
        .map(|comment| CommentView {
            id: comment.id,
            author: authors.get(&comment.author_id).cloned(),
            text: comment.text.clone(),
            replies: comment
                .replies
                .iter()
                .map(|reply| ReplyView {
                    id: reply.id,
                    author: authors.get(&reply.author_id).cloned(),
                    text: reply.text.clone(),
                })
                .collect(),
        })
        .collect()
}

/// Every distinct author id appearing in the tree (comments and replies).
pub fn author_ids(comments: &[Comment]) -> Vec<UserId> {
    let mut ids: Vec<UserId> = Vec::new();
    for comment in comments {
        if !ids.contains(&comment.author_id) {
            ids.push(comment.author_id);
        }
        for reply in &comment.replies {
            if !ids.contains(&reply.author_id) {
                ids.push(reply.author_id);
            }
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_ids_deduplicates_across_comments_and_replies() {
        let alice = UserId::new();
        let bob = UserId::new();

        let mut comment = Comment::new(alice, "first".to_string());
        comment.replies.push(Reply::new(bob, "re".to_string()));
        comment.replies.push(Reply::new(alice, "re again".to_string()));
        let other = Comment::new(bob, "second".to_string());

        let ids = author_ids(&[comment, other]);
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&alice));
        assert!(ids.contains(&bob));
    }

    #[test]
    fn test_populate_resolves_known_authors() {
        let alice = UserId::new();
        let comment = Comment::new(alice, "hello".to_string());

        let mut authors = HashMap::new();
        authors.insert(
            alice,
            UserSummary {
                name: "Alice".to_string(),
                pfp: "https://example.com/alice.png".to_string(),
            },
        );

        let views = populate(&[comment], &authors);
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].author.as_ref().unwrap().name, "Alice");
    }

    #[test]
    fn test_populate_tolerates_unknown_authors() {
        let comment = Comment::new(UserId::new(), "orphan".to_string());
        let views = populate(&[comment], &HashMap::new());
        assert!(views[0].author.is_none());
    }

    #[test]
    fn test_comment_serde_roundtrip() {
        let mut comment = Comment::new(UserId::new(), "hello".to_string());
        comment
            .replies
            .push(Reply::new(UserId::new(), "hi back".to_string()));

        let json = serde_json::to_string(&comment).unwrap();
        let parsed: Comment = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, comment.id);
        assert_eq!(parsed.replies.len(), 1);
        assert_eq!(parsed.replies[0].text, "hi back");
    }
}
