//! Project discussion records.
//!
//! # Responsibility
//! - Define posts and comments of the per-project discussion thread.
//! - Provide like-toggle semantics shared by posts and comments.
//!
//! # Invariants
//! - `likes` never holds the same user twice and keeps first-like order.
//! - Discussion records are session-only and never written to durable storage.

use crate::model::project::ProjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogComment {
    pub id: String,
    pub post_id: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_avatar: Option<String>,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub likes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: String,
    pub project_id: ProjectId,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_avatar: Option<String>,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub likes: Vec<String>,
    pub comments: Vec<BlogComment>,
}

impl BlogPost {
    /// Toggles `user` in the like set. Returns whether the user now likes the post.
    pub fn toggle_like(&mut self, user: &str) -> bool {
        toggle_like(&mut self.likes, user)
    }

    pub fn is_liked_by(&self, user: &str) -> bool {
        self.likes.iter().any(|liker| liker == user)
    }
}

impl BlogComment {
    /// Toggles `user` in the like set. Returns whether the user now likes the comment.
    pub fn toggle_like(&mut self, user: &str) -> bool {
        toggle_like(&mut self.likes, user)
    }
}

fn toggle_like(likes: &mut Vec<String>, user: &str) -> bool {
    if let Some(index) = likes.iter().position(|liker| liker == user) {
        likes.remove(index);
        false
    } else {
        likes.push(user.to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::toggle_like;

    #[test]
    fn toggle_like_adds_then_removes_preserving_order() {
        let mut likes = vec!["user3".to_string(), "user4".to_string()];
        assert!(toggle_like(&mut likes, "user1"));
        assert_eq!(likes, ["user3", "user4", "user1"]);
        assert!(!toggle_like(&mut likes, "user3"));
        assert_eq!(likes, ["user4", "user1"]);
    }
}
