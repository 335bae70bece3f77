//! Per-project discussion thread.
//!
//! # Responsibility
//! - Hold posts, comments and likes for one project during a session.
//!
//! # Invariants
//! - State is session-only; nothing here touches durable storage.
//! - Posts are newest first; comments are oldest first.
//! - Blank post or comment content is rejected.

use crate::model::discussion::{BlogComment, BlogPost};
use crate::model::project::ProjectId;
use crate::seed::catalog::starter_posts;
use chrono::{DateTime, Utc};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Who is writing. Display data only; likes are keyed by the session user id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub avatar: Option<String>,
}

impl Author {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            avatar: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscussionError {
    /// Content is empty after trimming.
    EmptyContent,
    PostNotFound(String),
    CommentNotFound { post_id: String, comment_id: String },
}

impl Display for DiscussionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "discussion content must not be blank"),
            Self::PostNotFound(id) => write!(f, "post not found: {id}"),
            Self::CommentNotFound {
                post_id,
                comment_id,
            } => write!(f, "comment {comment_id} not found on post {post_id}"),
        }
    }
}

impl Error for DiscussionError {}

/// Discussion thread of one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscussionThread {
    project_id: ProjectId,
    posts: Vec<BlogPost>,
}

impl DiscussionThread {
    pub fn new(project_id: impl Into<ProjectId>) -> Self {
        Self {
            project_id: project_id.into(),
            posts: Vec::new(),
        }
    }

    /// Thread pre-filled with the starter posts.
    pub fn seeded(project_id: impl Into<ProjectId>, now: DateTime<Utc>) -> Self {
        let project_id = project_id.into();
        let mut posts = starter_posts(&project_id, now);
        posts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Self { project_id, posts }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn posts(&self) -> &[BlogPost] {
        &self.posts
    }

    pub fn post(&self, post_id: &str) -> Option<&BlogPost> {
        self.posts.iter().find(|post| post.id == post_id)
    }

    /// Publishes a post at the top of the thread.
    pub fn add_post(
        &mut self,
        author: &Author,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<&BlogPost, DiscussionError> {
        if content.trim().is_empty() {
            return Err(DiscussionError::EmptyContent);
        }
        let post = BlogPost {
            id: format!("post-{}", Uuid::new_v4()),
            project_id: self.project_id.clone(),
            author: author.name.clone(),
            author_avatar: author.avatar.clone(),
            content: content.to_string(),
            timestamp: now,
            likes: Vec::new(),
            comments: Vec::new(),
        };
        debug!(
            "event=discussion_post module=discussion status=ok project_id={} post_id={}",
            self.project_id, post.id
        );
        self.posts.insert(0, post);
        Ok(&self.posts[0])
    }

    /// Returns whether `user` likes the post after the toggle.
    pub fn toggle_post_like(&mut self, post_id: &str, user: &str) -> Result<bool, DiscussionError> {
        Ok(self.post_mut(post_id)?.toggle_like(user))
    }

    /// Appends a comment to a post.
    pub fn add_comment(
        &mut self,
        post_id: &str,
        author: &Author,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<&BlogComment, DiscussionError> {
        if content.trim().is_empty() {
            return Err(DiscussionError::EmptyContent);
        }
        let post = self.post_mut(post_id)?;
        post.comments.push(BlogComment {
            id: format!("comment-{}", Uuid::new_v4()),
            post_id: post_id.to_string(),
            author: author.name.clone(),
            author_avatar: author.avatar.clone(),
            content: content.to_string(),
            timestamp: now,
            likes: Vec::new(),
        });
        let comment = &post.comments[post.comments.len() - 1];
        debug!(
            "event=discussion_comment module=discussion status=ok post_id={} comment_id={}",
            post_id, comment.id
        );
        Ok(comment)
    }

    /// Returns whether `user` likes the comment after the toggle.
    pub fn toggle_comment_like(
        &mut self,
        post_id: &str,
        comment_id: &str,
        user: &str,
    ) -> Result<bool, DiscussionError> {
        let post = self.post_mut(post_id)?;
        let comment = post
            .comments
            .iter_mut()
            .find(|comment| comment.id == comment_id)
            .ok_or_else(|| DiscussionError::CommentNotFound {
                post_id: post_id.to_string(),
                comment_id: comment_id.to_string(),
            })?;
        Ok(comment.toggle_like(user))
    }

    fn post_mut(&mut self, post_id: &str) -> Result<&mut BlogPost, DiscussionError> {
        self.posts
            .iter_mut()
            .find(|post| post.id == post_id)
            .ok_or_else(|| DiscussionError::PostNotFound(post_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 9, 30, 0).unwrap()
    }

    #[test]
    fn seeded_thread_is_newest_first() {
        let thread = DiscussionThread::seeded("3", now());
        let ids: Vec<_> = thread.posts().iter().map(|post| post.id.as_str()).collect();
        assert_eq!(ids, ["2", "1"]);
        assert!(thread.posts().iter().all(|post| post.project_id == "3"));
    }

    #[test]
    fn new_post_goes_on_top_and_blank_is_rejected() {
        let mut thread = DiscussionThread::seeded("1", now());
        let author = Author::new("Johanna Karlsson");
        assert_eq!(
            thread.add_post(&author, "   ", now()),
            Err(DiscussionError::EmptyContent)
        );
        let id = thread
            .add_post(&author, "Ritningar uppdaterade", now())
            .unwrap()
            .id
            .clone();
        assert_eq!(thread.posts()[0].id, id);
        assert_eq!(thread.posts().len(), 3);
    }

    #[test]
    fn likes_toggle_per_user() {
        let mut thread = DiscussionThread::seeded("1", now());
        assert_eq!(thread.toggle_post_like("1", "user3"), Ok(false));
        assert_eq!(thread.toggle_post_like("1", "user3"), Ok(true));
        assert_eq!(thread.post("1").unwrap().likes, ["user4", "user3"]);
        assert_eq!(thread.toggle_comment_like("1", "c1", "user1"), Ok(false));
        assert_eq!(
            thread.toggle_comment_like("1", "nope", "user1"),
            Err(DiscussionError::CommentNotFound {
                post_id: "1".to_string(),
                comment_id: "nope".to_string(),
            })
        );
        assert_eq!(
            thread.toggle_post_like("404", "user1"),
            Err(DiscussionError::PostNotFound("404".to_string()))
        );
    }

    #[test]
    fn comments_append_in_order() {
        let mut thread = DiscussionThread::new("1");
        let author = Author::new("Johanna Karlsson");
        let post_id = thread.add_post(&author, "Fråga", now()).unwrap().id.clone();
        thread.add_comment(&post_id, &author, "Svar ett", now()).unwrap();
        thread.add_comment(&post_id, &author, "Svar två", now()).unwrap();
        let contents: Vec<_> = thread
            .post(&post_id)
            .unwrap()
            .comments
            .iter()
            .map(|comment| comment.content.as_str())
            .collect();
        assert_eq!(contents, ["Svar ett", "Svar två"]);
    }
}
