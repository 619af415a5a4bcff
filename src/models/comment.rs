//! Comment thread models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::post::{Author, Media, MediaUpload};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommentStats {
    #[serde(default)]
    pub upvotes: i64,
    #[serde(default)]
    pub downvotes: i64,
}

impl CommentStats {
    pub fn score(&self) -> i64 {
        self.upvotes - self.downvotes
    }
}

/// A comment with its (possibly partial) reply tree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(deserialize_with = "super::id_from_any")]
    pub id: String,
    #[serde(default)]
    pub post_id: Option<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
    pub user: Author,
    pub content: String,
    #[serde(default)]
    pub media: Option<Media>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub stats: CommentStats,
    #[serde(default)]
    pub replies: Vec<Comment>,
    #[serde(default)]
    pub has_more_replies: bool,
    /// 本地乐观插入、尚未被服务端确认
    #[serde(skip)]
    pub pending: bool,
}

impl Comment {
    /// 在回复树中递归查找
    pub fn find_mut<'a>(comments: &'a mut [Comment], id: &str) -> Option<&'a mut Comment> {
        for comment in comments.iter_mut() {
            if comment.id == id {
                return Some(comment);
            }
            if let Some(found) = Comment::find_mut(&mut comment.replies, id) {
                return Some(found);
            }
        }
        None
    }

    /// 从回复树中递归移除，返回被移除的评论
    pub fn remove(comments: &mut Vec<Comment>, id: &str) -> Option<Comment> {
        if let Some(index) = comments.iter().position(|c| c.id == id) {
            return Some(comments.remove(index));
        }
        comments
            .iter_mut()
            .find_map(|comment| Comment::remove(&mut comment.replies, id))
    }

    /// 该评论及其已加载回复的总数
    pub fn thread_len(&self) -> usize {
        1 + self.replies.iter().map(Comment::thread_len).sum::<usize>()
    }
}

/// First-level comments of a post, one page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommentPage {
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub total: u64,
}

/// Replies of a comment, one page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReplyPage {
    pub replies: Vec<Comment>,
    #[serde(default)]
    pub has_more: bool,
}

/// Comment draft
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewComment {
    #[validate(length(min = 1, max = 5000, message = "Comment cannot be empty"))]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub media: Option<MediaUpload>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(id: &str, replies: Vec<Comment>) -> Comment {
        Comment {
            id: id.to_string(),
            post_id: Some("1".to_string()),
            parent_id: None,
            user: Author {
                name: "Rahim".to_string(),
                image: None,
                is_verified: false,
            },
            content: format!("comment {}", id),
            media: None,
            created_at: None,
            stats: CommentStats::default(),
            replies,
            has_more_replies: false,
            pending: false,
        }
    }

    #[test]
    fn test_find_mut_nested() {
        let mut thread = vec![comment("a", vec![comment("b", vec![comment("c", vec![])])])];
        let found = Comment::find_mut(&mut thread, "c").unwrap();
        found.content = "edited".to_string();
        assert_eq!(thread[0].replies[0].replies[0].content, "edited");
        assert!(Comment::find_mut(&mut thread, "missing").is_none());
    }

    #[test]
    fn test_remove_nested() {
        let mut thread = vec![
            comment("a", vec![comment("b", vec![])]),
            comment("d", vec![]),
        ];
        let removed = Comment::remove(&mut thread, "b").unwrap();
        assert_eq!(removed.id, "b");
        assert!(thread[0].replies.is_empty());
        assert_eq!(thread.len(), 2);
    }

    #[test]
    fn test_thread_len() {
        let c = comment("a", vec![comment("b", vec![comment("c", vec![])]), comment("d", vec![])]);
        assert_eq!(c.thread_len(), 4);
    }

    #[test]
    fn test_empty_comment_rejected() {
        let draft = NewComment {
            content: String::new(),
            parent_id: None,
            media: None,
        };
        assert!(draft.validate().is_err());
    }
}
