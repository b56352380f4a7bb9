use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Stored blog post. `user_id` is the owner and never changes after insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i32,
    pub user_id: i32,
    pub category_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub content: String,
    pub is_post: bool,
    pub is_published: bool,
    pub published_date: Option<DateTime<Utc>>,
}

/// Client-writable fields of a post. Owner and id are deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    pub category_id: i32,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub content: String,
    #[serde(default)]
    pub is_post: bool,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub published_date: Option<DateTime<Utc>>,
}

impl Post {
    pub fn from_draft(id: i32, user_id: i32, draft: PostDraft) -> Self {
        Self {
            id,
            user_id,
            category_id: draft.category_id,
            title: draft.title,
            description: draft.description,
            content: draft.content,
            is_post: draft.is_post,
            is_published: draft.is_published,
            published_date: draft.published_date,
        }
    }

    /// Overwrites every content field; `id` and `user_id` are kept.
    pub fn overwrite(&mut self, draft: PostDraft) {
        self.category_id = draft.category_id;
        self.title = draft.title;
        self.description = draft.description;
        self.content = draft.content;
        self.is_post = draft.is_post;
        self.is_published = draft.is_published;
        self.published_date = draft.published_date;
    }

    pub fn is_owned_by(&self, user_id: i32) -> bool {
        self.user_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn draft(title: &str) -> PostDraft {
        PostDraft {
            category_id: 2,
            title: title.to_string(),
            description: Some("desc".to_string()),
            content: "body".to_string(),
            is_post: true,
            is_published: false,
            published_date: None,
        }
    }

    #[test]
    fn overwrite_keeps_identity_and_owner() {
        let mut post = Post::from_draft(5, 7, draft("first"));
        post.overwrite(PostDraft {
            category_id: 3,
            ..draft("second")
        });

        assert_eq!(post.id, 5);
        assert_eq!(post.user_id, 7);
        assert_eq!(post.category_id, 3);
        assert_eq!(post.title, "second");
        assert!(post.is_owned_by(7));
        assert!(!post.is_owned_by(9));
    }

    #[test]
    fn draft_defaults_optional_fields() {
        let draft: PostDraft = serde_json::from_value(json!({
            "categoryId": 1,
            "title": "A",
            "content": "hello",
            "userId": 99
        }))
        .unwrap();

        assert_eq!(draft.category_id, 1);
        assert_eq!(draft.description, None);
        assert!(!draft.is_post);
        assert!(!draft.is_published);
        assert_eq!(draft.published_date, None);
    }

    #[test]
    fn post_serializes_camel_case() {
        let post = Post::from_draft(1, 7, draft("A"));
        let value = serde_json::to_value(&post).unwrap();

        assert_eq!(value["userId"], 7);
        assert_eq!(value["categoryId"], 2);
        assert_eq!(value["isPost"], true);
        assert_eq!(value["isPublished"], false);
        assert!(value["publishedDate"].is_null());
    }
}
