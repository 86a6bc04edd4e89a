use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    /// The only status this service writes. Every create and update resets a post to it.
    #[default]
    Active,
    /// Set by moderation tooling outside this service.
    Hidden,
    /// Set by moderation tooling outside this service.
    Removed,
}

/// A post as persistence stores it. None of the collections are ever absent here.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Post {
    pub id: String,
    pub creator_id: String,
    pub content: String,
    pub category_id: Option<String>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    pub comment: Vec<String>,
    pub like: Vec<String>,
    pub hash_tag: Vec<String>,
    pub mention: Vec<String>,
    pub share: Vec<String>,
    pub status: PostStatus,
}

/// What a caller supplies to create a post.
///
/// Anything identifying the post or its creator is assigned by the service, so it has
/// no place here. Unknown fields in the request body are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct PostDraft {
    pub content: String,
    pub category_id: Option<String>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    pub hash_tag: Option<Vec<String>>,
    pub mention: Option<Vec<String>>,
}

/// A full or partial replacement of an existing post.
///
/// `id` and `creator_id` must match the stored post. Every other field left out keeps
/// its stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct PostPatch {
    pub id: String,
    pub creator_id: String,
    pub content: Option<String>,
    pub category_id: Option<String>,
    pub image_urls: Option<Vec<String>>,
    pub comment: Option<Vec<String>>,
    pub like: Option<Vec<String>>,
    pub hash_tag: Option<Vec<String>>,
    pub mention: Option<Vec<String>>,
    pub share: Option<Vec<String>>,
}

impl PostPatch {
    pub fn new(id: impl Into<String>, creator_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            creator_id: creator_id.into(),
            ..Default::default()
        }
    }

    pub fn with_hash_tag(mut self, hash_tag: Vec<String>) -> Self {
        self.hash_tag = Some(hash_tag);
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}

/// Comments to append to a post, in order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct CommentAddition {
    #[serde(default)]
    pub comment: Vec<String>,
}

/// Which of a user's posts `get_by_uid` returns. The exact query is up to persistence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PostQueryStyle {
    /// Posts the user created.
    #[default]
    Authored,
    /// Posts the user liked, shared, or was mentioned in.
    Interacted,
}
