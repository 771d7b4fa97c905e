use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents a forum category (read-only reference data).
#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub icon: Option<String>,
    pub display_order: i32,
}

/// A topic row joined with its author and category display fields,
/// as returned by the topic listing.
#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
pub struct TopicSummary {
    pub id: i32,
    pub title: String,
    pub category_id: i32,
    pub author_id: i32,
    pub is_pinned: bool,
    pub is_locked: bool,
    pub views: i32,
    pub reply_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author_name: String,
    pub author_avatar: Option<String>,
    pub author_reputation: i32,
    pub category_name: String,
    pub category_icon: Option<String>,
}

/// A topic row joined with author and category fields, as returned by
/// the topic detail view. `views` reflects the count before this
/// request's increment.
#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
pub struct TopicDetail {
    pub id: i32,
    pub title: String,
    pub category_id: i32,
    pub author_id: i32,
    pub is_pinned: bool,
    pub is_locked: bool,
    pub views: i32,
    pub reply_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author_name: String,
    pub author_avatar: Option<String>,
    pub author_reputation: i32,
    pub category_name: String,
}

/// A post row joined with its author's display and moderation fields.
#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
pub struct PostWithAuthor {
    pub id: i32,
    pub topic_id: i32,
    pub author_id: i32,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub author_name: String,
    pub author_avatar: Option<String>,
    pub author_reputation: i32,
    pub is_admin: bool,
    pub is_moderator: bool,
}

/// Attachment metadata associated with a post (read-only here; upload
/// handling lives elsewhere).
#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
pub struct Attachment {
    pub id: i32,
    pub post_id: i32,
    pub file_name: String,
    pub file_url: String,
    pub file_size: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// A post with its attachments, as serialized in the topic detail
/// response.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PostDetail {
    #[serde(flatten)]
    pub post: PostWithAuthor,
    pub attachments: Vec<Attachment>,
}

/// A user projection for the reputation leaderboard.
#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
pub struct TopUser {
    pub id: i32,
    pub username: String,
    pub avatar_url: Option<String>,
    pub reputation: i32,
    pub post_count: i32,
}

fn default_author_id() -> i32 {
    1
}

/// Body payload for the `create_topic` action.
#[derive(Deserialize, Debug, Clone)]
pub struct CreateTopicPayload {
    pub title: String,
    pub category_id: i32,
    #[serde(default = "default_author_id")]
    pub author_id: i32,
    pub content: String,
}

/// Body payload for the `create_post` action.
#[derive(Deserialize, Debug, Clone)]
pub struct CreatePostPayload {
    pub topic_id: i32,
    #[serde(default = "default_author_id")]
    pub author_id: i32,
    pub content: String,
}

/// Body payload for the `toggle_pin` and `toggle_lock` actions.
#[derive(Deserialize, Debug, Clone)]
pub struct ToggleTopicPayload {
    pub topic_id: i32,
}

#[derive(Serialize, Debug)]
pub struct TopicListResponse {
    pub topics: Vec<TopicSummary>,
}

#[derive(Serialize, Debug)]
pub struct CategoryListResponse {
    pub categories: Vec<Category>,
}

#[derive(Serialize, Debug)]
pub struct TopUsersResponse {
    pub users: Vec<TopUser>,
}

#[derive(Serialize, Debug)]
pub struct TopicDetailResponse {
    pub topic: TopicDetail,
    pub posts: Vec<PostDetail>,
}

#[derive(Serialize, Debug)]
pub struct CreateTopicResponse {
    pub topic_id: i32,
    pub message: &'static str,
}

#[derive(Serialize, Debug)]
pub struct CreatePostResponse {
    pub post_id: i32,
    pub message: &'static str,
}

#[derive(Serialize, Debug)]
pub struct MessageResponse {
    pub message: &'static str,
}
