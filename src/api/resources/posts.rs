//
//  klog-sdk
//  api/resources/posts.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Blog posts.
//!
//! Posts are the central resource of the API. A post may carry its category,
//! author, tags, and comments as nested expansions; those are filled in by the
//! server (see [`PostQueryParams::detail`]) and never built client-side.
//!
//! # Post States
//!
//! * `draft` - Not yet visible to readers
//! * `published` - Publicly visible
//! * `archived` - Hidden but kept
//!
//! # Endpoints
//!
//! | Operation | Method | Path |
//! |-----------|--------|------|
//! | [`PostService::list`] | GET | `/api/v1/posts` |
//! | [`PostService::get`] | GET | `/api/v1/posts/{id}` |
//! | [`PostService::create`] | POST | `/api/v1/posts` |
//! | [`PostService::update`] | PUT | `/api/v1/posts/{id}` |
//! | [`PostService::delete`] | DELETE | `/api/v1/posts/{id}` |
//!
//! # Example
//!
//! ```rust,ignore
//! use klog_sdk::{PostQueryParams, PostStatus, SortOrder};
//!
//! let params = PostQueryParams {
//!     status: Some(PostStatus::Published),
//!     tag: Some("rust".to_string()),
//!     sort_by: Some("published_at".to_string()),
//!     order: Some(SortOrder::Desc),
//!     ..Default::default()
//! };
//! let page = sdk.posts.list(&params).await?;
//! for post in &page.data {
//!     println!("{} ({})", post.title, post.slug);
//! }
//! ```

use std::fmt;

use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize, Serializer};

use super::categories::Category;
use super::comments::Comment;
use super::tags::Tag;
use super::users::User;
use crate::api::client::{KlogClient, RequestOptions};
use crate::api::common::{KlogError, PaginatedResponse};

/// Publication state of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    /// Not yet visible to readers.
    Draft,
    /// Publicly visible.
    Published,
    /// Hidden from listings but kept.
    Archived,
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        })
    }
}

/// Sort direction for list queries, sent as `asc` / `desc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Oldest or smallest first.
    Asc,
    /// Newest or largest first.
    Desc,
}

/// A blog post.
///
/// # Fields
///
/// * `id` - Unique numeric identifier
/// * `category_id` - Category the post is filed under, if any
/// * `author_id` - ID of the user who wrote the post
/// * `title`, `slug`, `content`, `excerpt` - The text of the post
/// * `status` - Publication state
/// * `view_count` - Number of reads counted by the server
/// * `published_at`, `created_at`, `updated_at` - ISO 8601 timestamps
/// * `category`, `author`, `tags`, `comments` - Expansions, present only when
///   the server includes them
///
/// # Example
///
/// ```rust,ignore
/// use klog_sdk::{Post, PostStatus};
///
/// fn summary(post: &Post) -> String {
///     let state = match post.status {
///         PostStatus::Published => "live",
///         PostStatus::Draft => "draft",
///         PostStatus::Archived => "archived",
///     };
///     format!("#{} {} [{}] {} views", post.id, post.title, state, post.view_count)
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Unique numeric identifier.
    pub id: u64,

    /// Category the post is filed under, if any.
    #[serde(default)]
    pub category_id: Option<u64>,

    /// ID of the user who wrote the post.
    pub author_id: u64,

    /// Headline.
    pub title: String,

    /// URL-safe identifier.
    pub slug: String,

    /// Body (typically Markdown). May be omitted from list responses.
    #[serde(default)]
    pub content: String,

    /// Short summary shown in listings. Empty when not set.
    #[serde(default)]
    pub excerpt: String,

    /// Header image URL. Empty when not set.
    #[serde(default)]
    pub cover_image_url: String,

    /// Publication state.
    pub status: PostStatus,

    /// Number of reads counted by the server.
    #[serde(default)]
    pub view_count: u64,

    /// ISO 8601 timestamp of first publication.
    #[serde(default)]
    pub published_at: Option<String>,

    /// ISO 8601 timestamp of creation.
    pub created_at: String,

    /// ISO 8601 timestamp of the last edit.
    pub updated_at: String,

    /// Expanded category.
    #[serde(default)]
    pub category: Option<Category>,

    /// Expanded author.
    #[serde(default)]
    pub author: Option<User>,

    /// Expanded tags.
    #[serde(default)]
    pub tags: Option<Vec<Tag>>,

    /// Expanded comments.
    #[serde(default)]
    pub comments: Option<Vec<Comment>>,
}

/// Fields for a new post. `tags` are tag names; unknown ones are created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostCreateRequest {
    /// Category to file the post under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<u64>,

    /// Headline.
    pub title: String,

    /// URL-safe identifier; must be unique.
    pub slug: String,

    /// Body, typically Markdown.
    pub content: String,

    /// Short summary for listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,

    /// Header image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,

    /// Initial publication state.
    pub status: PostStatus,

    /// Tag names to attach.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Partial post update. Only the fields that are set are sent.
///
/// `category_id` distinguishes "leave as is" (`None`) from "remove the
/// category" (`Some(None)`, sent as `null`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostUpdateRequest {
    /// `Some(None)` detaches the post from its category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Option<u64>>,

    /// New headline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// New slug.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    /// New body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// New excerpt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,

    /// New header image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,

    /// New publication state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PostStatus>,

    /// Replaces the full tag list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Query parameters for [`PostService::list`]. Unset fields are not sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostQueryParams {
    /// 1-based page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    /// Only posts in this state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PostStatus>,

    /// Category slug.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Tag slug.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Field to sort by (e.g. `created_at`).
    #[serde(rename = "sortBy", skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,

    /// Sort direction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,

    /// Ask the server to expand nested relations. Sent as `0` / `1`.
    #[serde(serialize_with = "serialize_flag", skip_serializing_if = "Option::is_none")]
    pub detail: Option<bool>,
}

fn serialize_flag<S: Serializer>(value: &Option<bool>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(flag) => serializer.serialize_u8(u8::from(*flag)),
        None => serializer.serialize_none(),
    }
}

/// Post operations.
#[derive(Debug, Clone)]
pub struct PostService {
    client: KlogClient,
}

impl PostService {
    /// Creates the service around a shared client.
    pub fn new(client: KlogClient) -> Self {
        Self { client }
    }

    /// Lists posts, one page at a time.
    ///
    /// Unset query fields are left off the URL, so the server's defaults
    /// apply.
    pub async fn list(&self, params: &PostQueryParams) -> Result<PaginatedResponse<Post>, KlogError> {
        let options = RequestOptions::new().query(params)?;
        self.client.get_with("/api/v1/posts", &options).await
    }

    /// Fetches a single post with its expansions.
    ///
    /// # Errors
    ///
    /// An unknown ID yields an error for which
    /// [`KlogError::is_not_found_error`] is true.
    pub async fn get(&self, id: u64) -> Result<Post, KlogError> {
        self.client.get(&format!("/api/v1/posts/{id}")).await
    }

    /// Creates a post and returns it with its assigned ID.
    pub async fn create(&self, data: &PostCreateRequest) -> Result<Post, KlogError> {
        self.client.post("/api/v1/posts", data).await
    }

    /// Applies a partial update and returns the new state.
    pub async fn update(&self, id: u64, data: &PostUpdateRequest) -> Result<Post, KlogError> {
        self.client.put(&format!("/api/v1/posts/{id}"), data).await
    }

    /// Deletes the post with the given ID.
    pub async fn delete(&self, id: u64) -> Result<(), KlogError> {
        self.client
            .delete::<IgnoredAny>(&format!("/api/v1/posts/{id}"))
            .await
            .map(|_| ())
    }
}
