//
//  klog-sdk
//  api/resources/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Resource Modules
//!
//! One module per API domain. Each holds the domain's request/response models
//! and a stateless service that maps every method to exactly one
//! [`KlogClient`](crate::api::client::KlogClient) verb call.
//!
//! | Module | Service |
//! |--------|---------|
//! | [`auth`] | [`AuthService`] |
//! | [`posts`] | [`PostService`] |
//! | [`categories`] | [`CategoryService`] |
//! | [`tags`] | [`TagService`] |
//! | [`comments`] | [`CommentService`] |
//! | [`media`] | [`MediaService`] |
//! | [`users`] | [`UserService`] |
//! | [`settings`] | [`SettingService`] |

pub mod auth;
pub mod categories;
pub mod comments;
pub mod media;
pub mod posts;
pub mod settings;
pub mod tags;
pub mod users;

pub use auth::*;
pub use categories::*;
pub use comments::*;
pub use media::*;
pub use posts::*;
pub use settings::*;
pub use tags::*;
pub use users::*;
