//! Request and response types for the Datify API.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`auth`] | Credentials, registration and token responses |
//! | [`profile`] | Profile and matching-preference updates |
//! | [`media`] | File uploads, chat attachments and new reels |
//! | [`social`] | Likes, messages, comments, reports and counters |

pub mod auth;
pub mod media;
pub mod profile;
pub mod social;

pub use auth::{AuthResponse, Credentials, Registration};
pub use media::{Attachment, NewReel, Upload, ALLOWED_EXTENSIONS};
pub use profile::{PreferencesUpdate, ProfileUpdate};
pub use social::{LikeRequest, MessageBody, NewComment, ReelQuery, ReelReport, UnreadCount};
