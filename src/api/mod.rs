//! Typed endpoint bindings.
//!
//! Each group borrows the client's
//! [`RequestGateway`](crate::transport::RequestGateway) and maps one method to
//! one catalog row. Apart from session bookkeeping in [`AuthApi`], no binding
//! adds logic of its own.

mod auth;
mod chat;
mod discovery;
mod reels;
mod subscriptions;
mod users;

pub use auth::AuthApi;
pub use chat::ChatApi;
pub use discovery::DiscoveryApi;
pub use reels::ReelsApi;
pub use subscriptions::SubscriptionsApi;
pub use users::UsersApi;
