//! # datify-client
//!
//! Typed async client for the Datify REST API.
//!
//! ## Overview
//!
//! Every call goes through one [`RequestGateway`](transport::RequestGateway):
//! it joins the base URL and path, merges headers (JSON content type <
//! bearer token < caller overrides), sends the request once, parses the JSON
//! body and turns every failure into an [`Error`] with a caller-visible
//! [`ErrorEnvelope`]. A 401 clears the stored session and fires the login
//! redirect hook before the error is returned.
//!
//! Endpoint bindings are generated from the declarative [`catalog`] and
//! grouped by area: `auth`, `users`, `discovery`, `chat`, `reels` and
//! `subscriptions`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use datify_client::{Credentials, DatifyClient};
//!
//! #[tokio::main]
//! async fn main() -> datify_client::Result<()> {
//!     let client = DatifyClient::builder()
//!         .base_url_override("http://localhost:5000/api")
//!         .build()?;
//!
//!     client.auth().login(&Credentials::new("ada", "Secret1!")).await?;
//!     client.discovery().like(42, true).await?;
//!
//!     match client.chat().send_message(7, "hi!").await {
//!         Ok(msg) => println!("sent: {}", msg),
//!         Err(e) => eprintln!("failed with status {:?}: {}", e.status(), e),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Client and builder |
//! | [`transport`] | Request descriptors and the gateway |
//! | [`catalog`] | Declarative endpoint table |
//! | [`api`] | Typed binding groups |
//! | [`types`] | Request and response bodies |
//! | [`session`] | Session stores (memory, file, keyring) |
//! | [`redirect`] | Login redirect hook |
//! | [`config`] | Client configuration |
//! | [`password`] | Password strength rating |

pub mod api;
pub mod catalog;
pub mod client;
pub mod config;
pub mod password;
pub mod redirect;
pub mod session;
pub mod transport;
pub mod types;

pub use catalog::{BodyShape, Endpoint, EndpointSpec};
pub use client::{DatifyClient, DatifyClientBuilder};
pub use config::ClientConfig;
pub use password::PasswordStrength;
pub use redirect::{InMemoryLoginRedirect, LoginRedirect, NoopLoginRedirect};
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore};
pub use transport::{HeaderOverrides, RequestBody, RequestDescriptor, RequestGateway};
pub use types::{Credentials, Registration, Upload};

#[cfg(feature = "keyring-store")]
pub use session::KeyringSessionStore;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext, ErrorEnvelope, FailureKind};
