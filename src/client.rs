//! Client entry point.
//!
//! Keep the public surface small: a builder, the client, and the typed
//! binding groups it hands out.

pub mod builder;
pub mod core;

pub use self::builder::DatifyClientBuilder;
pub use self::core::DatifyClient;
