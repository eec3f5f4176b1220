//! HTTP transport: request descriptors and the gateway that sends them.

pub mod http;
pub mod request;

pub use http::RequestGateway;
pub use request::{merge_headers, HeaderOverrides, RequestBody, RequestDescriptor};
