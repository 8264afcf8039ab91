//! Synchronous API client core for the blog post service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, making the core fully deterministic and testable.
//!
//! # Design
//! - `BlogClient` is stateless; it holds only `base_url`.
//! - Each endpoint is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit.
//! - DTOs are defined independently from the server crate; the integration
//!   test against a live server catches schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::BlogClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{AuthorName, CreatePost, Post};
