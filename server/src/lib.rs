//! Blog post REST API over a document store.
//!
//! # Overview
//! - [`store::Database`] owns every persisted [`models::BlogPost`].
//! - [`routes::app`] exposes `GET /posts` and `POST /posts` as a stateless
//!   projection of the store.
//! - [`server::start`] / [`server::RunningServer::stop`] bring the API up and
//!   down around a test run; [`fixtures`] generates seed data.

pub mod config;
pub mod error;
pub mod fixtures;
pub mod models;
pub mod routes;
pub mod server;
pub mod store;
pub mod telemetry;

pub use models::{Author, BlogPost, NewPost, PostView};
pub use routes::app;
pub use server::{start, RunningServer, ServerError};
pub use store::{Database, StoreError};
