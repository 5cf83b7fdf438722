//! # postboard
//!
//! A tiny HTTP service over an in-memory list of posts.
//!
//! - `GET /` lists every post in insertion order.
//! - `POST /createposts` validates a post body and echoes it; the `append`
//!   variant also stores it under a random id.
//! - `POST /posts` echoes `title` and `content` from any JSON object.
//!
//! Nothing is persisted. The store starts with three seed posts every time.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::net::SocketAddr;
//! use std::sync::Arc;
//!
//! use postboard::{PostStore, Server, Variant, api};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), postboard::Error> {
//!     let app = api::router(Variant::Append, Arc::new(PostStore::seeded()))?;
//!     Server::bind(SocketAddr::from(([127, 0, 0, 1], 8000))).serve(app).await
//! }
//! ```
//!
//! The routing layer underneath is generic: a [`Router`] holds shared state
//! and async handlers of the form `async fn(state, Request) -> impl IntoResponse`.

mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod api;
pub mod config;
pub mod post;
pub mod schema;
pub mod store;

pub use api::{AppState, Variant};
pub use config::Config;
pub use error::Error;
pub use handler::Handler;
pub use method::Method;
pub use request::Request;
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::{Server, serve_with_shutdown};
pub use status::Status;
pub use store::PostStore;
