//! HTTP handling for a single connection.
//!
//! A connection serves exactly one request and is then closed; there is no
//! keep-alive and no request body handling.
//!
//! # Architecture
//!
//! - **`connection`**: drives one request through the pipeline and closes the stream
//! - **`request`**: reads the request head and extracts the `GET` target
//! - **`resolve`**: maps the target onto a file under the document root
//! - **`mime`**: content type detection based on file extensions
//! - **`response`**: status codes and the ordered response header
//! - **`writer`**: serializes the response header
//! - **`content`**: streams the body, substituting placeholders in text
//!
//! # Connection Pipeline
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Read lines up to the blank line
//!        └──────┬──────┘
//!               │ GET target (or none)
//!               ▼
//!        ┌──────────────────┐
//!        │    Resolving     │ ← Confine to document root, classify
//!        └──────┬───────────┘
//!               │ File or NotFound
//!               ▼
//!        ┌──────────────────┐
//!        │     Writing      │ ← Header, then body
//!        └──────┬───────────┘
//!               │
//!               └─ Closed (always)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use webworker::config::Config;
//! use webworker::http::connection::Connection;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let cfg = Arc::new(Config::default());
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let cfg = Arc::clone(&cfg);
//!         tokio::spawn(async move {
//!             if let Err(e) = Connection::new(socket, cfg).run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod content;
pub mod mime;
pub mod request;
pub mod resolve;
pub mod response;
pub mod writer;
