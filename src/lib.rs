//! Webworker - a tiny single-request-per-connection file server.
//!
//! Each accepted connection reads one `GET` request head, maps its target
//! onto a file under the document root and answers with a fixed header
//! followed by the file, personalising text content on the way out.

pub mod config;
pub mod http;
pub mod server;
