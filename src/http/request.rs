use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};
use tokio::time::{Instant, timeout_at};
use tracing::{debug, warn};

/// The only request method the server understands.
pub const GET: &str = "GET";

/// What was learned from a request head.
///
/// Only the target of the first `GET` line is kept; every other line,
/// headers included, is read and discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    /// Raw request target (e.g. "/index.html"), `None` if no `GET` line was seen.
    pub target: Option<String>,
}

impl Request {
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }
}

/// Extracts the target from a `GET <target> ...` line.
///
/// Returns `None` for other methods and for lines with too few tokens.
pub fn parse_request_line(line: &str) -> Option<&str> {
    let mut parts = line.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(GET), Some(target)) => Some(target),
        _ => None,
    }
}

/// Reads request lines until the blank line ending the head.
///
/// Stops early on EOF, on a read error, once `max_head_bytes` have been
/// consumed or when `read_timeout` elapses, returning whatever has been
/// collected so far. Never fails.
pub async fn read_request<R>(reader: &mut R, read_timeout: Duration, max_head_bytes: u64) -> Request
where
    R: AsyncBufRead + Unpin,
{
    let deadline = Instant::now() + read_timeout;
    let mut reader = reader.take(max_head_bytes);
    let mut request = Request::default();
    let mut line = String::new();

    loop {
        line.clear();
        let n = match timeout_at(deadline, reader.read_line(&mut line)).await {
            Ok(Ok(n)) => n,
            Ok(Err(e)) => {
                warn!("Request read error: {}", e);
                break;
            }
            Err(_) => {
                warn!("Request read timed out after {:?}", read_timeout);
                break;
            }
        };

        if reader.limit() == 0 && !line.ends_with('\n') {
            warn!("Request head exceeds {} bytes", max_head_bytes);
            break;
        }
        if n == 0 {
            debug!("Client closed the stream before the end of the request head");
            break;
        }

        let trimmed = line.trim_end_matches(['\r', '\n']);
        debug!("Request line: ({})", trimmed);

        if trimmed.is_empty() {
            break;
        }

        if request.target.is_some() {
            continue;
        }
        if let Some(target) = parse_request_line(trimmed) {
            request.target = Some(target.to_string());
        }
    }

    request
}
