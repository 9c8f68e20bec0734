use std::time::SystemTime;

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::config::StaticConfig;
use crate::http::response::{ResponseHeader, StatusCode};

const HTTP_VERSION: &str = "HTTP/1.1";

fn serialize_header(header: &ResponseHeader) -> Vec<u8> {
    let mut buf = Vec::new();

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        header.status.as_u16(),
        header.status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    for (k, v) in &header.fields {
        buf.extend_from_slice(k.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(v.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    buf
}

/// Emits the response preamble: status line, `Date`, `Server`,
/// `Connection: close` and `Content-Type`, then the blank line.
pub struct HeaderWriter<'a> {
    server_name: &'a str,
    now: SystemTime,
}

impl<'a> HeaderWriter<'a> {
    pub fn new(cfg: &'a StaticConfig, now: SystemTime) -> Self {
        Self {
            server_name: &cfg.server_name,
            now,
        }
    }

    pub fn header(&self, status: StatusCode, content_type: &str) -> ResponseHeader {
        ResponseHeader::new(status)
            .field("Date", httpdate::fmt_http_date(self.now))
            .field("Server", self.server_name)
            .field("Connection", "close")
            .field("Content-Type", content_type)
    }

    pub async fn write<W>(
        &self,
        out: &mut W,
        status: StatusCode,
        content_type: &str,
    ) -> std::io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let buf = serialize_header(&self.header(status, content_type));
        out.write_all(&buf).await
    }
}
