use std::fmt::Write as _;
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use crate::config::StaticConfig;
use crate::http::mime;

/// Body sent when the requested resource does not exist.
pub const NOT_FOUND_BODY: &str = "<html><head></head><body>\n\
<h1>Error!</h1>\n<h2>404 - File Not Found</h2>\n\
<h4>The file mentioned above could not be found on our servers. \
The file may have been damaged, moved, deleted, or misspelled.</h4>\
</body></html>\n";

/// Writes the response body.
///
/// Text resources go through placeholder substitution; everything else
/// is copied byte for byte.
pub struct ContentWriter<'a> {
    cfg: &'a StaticConfig,
    now: SystemTime,
}

impl<'a> ContentWriter<'a> {
    pub fn new(cfg: &'a StaticConfig, now: SystemTime) -> Self {
        Self { cfg, now }
    }

    pub async fn write_not_found<W>(&self, out: &mut W) -> std::io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        out.write_all(NOT_FOUND_BODY.as_bytes()).await
    }

    /// Streams an already opened file. Returns the number of body bytes written.
    pub async fn write_file<W>(
        &self,
        out: &mut W,
        file: &mut File,
        content_type: &str,
    ) -> std::io::Result<u64>
    where
        W: AsyncWrite + Unpin,
    {
        if !mime::is_text(content_type) {
            return tokio::io::copy(file, out).await;
        }

        let mut raw = Vec::new();
        file.read_to_end(&mut raw).await?;
        match String::from_utf8(raw) {
            Ok(text) => {
                let body = self.substitute(&text);
                out.write_all(body.as_bytes()).await?;
                Ok(body.len() as u64)
            }
            Err(e) => {
                debug!("{} content is not UTF-8, sending it verbatim", content_type);
                let raw = e.into_bytes();
                out.write_all(&raw).await?;
                Ok(raw.len() as u64)
            }
        }
    }

    /// Replaces every date and server-name placeholder in `text`.
    pub fn substitute(&self, text: &str) -> String {
        text.replace(&self.cfg.date_placeholder, &self.formatted_date())
            .replace(&self.cfg.server_placeholder, &self.cfg.server_name)
    }

    pub fn formatted_date(&self) -> String {
        let now: DateTime<Utc> = self.now.into();
        let mut out = String::new();
        if write!(out, "{}", now.format(&self.cfg.date_format)).is_err() {
            warn!("Bad date format {:?}, using HTTP date", self.cfg.date_format);
            return httpdate::fmt_http_date(self.now);
        }
        out
    }
}
