use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;

use anyhow::Context;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, BufWriter};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::http::content::ContentWriter;
use crate::http::mime;
use crate::http::request::{Request, read_request};
use crate::http::resolve::{ResolveError, resolve_path};
use crate::http::response::StatusCode;
use crate::http::writer::HeaderWriter;

/// Handles exactly one request on one stream, then closes it.
pub struct Connection<S> {
    stream: S,
    cfg: Arc<Config>,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Resolving(Request),
    Writing(Resolved),
    Closed,
}

/// Outcome of mapping the request onto the document root.
#[derive(Debug)]
pub enum Resolved {
    /// An opened regular file; the header is only written once this exists.
    File {
        path: PathBuf,
        file: File,
        content_type: String,
    },
    NotFound,
}

impl Resolved {
    /// Opens `path` for reading, falling back to `NotFound` when it can't be.
    pub async fn open(path: PathBuf) -> Self {
        match File::open(&path).await {
            Ok(file) => {
                let content_type = mime::content_type(&path);
                Resolved::File {
                    path,
                    file,
                    content_type,
                }
            }
            Err(e) => {
                warn!("Cannot open {}: {}", path.display(), e);
                Resolved::NotFound
            }
        }
    }
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, cfg: Arc<Config>) -> Self {
        Self {
            stream,
            cfg,
            state: ConnectionState::Reading,
        }
    }

    /// Runs the pipeline and shuts the stream down on every exit path.
    pub async fn run(mut self) -> anyhow::Result<()> {
        debug!("Handling connection");
        let result = self.serve().await;

        if let Err(e) = self.stream.shutdown().await {
            debug!("Shutdown failed: {}", e);
        }
        debug!("Done handling connection");
        result
    }

    async fn serve(&mut self) -> anyhow::Result<()> {
        // One timestamp per response so `Date` and the date placeholder agree.
        let now = SystemTime::now();

        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    let server = &self.cfg.server;
                    let mut reader = BufReader::new(&mut self.stream);
                    let request = read_request(
                        &mut reader,
                        server.read_timeout(),
                        server.max_request_head_bytes,
                    )
                    .await;
                    self.state = ConnectionState::Resolving(request);
                }

                ConnectionState::Resolving(request) => {
                    self.state = ConnectionState::Writing(self.resolve(&request).await);
                }

                ConnectionState::Writing(resolved) => {
                    self.respond(resolved, now).await?;
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => break,
            }
        }

        Ok(())
    }

    async fn resolve(&self, request: &Request) -> Resolved {
        let Some(target) = request.target() else {
            debug!("No GET line in request");
            return Resolved::NotFound;
        };

        let files = &self.cfg.static_files;
        match resolve_path(&files.document_root, target, &files.index_file) {
            Ok(path) => Resolved::open(path).await,
            Err(ResolveError::NotFound) => {
                debug!("{} not found", target);
                Resolved::NotFound
            }
            Err(e) => {
                warn!("Rejected target {:?}: {}", target, e);
                Resolved::NotFound
            }
        }
    }

    async fn respond(&mut self, resolved: Resolved, now: SystemTime) -> anyhow::Result<()> {
        let files = &self.cfg.static_files;
        let headers = HeaderWriter::new(files, now);
        let content = ContentWriter::new(files, now);
        let mut out = BufWriter::new(&mut self.stream);

        match resolved {
            Resolved::File {
                path,
                mut file,
                content_type,
            } => {
                headers
                    .write(&mut out, StatusCode::Ok, &content_type)
                    .await
                    .context("writing response header")?;
                let n = content
                    .write_file(&mut out, &mut file, &content_type)
                    .await
                    .with_context(|| format!("writing {}", path.display()))?;
                info!("200 {} ({} bytes)", path.display(), n);
            }
            Resolved::NotFound => {
                headers
                    .write(&mut out, StatusCode::NotFound, mime::HTML)
                    .await
                    .context("writing response header")?;
                content
                    .write_not_found(&mut out)
                    .await
                    .context("writing not-found body")?;
                info!("404 Not Found");
            }
        }

        out.flush().await.context("flushing response")?;
        Ok(())
    }
}
