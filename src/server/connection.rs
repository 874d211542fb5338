use std::sync::Arc;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use crate::config::ServerIdentity;
use crate::gateway::app::{Application, Body, ResponseContext, ResponseHead};
use crate::gateway::environ::Environ;
use crate::gateway::error::GatewayError;
use crate::http::request::Request;
use crate::http::{framer, parser, writer};

/// Drives one connection through the gateway pipeline:
/// frame → parse → build environ → application → write → close.
///
/// Generic over the stream so the whole pipeline runs against an
/// in-memory duplex pipe in tests.
pub struct Connection<S, A> {
    stream: S,
    identity: ServerIdentity,
    app: Arc<A>,
}

impl<S, A> Connection<S, A>
where
    S: AsyncRead + AsyncWrite + Unpin,
    A: Application,
{
    pub fn new(stream: S, identity: ServerIdentity, app: Arc<A>) -> Self {
        Self {
            stream,
            identity,
            app,
        }
    }

    /// Serves exactly one request, then shuts the stream down. The
    /// shutdown happens on every exit path, success or failure.
    pub async fn serve(mut self) -> anyhow::Result<()> {
        let result = self.serve_inner().await;
        let _ = self.stream.shutdown().await;
        result
    }

    async fn serve_inner(&mut self) -> anyhow::Result<()> {
        let request = match self.read_request().await {
            Ok(request) => request,
            Err(GatewayError::ConnectionClosed) => {
                debug!("Peer closed before the request was complete");
                return Ok(());
            }
            Err(GatewayError::Malformed(reason)) => {
                warn!("Malformed request: {}", reason);
                let (head, body) = not_found();
                return writer::write_response(&mut self.stream, &head, body).await;
            }
        };

        let mut env = Environ::build(&request, &self.identity);
        let mut ctx = ResponseContext::new();

        let (head, body) = match self.app.call(&mut env, &mut ctx) {
            Ok(body) => match ctx.into_head() {
                Some(head) => (head, body),
                None => {
                    warn!("Application returned without committing a response head");
                    internal_error()
                }
            },
            Err(e) => {
                warn!("Application failure: {}", e);
                internal_error()
            }
        };

        // If a body chunk fails past this point the head is already on
        // the wire; the error propagates and the connection just closes.
        writer::write_response(&mut self.stream, &head, body).await
    }

    async fn read_request(&mut self) -> Result<Request, GatewayError> {
        let mut buf = BytesMut::with_capacity(4096);

        let head = framer::read_head(&mut self.stream, &mut buf).await?;
        let mut request = parser::parse_request(&head)?;

        let declared = request.declared_content_length()?;
        request.body = framer::read_body(&mut self.stream, &mut buf, declared).await?;

        Ok(request)
    }
}

fn not_found() -> (ResponseHead, Body) {
    (
        ResponseHead::html("404 Not Found"),
        Body::from_chunks(vec![b"<h2>This page does not exist.</h2>".to_vec()]),
    )
}

fn internal_error() -> (ResponseHead, Body) {
    (
        ResponseHead::html("500 Internal Server Error"),
        Body::from_chunks(vec![
            b"<h2>The application failed to produce a response.</h2>".to_vec(),
        ]),
    )
}
