use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::gateway::app::{Body, ResponseHead};

/// Fixed protocol token prefixed to every status line.
pub const HTTP_VERSION: &str = "HTTP/1.0";

/// Serializes the status line, header pairs in order, and the blank
/// separator line. No headers are injected; if the application wants a
/// Content-Length it must supply one itself.
pub fn serialize_head(head: &ResponseHead) -> Vec<u8> {
    let mut buf = Vec::new();

    buf.extend_from_slice(HTTP_VERSION.as_bytes());
    buf.push(b' ');
    buf.extend_from_slice(head.status.as_bytes());
    buf.extend_from_slice(b"\r\n");

    for (name, value) in &head.headers {
        buf.extend_from_slice(name.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(value.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    buf.extend_from_slice(b"\r\n");

    buf
}

/// Writes the head and then each body chunk in order, with no added
/// framing. The body is consumed (and its resources released on drop)
/// whether writing succeeds or fails; closing the connection afterwards
/// is the caller's unconditional responsibility.
pub async fn write_response<S>(
    stream: &mut S,
    head: &ResponseHead,
    body: Body,
) -> anyhow::Result<()>
where
    S: AsyncWrite + Unpin,
{
    stream.write_all(&serialize_head(head)).await?;

    for chunk in body {
        let chunk = chunk?;
        stream.write_all(&chunk).await?;
    }

    stream.flush().await?;
    Ok(())
}
