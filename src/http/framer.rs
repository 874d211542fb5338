use bytes::{Buf, Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::gateway::error::GatewayError;

const READ_CHUNK: usize = 1024;

/// Guard against a peer that streams header bytes forever.
const MAX_HEAD: usize = 64 * 1024;

/// Reads from the stream until the `\r\n\r\n` terminator and returns the
/// raw header block including the terminator.
///
/// Bytes received past the terminator stay in `buf`; they belong to the
/// body and are picked up by [`read_body`]. EOF before the terminator is
/// a [`GatewayError::ConnectionClosed`], except when the peer never sent
/// a single byte, which counts as an (empty, malformed) request.
pub async fn read_head<S>(stream: &mut S, buf: &mut BytesMut) -> Result<Bytes, GatewayError>
where
    S: AsyncRead + Unpin,
{
    loop {
        if let Some(end) = find_head_end(buf) {
            return Ok(buf.split_to(end + 4).freeze());
        }

        if buf.len() > MAX_HEAD {
            return Err(GatewayError::Malformed("request head too large"));
        }

        let mut temp = [0u8; READ_CHUNK];
        let n = stream
            .read(&mut temp)
            .await
            .map_err(|_| GatewayError::ConnectionClosed)?;

        if n == 0 {
            return Err(if buf.is_empty() {
                GatewayError::Malformed("empty request")
            } else {
                GatewayError::ConnectionClosed
            });
        }

        buf.extend_from_slice(&temp[..n]);
    }
}

/// Reads exactly `declared` body bytes, draining `buf` first.
///
/// A declared length of zero never touches the stream; EOF before all
/// declared bytes arrive abandons the request as
/// [`GatewayError::ConnectionClosed`].
pub async fn read_body<S>(
    stream: &mut S,
    buf: &mut BytesMut,
    declared: usize,
) -> Result<Bytes, GatewayError>
where
    S: AsyncRead + Unpin,
{
    if declared == 0 {
        return Ok(Bytes::new());
    }

    let mut body = BytesMut::with_capacity(declared);

    let from_buffer = buf.len().min(declared);
    body.extend_from_slice(&buf[..from_buffer]);
    buf.advance(from_buffer);

    while body.len() < declared {
        let mut temp = [0u8; READ_CHUNK];
        let n = stream
            .read(&mut temp)
            .await
            .map_err(|_| GatewayError::ConnectionClosed)?;

        if n == 0 {
            return Err(GatewayError::ConnectionClosed);
        }

        // Anything past the declared length would be pipelined data,
        // which this gateway does not serve.
        let wanted = (declared - body.len()).min(n);
        body.extend_from_slice(&temp[..wanted]);
    }

    Ok(body.freeze())
}

fn find_head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}
