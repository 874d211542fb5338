use std::collections::HashMap;

use bytes::Bytes;

use crate::gateway::error::GatewayError;
use crate::http::request::Request;

/// Parses a framed header block into a [`Request`] with an empty body.
///
/// Deliberately tolerant: header lines that do not contain a colon are
/// skipped, a missing version token is accepted, and non-UTF-8 bytes are
/// replaced rather than rejected. The only fatal case is a request line
/// that cannot be split into at least a method and a target.
pub fn parse_request(raw: &[u8]) -> Result<Request, GatewayError> {
    let head = String::from_utf8_lossy(raw);
    let mut lines = head.split("\r\n");

    // Request line: METHOD SP TARGET [SP VERSION]
    let request_line = lines.next().unwrap_or("");
    let mut parts = request_line.split_whitespace();

    let method = parts
        .next()
        .ok_or(GatewayError::Malformed("empty request line"))?;
    let target = parts
        .next()
        .ok_or(GatewayError::Malformed("request line has no target"))?;

    let mut header_lines = Vec::new();
    let mut headers = HashMap::new();

    for line in lines {
        if line.is_empty() {
            continue;
        }

        header_lines.push(line.to_string());

        if let Some((name, value)) = line.split_once(':') {
            headers.insert(
                name.trim().to_ascii_lowercase(),
                value.trim().to_string(),
            );
        }
    }

    Ok(Request {
        method: method.to_string(),
        target: target.to_string(),
        header_lines,
        headers,
        body: Bytes::new(),
    })
}
