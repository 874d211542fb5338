use std::collections::HashMap;

use bytes::Bytes;

use crate::gateway::error::GatewayError;

/// Represents one framed and parsed HTTP/1.0 request.
///
/// Built once per connection by the framer and parser, immutable after
/// the body has been attached, dropped when the connection ends. The
/// method and target are kept verbatim from the request line; header
/// names are normalized only in the derived `headers` map.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// Method token, verbatim ("GET", "POST", ...).
    pub method: String,
    /// Request target, unparsed path plus optional query.
    pub target: String,
    /// Raw header lines in arrival order.
    pub header_lines: Vec<String>,
    /// Lower-cased name → trimmed value; on duplicates the last wins.
    pub headers: HashMap<String, String>,
    /// Request body, exactly the declared content-length bytes.
    pub body: Bytes,
}

impl Request {
    /// Retrieves a header value by its lower-cased name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|v| v.as_str())
    }

    /// The declared body length.
    ///
    /// An absent `content-length` header means no body (0); a header
    /// that is present but not a valid non-negative integer is a
    /// malformed request. The gateway never infers a body from EOF.
    pub fn declared_content_length(&self) -> Result<usize, GatewayError> {
        match self.header("content-length") {
            None => Ok(0),
            Some(v) => v
                .trim()
                .parse::<usize>()
                .map_err(|_| GatewayError::Malformed("invalid content-length")),
        }
    }

    /// Splits the request target into (path, query) at the first `?`.
    ///
    /// Absolute-form targets have their scheme and authority stripped;
    /// the gateway only ever routes on the path.
    pub fn split_target(&self) -> (String, String) {
        if self.target.contains("://") {
            if let Ok(parsed) = url::Url::parse(&self.target) {
                return (
                    parsed.path().to_string(),
                    parsed.query().unwrap_or("").to_string(),
                );
            }
        }

        match self.target.split_once('?') {
            Some((path, query)) => (path.to_string(), query.to_string()),
            None => (self.target.clone(), String::new()),
        }
    }
}
