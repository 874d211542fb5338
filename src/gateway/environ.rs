use bytes::Bytes;

use crate::config::ServerIdentity;
use crate::http::request::Request;

/// Single-pass readable handle over the request body.
///
/// Yields exactly the declared content-length bytes, once; after they
/// have been read the handle is empty and stays empty.
#[derive(Debug, Default)]
pub struct BodyReader {
    remaining: Bytes,
}

impl BodyReader {
    pub fn new(body: Bytes) -> Self {
        Self { remaining: body }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Takes all unread bytes, leaving the handle empty.
    pub fn read_all(&mut self) -> Bytes {
        std::mem::take(&mut self.remaining)
    }

    /// Takes up to `n` unread bytes.
    pub fn read(&mut self, n: usize) -> Bytes {
        let take = n.min(self.remaining.len());
        self.remaining.split_to(take)
    }

    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }
}

/// The fixed-vocabulary request context handed to the application.
///
/// One instance per request, built once by the gateway and never touched
/// by it again after handoff. The application may drain the body handle;
/// everything else is plain data.
#[derive(Debug)]
pub struct Environ {
    /// Request method, verbatim from the request line ("GET", "POST", ...).
    pub request_method: String,
    /// Request path. Percent-decoding is left to the application.
    pub path: String,
    /// Raw query substring after `?`, empty if none.
    pub query_string: String,
    /// Verbatim `content-type` header value, empty if absent.
    pub content_type: String,
    /// Byte count of the body, 0 if no content-length was declared.
    pub content_length: usize,
    /// Host part of the bind-time server identity.
    pub server_name: String,
    /// Port part of the bind-time server identity.
    pub server_port: u16,
    /// Fixed plaintext scheme marker; TLS is out of scope.
    pub url_scheme: &'static str,
    /// Verbatim `cookie` header value, empty if absent.
    pub cookie: String,
    /// Single-pass handle over exactly `content_length` bytes.
    pub body: BodyReader,
}

impl Environ {
    /// Deterministic, pure transformation of a parsed request plus the
    /// server's bind-time identity into the application-facing context.
    pub fn build(request: &Request, identity: &ServerIdentity) -> Self {
        let (path, query_string) = request.split_target();

        Self {
            request_method: request.method.clone(),
            path,
            query_string,
            content_type: request.header("content-type").unwrap_or("").to_string(),
            content_length: request.body.len(),
            server_name: identity.name.clone(),
            server_port: identity.port,
            url_scheme: "http",
            cookie: request.header("cookie").unwrap_or("").to_string(),
            body: BodyReader::new(request.body.clone()),
        }
    }

    /// The key vocabulary as ordered (key, display value) pairs. The body
    /// handle is not included; it is a stream, not a value.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("request_method", self.request_method.clone()),
            ("path", self.path.clone()),
            ("query_string", self.query_string.clone()),
            ("content_type", self.content_type.clone()),
            ("content_length", self.content_length.to_string()),
            ("server_name", self.server_name.clone()),
            ("server_port", self.server_port.to_string()),
            ("url_scheme", self.url_scheme.to_string()),
            ("cookie", self.cookie.clone()),
        ]
    }
}
