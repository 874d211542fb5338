use std::fmt;

/// Protocol-level failures local to a single connection.
///
/// Neither variant ever terminates the accept loop; the connection
/// driver translates them into the recovery paths the protocol allows.
#[derive(Debug, PartialEq, Eq)]
pub enum GatewayError {
    /// Peer closed the connection before the header terminator was seen
    /// or before all declared body bytes arrived. The request is
    /// abandoned; no response is sent.
    ConnectionClosed,

    /// Request the gateway must answer itself: an unsplittable request
    /// line, an empty request, or an invalid content-length.
    Malformed(&'static str),
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::ConnectionClosed => write!(f, "connection closed by peer"),
            GatewayError::Malformed(reason) => write!(f, "malformed request: {}", reason),
        }
    }
}

impl std::error::Error for GatewayError {}
