//! HTTP/1.0 wire layer.
//!
//! One request per connection, strictly linear:
//!
//! ```text
//!   frame ──▶ parse ──▶ build environ ──▶ application ──▶ write ──▶ close
//! ```
//!
//! - **`framer`**: accumulates bytes until the header terminator, then
//!   reads exactly the declared body length
//! - **`parser`**: splits the raw header block into a [`request::Request`]
//! - **`request`**: request data model and header map
//! - **`writer`**: serializes the committed response head and streams the
//!   body chunks back to the client
//!
//! No keep-alive, no chunked transfer encoding, no pipelining. The
//! framer and writer are generic over the stream so tests can drive the
//! whole layer through an in-memory duplex pipe.

pub mod framer;
pub mod parser;
pub mod request;
pub mod writer;
