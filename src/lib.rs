//! Portico - Minimal HTTP/1.0 Application Gateway
//!
//! Core library for request framing, parsing, environment building and
//! response writing.

pub mod config;
pub mod gateway;
pub mod http;
pub mod server;
