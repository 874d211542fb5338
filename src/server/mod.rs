//! Accept loop and per-connection pipeline driver.

pub mod connection;
pub mod listener;
