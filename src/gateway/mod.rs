//! Gateway core: the environment contract between the HTTP layer and
//! the mounted application.
//!
//! The gateway hands each parsed request to exactly one [`Application`]
//! as an [`Environ`] plus a [`ResponseContext`]; the application commits
//! a [`ResponseHead`] and returns a lazy [`Body`]. Nothing here touches
//! the wire.

pub mod app;
pub mod environ;
pub mod error;

pub use app::{Application, Body, ResponseContext, ResponseHead};
pub use environ::{BodyReader, Environ};
pub use error::GatewayError;
