//! Translates errors raised by the inner chain into `text/plain` responses.

pub mod config;
mod middleware;

pub use config::PlainTextConfig;
pub use middleware::PlainTextErrors;
