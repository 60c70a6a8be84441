//! The `transport` module is responsible for handling network
//! communication with clients over HTTP.
//!
//! It defines the wire shapes used in requests and responses, builds the
//! router that maps the four broker operations onto their routes, and
//! implements the server loop with graceful shutdown.

pub mod http;
pub mod message;

#[cfg(test)]
mod tests;
