//! # PullSub
//!
//! `pullsub` is a minimalist, poll-based publish/subscribe server built with Rust.
//! Clients publish messages and fetch them over plain HTTP, which makes the server
//! a lightweight message buffer for applications that cannot hold open connections.
//!
//! ## Core Modules
//!
//! The library is structured into several modules, each with a distinct responsibility:
//!
//! - `broker`: The central component that assigns message ids, tracks subscriptions and fans out published messages.
//! - `config`: Handles loading and managing server configuration.
//! - `persistence`: Provides a mechanism for storing and retrieving message bodies (backed by sled).
//! - `transport`: The HTTP API through which clients publish, pull, acknowledge and unsubscribe.
//! - `utils`: Contains shared utilities, such as error handling and logging setup.

pub mod broker;
pub mod config;
pub mod persistence;
pub mod transport;
pub mod utils;
