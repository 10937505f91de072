//! Shared types and event processing for the chouf status client.
//!
//! The wire record, the two-state status marker, the feed endpoint
//! configuration and the [`client::StatusClient`] processor live here so the
//! browser adapter and the terminal probe run the exact same rules. Nothing in
//! this crate touches a real socket or a real DOM: both sit behind the
//! [`client::FeedTransport`] and [`render::SiteDocument`] traits.

pub mod client;
pub mod config;
pub mod error;
pub mod render;
pub mod types;

pub use error::FeedError;
