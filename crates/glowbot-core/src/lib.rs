//! Core domain + application logic for the cosmetics promo-post bot.
//!
//! This crate is intentionally framework-agnostic. Telegram / Mistral live
//! behind ports (traits) implemented in adapter crates.

pub mod config;
pub mod domain;
pub mod errors;
pub mod formatting;
pub mod logging;
pub mod ports;
pub mod security;
pub mod session;
pub mod topics;
pub mod workflow;

pub use errors::{Error, Result};
