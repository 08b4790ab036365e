//! # Printer Module
//!
//! This module provides printer profiles, job options and the stateful
//! printer session.
//!
//! ## Modules
//!
//! - [`config`]: Printer hardware profiles
//! - [`options`]: Typed job options and nodes
//! - [`session`]: A printer session over any transport

pub mod config;
pub mod options;
pub mod session;

pub use config::PrinterConfig;
pub use session::Session;
