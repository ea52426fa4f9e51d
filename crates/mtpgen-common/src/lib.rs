//! Common utilities for mtpgen.
//!
//! This crate provides the small building blocks shared by the other mtpgen crates:
//!
//! - [`text`] - Base64 encoding of user-visible text fields, with an explicit encoding depth
//! - [`timestamp`] - Project timestamps in the `yy-MM-dd HH/mm` layout
//! - [`Error`] - Common error type

mod error;

pub mod text;
pub mod timestamp;

pub use error::{Error, Result};
pub use timestamp::{Timestamp, DEFAULT_TIMESTAMP_FORMAT};
