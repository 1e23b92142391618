//! # Domain Layer
//!
//! Core types of the Sando service client and request-routing layer.
//!
//! - [`error`] - structured dispatch errors ([`ApiError`]) and ambient errors
//! - [`value_objects`] - methods, requests, headers, services, health entries
//! - [`ports`] - [`Transport`](ports::Transport) and
//!   [`ServiceClient`](ports::ServiceClient) contracts
//! - [`constants`] - protocol-level names

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{ApiError, ApiResult, Error, ErrorCode, Result};
pub use value_objects::*;
