//! Application layer - services, DTOs, and the error taxonomy.

pub mod dto;
pub mod error;
pub mod services;

pub use error::{ServiceError, REQUEST_TIMEOUT_SECS};
