//! Outbound ports - interfaces for external services.
//!
//! These define the contracts that infrastructure adapters implement,
//! so application services never depend on concrete HTTP or storage
//! implementations.

pub mod api;
pub mod storage;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use api::{ApiError, RawApiPort};
pub use storage::{storage_keys, StorageProvider};
#[cfg(any(test, feature = "testing"))]
pub use testing::ScriptedApi;
