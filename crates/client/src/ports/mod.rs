//! Port definitions - interfaces the application depends on.

pub mod outbound;
