// Shared helpers: compile-time constants and client-local storage

pub mod constants;
pub mod storage;

pub use constants::*;
pub use storage::*;
