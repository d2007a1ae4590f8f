//! Logging setup shared by the Venture binaries.

pub mod logging;
