//! Process-wide `tracing` setup. Needs manual verification:
//! `bin/logger_demo.rs` shows the filter being swapped at runtime.

mod logger;
pub use logger::*;

pub use tracing::{debug, error, info, trace, warn};
