//! One-shot command front end: log in, check the caller's capability,
//! run one service call, print the result.

mod dispatch;
mod output;

pub use dispatch::*;
pub use output::*;
