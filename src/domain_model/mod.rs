mod audit;
mod key;
mod monitoring;
mod role;
mod unit;
mod user;

pub use audit::*;
pub use key::*;
pub use monitoring::*;
pub use role::*;
pub use unit::*;
pub use user::*;
