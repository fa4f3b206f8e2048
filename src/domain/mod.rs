pub mod balance;
pub mod common;
pub mod rate_sheet;
pub mod transaction;
pub mod user;

pub use balance::*;
pub use common::*;
pub use rate_sheet::*;
pub use transaction::*;
pub use user::*;
