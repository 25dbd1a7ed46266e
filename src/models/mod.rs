pub mod budget;
pub mod common;
pub mod donation;
pub mod expense;
pub mod member;
pub mod offering_type;
pub mod pagination;
pub mod pledge;
pub mod report;
pub mod user;

pub use budget::*;
pub use common::*;
pub use donation::*;
pub use expense::*;
pub use member::*;
pub use offering_type::*;
pub use pagination::*;
pub use pledge::*;
pub use report::*;
pub use user::*;
