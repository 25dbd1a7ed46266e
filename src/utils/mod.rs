pub mod dates;
pub mod jwt;
pub mod money;
pub mod password;
pub mod reference;
pub mod validation;

pub use dates::*;
pub use jwt::*;
pub use money::*;
pub use password::*;
pub use reference::*;
pub use validation::*;
