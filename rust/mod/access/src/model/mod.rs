mod assignment;
mod permission;
mod role;
mod seed;

pub use assignment::*;
pub use permission::*;
pub use role::*;
pub use seed::*;
