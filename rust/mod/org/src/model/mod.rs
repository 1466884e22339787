mod org;
mod seed;

pub use org::*;
pub use seed::*;
