pub mod market;
pub mod retirement;
pub mod response;

pub use market::*;
pub use retirement::*;
pub use response::*;
