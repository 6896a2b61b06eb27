pub mod message;
pub mod place;

pub use message::*;
pub use place::*;
