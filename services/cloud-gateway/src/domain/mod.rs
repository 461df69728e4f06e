pub mod message;
pub mod requests;

pub use message::*;
pub use requests::*;
