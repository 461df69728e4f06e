pub mod auth;
pub mod external;
pub mod google;
pub mod in_memory;

pub use auth::*;
pub use external::*;
pub use google::*;
pub use in_memory::*;
