mod like;
mod memory;
mod pg;
mod post;
mod store;
mod user;

pub use like::*;
pub use memory::*;
pub use pg::*;
pub use post::*;
pub use store::*;
pub use user::*;
