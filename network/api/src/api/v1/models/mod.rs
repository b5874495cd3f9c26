mod analytics;
mod like;
mod post;
mod user;

pub use analytics::*;
pub use like::*;
pub use post::*;
pub use user::*;

pub(crate) const REQUIRED: &str = "This field is required.";
pub(crate) const BLANK: &str = "This field may not be blank.";
pub(crate) const NULL: &str = "This field may not be null.";
