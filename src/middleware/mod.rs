mod acting_user;
mod path_id;

pub use acting_user::{ActingUser, USERNAME_HEADER};
pub use path_id::PathId;
