mod user;
mod forms;
mod todo;

pub use user::User;
pub use forms::{CreateUserForm, TodoForm};
pub use todo::{Todo, parse_deadline};
