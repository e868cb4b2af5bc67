mod users;
mod todos;

pub use users::{register_user, get_user, upgrade_to_pro};
pub use todos::{list_todos, create_todo, update_todo, mark_todo_done, delete_todo};
