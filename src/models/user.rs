use serde::{Deserialize, Serialize};
use uuid::Uuid;
use super::todo::Todo;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub username: String,   // unique across all users
    pub pro: bool,          // lifts the free-plan todo limit
    pub todos: Vec<Todo>,   // insertion order
}

impl User {
    pub fn new(name: String, username: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            username,
            pro: false,
            todos: Vec::new(),
        }
    }

    pub fn find_todo_mut(&mut self, todo_id: Uuid) -> Option<&mut Todo> {
        self.todos.iter_mut().find(|todo| todo.id == todo_id)
    }
}
