use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateUserForm {
    pub name: String,
    pub username: String,
}

// Shared by todo creation and update; the deadline is parsed by the service layer.
#[derive(Debug, Deserialize)]
pub struct TodoForm {
    pub title: String,
    pub deadline: String,
}
