use std::collections::HashMap;
use std::sync::Arc;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;
use crate::errors::{AppError, AppResult};
use crate::models::{Todo, User};

/// In-memory user and todo collections.
///
/// Users are keyed by id, with a secondary index from username to id. Each
/// user owns its todos as an ordered `Vec`, so listing keeps insertion order.
#[derive(Debug)]
pub struct TodoStore {
    users: HashMap<Uuid, User>,
    usernames: HashMap<String, Uuid>,
    free_todo_limit: usize,
}

impl TodoStore {
    pub fn new(free_todo_limit: usize) -> Self {
        Self {
            users: HashMap::new(),
            usernames: HashMap::new(),
            free_todo_limit,
        }
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn create_user(&mut self, name: String, username: String) -> AppResult<User> {
        if self.usernames.contains_key(&username) {
            return Err(AppError::DuplicateUsername);
        }

        let user = User::new(name, username);
        self.usernames.insert(user.username.clone(), user.id);
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    pub fn user_by_id(&self, id: Uuid) -> AppResult<&User> {
        self.users.get(&id).ok_or(AppError::UserNotFound)
    }

    pub fn upgrade_to_pro(&mut self, id: Uuid) -> AppResult<User> {
        let user = self.users.get_mut(&id).ok_or(AppError::UserNotFound)?;
        if user.pro {
            return Err(AppError::AlreadyPro);
        }

        user.pro = true;
        Ok(user.clone())
    }

    pub fn user_by_username(&self, username: &str) -> AppResult<&User> {
        self.usernames
            .get(username)
            .and_then(|id| self.users.get(id))
            .ok_or(AppError::UserNotFound)
    }

    fn user_by_username_mut(&mut self, username: &str) -> AppResult<&mut User> {
        let id = self.usernames.get(username).ok_or(AppError::UserNotFound)?;
        self.users.get_mut(id).ok_or(AppError::UserNotFound)
    }

    pub fn list_todos(&self, username: &str) -> AppResult<Vec<Todo>> {
        Ok(self.user_by_username(username)?.todos.clone())
    }

    /// Fails with `UserNotFound` or `TodoLimitExceeded` when `username`
    /// may not create another todo right now.
    pub fn check_todo_capacity(&self, username: &str) -> AppResult<()> {
        let user = self.user_by_username(username)?;
        if !user.pro && user.todos.len() >= self.free_todo_limit {
            return Err(AppError::TodoLimitExceeded);
        }
        Ok(())
    }

    pub fn todo(&self, username: &str, todo_id: Uuid) -> AppResult<&Todo> {
        self.user_by_username(username)?
            .todos
            .iter()
            .find(|todo| todo.id == todo_id)
            .ok_or(AppError::TodoNotFound)
    }

    pub fn create_todo(
        &mut self,
        username: &str,
        title: String,
        deadline: DateTime<Utc>,
    ) -> AppResult<Todo> {
        self.check_todo_capacity(username)?;
        let user = self.user_by_username_mut(username)?;

        let todo = Todo::new(title, deadline);
        user.todos.push(todo.clone());
        Ok(todo)
    }

    pub fn update_todo(
        &mut self,
        username: &str,
        todo_id: Uuid,
        title: String,
        deadline: DateTime<Utc>,
    ) -> AppResult<Todo> {
        let todo = self
            .user_by_username_mut(username)?
            .find_todo_mut(todo_id)
            .ok_or(AppError::TodoNotFound)?;

        todo.title = title;
        todo.deadline = deadline;
        Ok(todo.clone())
    }

    pub fn mark_done(&mut self, username: &str, todo_id: Uuid) -> AppResult<Todo> {
        let todo = self
            .user_by_username_mut(username)?
            .find_todo_mut(todo_id)
            .ok_or(AppError::TodoNotFound)?;

        todo.done = true;
        Ok(todo.clone())
    }

    pub fn delete_todo(&mut self, username: &str, todo_id: Uuid) -> AppResult<()> {
        let user = self.user_by_username_mut(username)?;
        let index = user
            .todos
            .iter()
            .position(|todo| todo.id == todo_id)
            .ok_or(AppError::TodoNotFound)?;

        user.todos.remove(index);
        Ok(())
    }
}

/// Cloneable handle shared with every handler through axum state.
///
/// Each method takes the lock once and holds it for its whole
/// check-then-mutate step, so concurrent requests never interleave.
pub struct TodoService {
    store: Arc<RwLock<TodoStore>>,
}

impl TodoService {
    pub fn new(free_todo_limit: usize) -> Self {
        Self {
            store: Arc::new(RwLock::new(TodoStore::new(free_todo_limit))),
        }
    }

    pub async fn create_user(&self, name: String, username: String) -> AppResult<User> {
        let user = self.store.write().await.create_user(name, username)?;
        tracing::info!("Registered user {} ({})", user.username, user.id);
        Ok(user)
    }

    pub async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.store.read().await.user_by_id(id).cloned()
    }

    pub async fn upgrade_to_pro(&self, id: Uuid) -> AppResult<User> {
        let user = self.store.write().await.upgrade_to_pro(id)?;
        tracing::info!("User {} upgraded to pro", user.username);
        Ok(user)
    }

    pub async fn list_todos(&self, username: &str) -> AppResult<Vec<Todo>> {
        self.store.read().await.list_todos(username)
    }

    pub async fn check_todo_capacity(&self, username: &str) -> AppResult<()> {
        self.store.read().await.check_todo_capacity(username)
    }

    pub async fn get_todo(&self, username: &str, todo_id: Uuid) -> AppResult<Todo> {
        self.store.read().await.todo(username, todo_id).cloned()
    }

    pub async fn create_todo(
        &self,
        username: &str,
        title: String,
        deadline: DateTime<Utc>,
    ) -> AppResult<Todo> {
        let todo = self.store.write().await.create_todo(username, title, deadline)?;
        tracing::info!("Created todo {} for user {}", todo.id, username);
        Ok(todo)
    }

    pub async fn update_todo(
        &self,
        username: &str,
        todo_id: Uuid,
        title: String,
        deadline: DateTime<Utc>,
    ) -> AppResult<Todo> {
        let todo = self
            .store
            .write()
            .await
            .update_todo(username, todo_id, title, deadline)?;
        tracing::info!("Updated todo {} for user {}", todo_id, username);
        Ok(todo)
    }

    pub async fn mark_done(&self, username: &str, todo_id: Uuid) -> AppResult<Todo> {
        let todo = self.store.write().await.mark_done(username, todo_id)?;
        tracing::info!("Marked todo {} done for user {}", todo_id, username);
        Ok(todo)
    }

    pub async fn delete_todo(&self, username: &str, todo_id: Uuid) -> AppResult<()> {
        self.store.write().await.delete_todo(username, todo_id)?;
        tracing::info!("Deleted todo {} for user {}", todo_id, username);
        Ok(())
    }
}

impl Clone for TodoService {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_user(username: &str) -> TodoStore {
        let mut store = TodoStore::new(10);
        store.create_user("Test".into(), username.into()).unwrap();
        store
    }

    #[test]
    fn duplicate_username_leaves_store_unchanged() {
        let mut store = store_with_user("alice");

        let err = store.create_user("Other Alice".into(), "alice".into()).unwrap_err();

        assert_eq!(err, AppError::DuplicateUsername);
        assert_eq!(store.user_count(), 1);
    }

    #[test]
    fn usernames_are_case_sensitive() {
        let mut store = store_with_user("alice");
        assert!(store.create_user("Alice".into(), "Alice".into()).is_ok());
        assert_eq!(store.user_count(), 2);
    }

    #[test]
    fn free_plan_stops_at_limit() {
        let mut store = store_with_user("alice");
        for i in 0..10 {
            store.create_todo("alice", format!("todo {}", i), Utc::now()).unwrap();
        }

        let err = store.create_todo("alice", "one too many".into(), Utc::now()).unwrap_err();

        assert_eq!(err, AppError::TodoLimitExceeded);
        assert_eq!(store.list_todos("alice").unwrap().len(), 10);
    }

    #[test]
    fn capacity_check_reports_user_before_limit() {
        let mut store = store_with_user("alice");
        assert_eq!(store.check_todo_capacity("ghost").unwrap_err(), AppError::UserNotFound);
        assert!(store.check_todo_capacity("alice").is_ok());

        for i in 0..10 {
            store.create_todo("alice", format!("todo {}", i), Utc::now()).unwrap();
        }
        assert_eq!(store.check_todo_capacity("alice").unwrap_err(), AppError::TodoLimitExceeded);
    }

    #[test]
    fn todo_lookup_is_scoped_to_owner() {
        let mut store = store_with_user("alice");
        store.create_user("Bob".into(), "bob".into()).unwrap();
        let todo = store.create_todo("alice", "private".into(), Utc::now()).unwrap();

        assert_eq!(store.todo("alice", todo.id).unwrap().id, todo.id);
        assert_eq!(store.todo("bob", todo.id).unwrap_err(), AppError::TodoNotFound);
        assert_eq!(store.todo("ghost", todo.id).unwrap_err(), AppError::UserNotFound);
    }

    #[test]
    fn pro_plan_has_no_limit() {
        let mut store = store_with_user("alice");
        let id = store.user_by_username("alice").unwrap().id;
        store.upgrade_to_pro(id).unwrap();

        for i in 0..25 {
            store.create_todo("alice", format!("todo {}", i), Utc::now()).unwrap();
        }

        assert_eq!(store.list_todos("alice").unwrap().len(), 25);
    }

    #[test]
    fn upgrade_twice_is_rejected() {
        let mut store = store_with_user("alice");
        let id = store.user_by_username("alice").unwrap().id;

        assert!(store.upgrade_to_pro(id).unwrap().pro);
        assert_eq!(store.upgrade_to_pro(id).unwrap_err(), AppError::AlreadyPro);
    }

    #[test]
    fn unknown_user_id_is_not_found() {
        let mut store = store_with_user("alice");
        assert_eq!(store.user_by_id(Uuid::new_v4()).unwrap_err(), AppError::UserNotFound);
        assert_eq!(store.upgrade_to_pro(Uuid::new_v4()).unwrap_err(), AppError::UserNotFound);
    }

    #[test]
    fn update_keeps_id_done_and_created_at() {
        let mut store = store_with_user("alice");
        let todo = store.create_todo("alice", "draft".into(), Utc::now()).unwrap();
        store.mark_done("alice", todo.id).unwrap();

        let deadline = Utc::now() + chrono::Duration::days(3);
        let updated = store.update_todo("alice", todo.id, "final".into(), deadline).unwrap();

        assert_eq!(updated.id, todo.id);
        assert_eq!(updated.title, "final");
        assert_eq!(updated.deadline, deadline);
        assert_eq!(updated.created_at, todo.created_at);
        assert!(updated.done);
    }

    #[test]
    fn mark_done_is_idempotent() {
        let mut store = store_with_user("alice");
        let todo = store.create_todo("alice", "task".into(), Utc::now()).unwrap();

        assert!(store.mark_done("alice", todo.id).unwrap().done);
        assert!(store.mark_done("alice", todo.id).unwrap().done);
    }

    #[test]
    fn delete_removes_exactly_one() {
        let mut store = store_with_user("alice");
        let first = store.create_todo("alice", "first".into(), Utc::now()).unwrap();
        let second = store.create_todo("alice", "second".into(), Utc::now()).unwrap();

        store.delete_todo("alice", first.id).unwrap();

        let remaining = store.list_todos("alice").unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, second.id);
        assert_eq!(store.mark_done("alice", first.id).unwrap_err(), AppError::TodoNotFound);
        assert_eq!(store.delete_todo("alice", first.id).unwrap_err(), AppError::TodoNotFound);
    }

    #[test]
    fn todos_are_scoped_to_their_owner() {
        let mut store = store_with_user("alice");
        store.create_user("Bob".into(), "bob".into()).unwrap();
        let todo = store.create_todo("alice", "private".into(), Utc::now()).unwrap();

        assert_eq!(store.mark_done("bob", todo.id).unwrap_err(), AppError::TodoNotFound);
        assert_eq!(store.delete_todo("bob", todo.id).unwrap_err(), AppError::TodoNotFound);
        assert!(store.list_todos("bob").unwrap().is_empty());
        assert_eq!(store.list_todos("carol").unwrap_err(), AppError::UserNotFound);
    }

    #[tokio::test]
    async fn service_clones_share_one_store() {
        let service = TodoService::new(10);
        let handle = service.clone();

        let user = service.create_user("Alice".into(), "alice".into()).await.unwrap();
        handle.create_todo("alice", "shared".into(), Utc::now()).await.unwrap();

        let fetched = service.get_user(user.id).await.unwrap();
        assert_eq!(fetched.todos.len(), 1);
    }
}
