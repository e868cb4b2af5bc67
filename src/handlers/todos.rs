use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use crate::errors::AppResult;
use crate::middleware::{ActingUser, PathId};
use crate::models::{TodoForm, parse_deadline};
use crate::services::TodoService;

pub async fn list_todos(
    State(todo_service): State<TodoService>,
    ActingUser(username): ActingUser,
) -> AppResult<Response> {
    tracing::debug!("Listing todos for user: {}", username);

    let todos = todo_service.list_todos(&username).await?;

    Ok(Json(todos).into_response())
}

// The body is only inspected once the user and plan limit have been checked.
pub async fn create_todo(
    State(todo_service): State<TodoService>,
    ActingUser(username): ActingUser,
    payload: Result<Json<TodoForm>, JsonRejection>,
) -> AppResult<Response> {
    todo_service.check_todo_capacity(&username).await?;

    let Json(form) = payload?;
    let deadline = parse_deadline(&form.deadline)?;

    let todo = todo_service.create_todo(&username, form.title, deadline).await?;

    Ok((StatusCode::CREATED, Json(todo)).into_response())
}

pub async fn update_todo(
    State(todo_service): State<TodoService>,
    PathId(todo_id): PathId,
    ActingUser(username): ActingUser,
    payload: Result<Json<TodoForm>, JsonRejection>,
) -> AppResult<Response> {
    todo_service.get_todo(&username, todo_id).await?;

    let Json(form) = payload?;
    let deadline = parse_deadline(&form.deadline)?;

    let todo = todo_service
        .update_todo(&username, todo_id, form.title, deadline)
        .await?;

    Ok(Json(todo).into_response())
}

pub async fn mark_todo_done(
    State(todo_service): State<TodoService>,
    PathId(todo_id): PathId,
    ActingUser(username): ActingUser,
) -> AppResult<Response> {
    let todo = todo_service.mark_done(&username, todo_id).await?;

    Ok(Json(todo).into_response())
}

pub async fn delete_todo(
    State(todo_service): State<TodoService>,
    PathId(todo_id): PathId,
    ActingUser(username): ActingUser,
) -> AppResult<Response> {
    todo_service.delete_todo(&username, todo_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
