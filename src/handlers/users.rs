use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use axum_extra::extract::WithRejection;
use crate::errors::{AppError, AppResult};
use crate::middleware::PathId;
use crate::models::CreateUserForm;
use crate::services::TodoService;

pub async fn register_user(
    State(todo_service): State<TodoService>,
    WithRejection(Json(form), _): WithRejection<Json<CreateUserForm>, AppError>,
) -> AppResult<Response> {
    tracing::debug!("Registration attempt for username: {}", form.username);

    let user = todo_service.create_user(form.name, form.username).await?;

    Ok((StatusCode::CREATED, Json(user)).into_response())
}

pub async fn get_user(
    State(todo_service): State<TodoService>,
    PathId(user_id): PathId,
) -> AppResult<Response> {
    tracing::debug!("Fetching user: {}", user_id);

    let user = todo_service.get_user(user_id).await?;

    Ok(Json(user).into_response())
}

pub async fn upgrade_to_pro(
    State(todo_service): State<TodoService>,
    PathId(user_id): PathId,
) -> AppResult<Response> {
    let user = todo_service.upgrade_to_pro(user_id).await?;

    Ok(Json(user).into_response())
}
