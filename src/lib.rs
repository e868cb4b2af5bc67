pub mod config;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use axum::{
    routing::{get, patch, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use crate::{
    config::Config,
    services::TodoService,
};

/// Builds the application router around a fresh, empty store.
pub fn app(config: &Config) -> Router {
    router(TodoService::new(config.user.free_todo_limit), config)
}

pub fn router(todo_service: TodoService, config: &Config) -> Router {
    Router::new()
        // User routes
        .route("/users", post(handlers::register_user))
        .route("/users/:id", get(handlers::get_user))
        .route("/users/:id/pro", patch(handlers::upgrade_to_pro))

        // Todo routes, scoped by the `username` header
        .route("/todos", get(handlers::list_todos).post(handlers::create_todo))
        .route("/todos/:id", put(handlers::update_todo).delete(handlers::delete_todo))
        .route("/todos/:id/done", patch(handlers::mark_todo_done))

        .layer(
            ServiceBuilder::new()
                .layer(RequestBodyLimitLayer::new(config.http.max_body_size))
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(todo_service)
}
