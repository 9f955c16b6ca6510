use axum::response::IntoResponse;

/// Start page handler
pub async fn welcome_handler() -> impl IntoResponse {
    "Welcome to tally!"
}
