use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing::get};
use http::StatusCode;

use crate::render::FaultResponse;
use crate::store::Store;
use crate::types::{Employee, EmployeeDraft};

/// Employee resource routes
pub fn router() -> Router<Arc<Store>> {
    Router::new()
        .route("/employees", get(list_employees).post(create_employee))
        .route(
            "/employees/{id}",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
}

/// Handle `POST /employees`
async fn create_employee(
    State(store): State<Arc<Store>>,
    Json(draft): Json<EmployeeDraft>,
) -> Result<(StatusCode, Json<Employee>), FaultResponse> {
    let employee = store.insert_employee(draft)?;
    Ok((StatusCode::CREATED, Json(employee)))
}

/// Handle `GET /employees`
async fn list_employees(State(store): State<Arc<Store>>) -> Json<Vec<Employee>> {
    Json(store.list_employees())
}

/// Handle `GET /employees/{id}`
async fn get_employee(State(store): State<Arc<Store>>, Path(id): Path<u64>) -> Response {
    store.get_employee(id).map_or_else(
        || StatusCode::NOT_FOUND.into_response(),
        |employee| Json(employee).into_response(),
    )
}

/// Handle `PUT /employees/{id}`
async fn update_employee(
    State(store): State<Arc<Store>>,
    Path(id): Path<u64>,
    Json(draft): Json<EmployeeDraft>,
) -> Result<Response, FaultResponse> {
    let updated = store.update_employee(id, draft)?;
    Ok(updated.map_or_else(
        || StatusCode::NOT_FOUND.into_response(),
        |employee| Json(employee).into_response(),
    ))
}

/// Handle `DELETE /employees/{id}`
async fn delete_employee(State(store): State<Arc<Store>>, Path(id): Path<u64>) -> StatusCode {
    if store.remove_employee(id).is_some() {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}
