use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use tally_core::Fault;
use tally_faults::{FaultReport, translate};

/// Render a fault escaping a handler as the client-facing error response.
///
/// This is the interceptor composed at the edge of the pipeline: field
/// mappings become a JSON object, plain messages a JSON string, and the
/// empty report a bodyless response. Returns `None` for fault kinds the
/// translation layer does not handle.
pub fn fault_response(fault: &Fault) -> Option<Response> {
    let translation = translate(fault)?;
    let status = translation.status.as_status_code();
    let response = match translation.report {
        FaultReport::Fields(fields) => (status, Json(fields)).into_response(),
        FaultReport::Message(message) => (status, Json(message)).into_response(),
        FaultReport::Empty => status.into_response(),
    };
    Some(response)
}

/// Wrapper that lets handlers propagate faults with `?`
#[derive(Debug)]
pub struct FaultResponse(pub Fault);

impl From<Fault> for FaultResponse {
    fn from(fault: Fault) -> Self {
        Self(fault)
    }
}

impl IntoResponse for FaultResponse {
    fn into_response(self) -> Response {
        fault_response(&self.0).unwrap_or_else(|| {
            // Generic fallback for faults outside the recognized taxonomy
            tracing::error!(fault = %self.0, "fault outside the recognized taxonomy");
            (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
        })
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use serde_json::{Value, json};
    use tally_core::{ConstraintViolation, FaultKind};

    use super::*;

    async fn body_of(response: Response) -> Vec<u8> {
        to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
    }

    #[tokio::test]
    async fn field_mappings_render_as_a_json_object() {
        let violations = vec![ConstraintViolation::new(
            "Employee",
            "email",
            "must be unique",
            json!("a@b.c"),
        )];
        let fault = Fault::new(FaultKind::ConstraintViolation(violations), "validation failed");

        let response = fault_response(&fault).unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(&body_of(response).await).unwrap();
        assert_eq!(body["email"]["entity"], "Employee");
        assert_eq!(body["email"]["message"], "must be unique");
    }

    #[tokio::test]
    async fn messages_render_as_a_json_string() {
        let fault = Fault::new(FaultKind::PersistenceConstraint, "x")
            .caused_by(Fault::new(FaultKind::Other, "duplicate key"));

        let response = fault_response(&fault).unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body: Value = serde_json::from_slice(&body_of(response).await).unwrap();
        assert_eq!(body, json!("duplicate key"));
    }

    #[tokio::test]
    async fn the_empty_report_renders_with_no_body() {
        let fault = Fault::new(FaultKind::TransactionBoundary, "could not commit")
            .caused_by(Fault::new(FaultKind::Other, "rollback").caused_by(Fault::new(FaultKind::Other, "io error")));

        let response = fault_response(&fault).unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_of(response).await.is_empty());
    }

    #[tokio::test]
    async fn unrecognized_faults_fall_through_to_the_generic_fallback() {
        let fault = Fault::new(FaultKind::Other, "broken pipe");

        assert!(fault_response(&fault).is_none());

        let response = FaultResponse(fault).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
