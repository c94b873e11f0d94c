pub mod calendar;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use calvox_core::CalvoxError;

/// Standard failure body: every error leaves the endpoint as
/// `{success: false, feedback}` so the client has one shape to handle.
#[derive(Serialize)]
pub struct FailureBody {
    pub success: bool,
    pub feedback: String,
}

/// Convert calvox errors to HTTP responses.
pub struct AppError(pub CalvoxError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, feedback) = match &self.0 {
            CalvoxError::Auth(_) => (StatusCode::UNAUTHORIZED, self.0.to_string()),
            CalvoxError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            CalvoxError::Extraction(_) => (
                StatusCode::BAD_REQUEST,
                format!("AI failed to understand your request: {}", self.0),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to process calendar request".to_string(),
            ),
        };

        tracing::warn!(error = %self.0, %status, "request failed");

        let body = Json(FailureBody {
            success: false,
            feedback,
        });
        (status, body).into_response()
    }
}

impl From<CalvoxError> for AppError {
    fn from(err: CalvoxError) -> Self {
        AppError(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_map_to_401() {
        let response =
            AppError(CalvoxError::Auth("Missing Authorization header".into())).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn invalid_requests_map_to_400() {
        let response =
            AppError(CalvoxError::InvalidRequest("No text provided".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn provider_errors_map_to_500() {
        let response = AppError(CalvoxError::Provider("rate limited".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
