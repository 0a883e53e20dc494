use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;
use tracing::error;

use super::catalog::SchemeSource;
use super::domain::ApplicantProfile;
use super::service::{EligibilityError, EligibilityFilter};

/// Router builder exposing the scheme eligibility endpoint.
pub fn scheme_router<S>(filter: Arc<EligibilityFilter<S>>) -> Router
where
    S: SchemeSource + 'static,
{
    Router::new()
        .route("/api/predict/scheme", post(eligibility_handler::<S>))
        .with_state(filter)
}

pub(crate) async fn eligibility_handler<S>(
    State(filter): State<Arc<EligibilityFilter<S>>>,
    payload: Result<Json<ApplicantProfile>, JsonRejection>,
) -> Response
where
    S: SchemeSource + 'static,
{
    let profile = match payload {
        Ok(Json(profile)) => profile,
        Err(rejection) => {
            let payload = json!({
                "error": rejection.body_text(),
            });
            return (rejection.status(), Json(payload)).into_response();
        }
    };

    let outcome = tokio::task::spawn_blocking(move || filter.filter_eligible(&profile)).await;

    match outcome {
        Ok(Ok(report)) => (StatusCode::OK, Json(report)).into_response(),
        Ok(Err(EligibilityError::InvalidProfile(invalid))) => {
            let payload = json!({
                "error": invalid.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        Ok(Err(err)) => {
            error!(error = %err, "scheme eligibility request failed");
            let payload = json!({
                "error": err.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
        Err(join_error) => {
            error!(error = %join_error, "scheme eligibility task aborted");
            let payload = json!({
                "error": "scheme eligibility task aborted",
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
