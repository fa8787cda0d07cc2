//! HTTP request handlers for the Attendance Engine API.
//!
//! This module contains the handler functions for all API endpoints.
//! Every route except registration and login resolves the `x-access-code`
//! header on each request; no session state is kept between requests.
//! Worker routes accept the code of the employee concerned or of an
//! administrator, administrator routes only the latter.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::checked_total;
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, EmployeeId, EventId, Payment, PaymentId};

use super::request::{
    ClockRequest, EmployeeQuery, LedgerQuery, LoginRequest, PaymentRequest, PaymentsQuery,
    RangeQuery, RegisterRequest, UpdateCodeRequest, UpdateEntryRequest, UpdateWageRequest,
};
use super::response::{ApiError, ApiErrorResponse, PaymentsResponse};
use super::state::AppState;

/// Header carrying the caller's access code.
pub const ACCESS_CODE_HEADER: &str = "x-access-code";

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/clock", post(clock_handler))
        .route("/status", get(status_handler))
        .route("/history", get(history_handler))
        .route("/payments", get(payments_handler))
        .route("/admin/entries", get(admin_entries_handler))
        .route("/admin/entries/:id", delete(admin_delete_entry_handler))
        .route("/admin/entries/update", post(admin_update_entry_handler))
        .route("/admin/wage", post(admin_wage_handler))
        .route("/admin/summary", get(admin_summary_handler))
        .route("/admin/weekly", get(admin_weekly_handler))
        .route("/admin/export", get(admin_export_handler))
        .route(
            "/admin/payments",
            get(admin_payments_handler).post(admin_create_payment_handler),
        )
        .route("/admin/payments/:id", delete(admin_delete_payment_handler))
        .route("/admin/code", post(admin_code_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn failure(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    ApiErrorResponse::from(err).into_response()
}

fn respond<T: Serialize>(correlation_id: Uuid, status: StatusCode, result: EngineResult<T>) -> Response {
    match result {
        Ok(body) => json_response(status, &body),
        Err(err) => failure(correlation_id, err),
    }
}

/// Turns a body rejection into a 400 with the serde message.
fn json_rejection(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error).into_response()
}

fn query_rejection(correlation_id: Uuid, rejection: QueryRejection) -> Response {
    let body_text = rejection.body_text();
    warn!(
        correlation_id = %correlation_id,
        error = %body_text,
        "Query string rejected"
    );
    ApiErrorResponse::bad_request(ApiError::validation_error(body_text)).into_response()
}

fn path_rejection(correlation_id: Uuid, rejection: PathRejection) -> Response {
    let body_text = rejection.body_text();
    warn!(
        correlation_id = %correlation_id,
        error = %body_text,
        "Path rejected"
    );
    ApiErrorResponse::bad_request(ApiError::validation_error(body_text)).into_response()
}

fn access_code(headers: &HeaderMap) -> EngineResult<&str> {
    headers
        .get(ACCESS_CODE_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or(EngineError::InvalidCode)
}

/// Resolves the access code header to an administrator.
fn authorize_admin(state: &AppState, headers: &HeaderMap) -> EngineResult<Employee> {
    state.service().require_admin(access_code(headers)?)
}

/// Resolves the access code header to the employee or an administrator.
fn authorize_employee(
    state: &AppState,
    headers: &HeaderMap,
    employee_id: EmployeeId,
) -> EngineResult<Employee> {
    state
        .service()
        .authorize_for(access_code(headers)?, employee_id)
}

fn payments_response(payments: Vec<Payment>) -> EngineResult<PaymentsResponse> {
    let total_paid = checked_total(payments.iter().map(|p| p.amount))?;
    Ok(PaymentsResponse {
        payments,
        total_paid,
    })
}

fn required_employee(query: &RangeQuery) -> EngineResult<EmployeeId> {
    query.employee_id.ok_or_else(|| EngineError::InvalidRequest {
        field: "employee_id".to_string(),
        message: "is required".to_string(),
    })
}

/// Handler for POST /register.
async fn register_handler(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing registration");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    respond(
        correlation_id,
        StatusCode::CREATED,
        state.service().register(&request.name, &request.code),
    )
}

/// Handler for POST /login.
async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing login");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    respond(
        correlation_id,
        StatusCode::OK,
        state.service().login(&request.code),
    )
}

/// Handler for POST /clock.
async fn clock_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ClockRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };
    info!(
        correlation_id = %correlation_id,
        employee_id = request.employee_id,
        kind = %request.kind,
        "Processing clock event"
    );

    let result = authorize_employee(&state, &headers, request.employee_id).and_then(|_| {
        state
            .service()
            .clock(request.employee_id, request.kind, request.photo_ref)
    });
    respond(correlation_id, StatusCode::CREATED, result)
}

/// Handler for GET /status.
async fn status_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<EmployeeQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejection(correlation_id, rejection),
    };

    let result = authorize_employee(&state, &headers, query.employee_id)
        .and_then(|_| state.service().status(query.employee_id));
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for GET /history.
async fn history_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejection(correlation_id, rejection),
    };

    let result = required_employee(&query).and_then(|id| {
        authorize_employee(&state, &headers, id)?;
        state.service().employee_history(id, query.range())
    });
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for GET /payments.
async fn payments_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<PaymentsQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejection(correlation_id, rejection),
    };

    let result = authorize_employee(&state, &headers, query.employee_id)
        .and_then(|_| state.service().list_payments(Some(query.employee_id)))
        .and_then(payments_response);
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for GET /admin/entries.
async fn admin_entries_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejection(correlation_id, rejection),
    };

    let result = authorize_admin(&state, &headers)
        .and_then(|_| state.service().list_events(query.employee_id, query.range()));
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for DELETE /admin/entries/:id.
async fn admin_delete_entry_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    id: Result<Path<EventId>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return path_rejection(correlation_id, rejection),
    };
    info!(correlation_id = %correlation_id, event_id = id, "Deleting clock event");

    let result =
        authorize_admin(&state, &headers).and_then(|_| state.service().delete_event(id));
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for POST /admin/entries/update.
async fn admin_update_entry_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<UpdateEntryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };
    info!(correlation_id = %correlation_id, event_id = request.id, "Correcting clock event");

    let result = authorize_admin(&state, &headers).and_then(|_| {
        state
            .service()
            .update_event_timestamp(request.id, request.timestamp)
    });
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for POST /admin/wage.
async fn admin_wage_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<UpdateWageRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };
    info!(
        correlation_id = %correlation_id,
        employee_id = request.employee_id,
        "Updating wage"
    );

    let result = authorize_admin(&state, &headers).and_then(|_| {
        state
            .service()
            .update_wage(request.employee_id, &request.hourly_wage)
    });
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for GET /admin/summary.
async fn admin_summary_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing summary request");

    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejection(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match authorize_admin(&state, &headers)
        .and_then(|_| state.service().summary(query.employee_id, query.range()))
    {
        Ok(summary) => {
            info!(
                correlation_id = %correlation_id,
                employees = summary.per_employee.len(),
                grand_total_pay = %summary.grand_total_pay,
                duration_us = start_time.elapsed().as_micros(),
                "Summary completed successfully"
            );
            json_response(StatusCode::OK, &summary)
        }
        Err(err) => failure(correlation_id, err),
    }
}

/// Handler for GET /admin/weekly.
async fn admin_weekly_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejection(correlation_id, rejection),
    };

    let result = authorize_admin(&state, &headers)
        .and_then(|_| required_employee(&query))
        .and_then(|id| state.service().weekly_report(id, query.range()));
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for GET /admin/export.
///
/// Returns the raw events as a CSV attachment.
async fn admin_export_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing export request");

    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejection(correlation_id, rejection),
    };

    match authorize_admin(&state, &headers)
        .and_then(|_| state.service().export_csv(query.employee_id, query.range()))
    {
        Ok(csv) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"attendance.csv\"",
                ),
            ],
            csv,
        )
            .into_response(),
        Err(err) => failure(correlation_id, err),
    }
}

/// Handler for GET /admin/payments.
async fn admin_payments_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<LedgerQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejection(correlation_id, rejection),
    };

    let result = authorize_admin(&state, &headers)
        .and_then(|_| state.service().list_payments(query.employee_id))
        .and_then(payments_response);
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for POST /admin/payments.
async fn admin_create_payment_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<PaymentRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };
    info!(
        correlation_id = %correlation_id,
        employee_id = request.employee_id,
        "Recording payment"
    );

    let result = authorize_admin(&state, &headers)
        .and_then(|_| state.service().record_payment(request.into()));
    respond(correlation_id, StatusCode::CREATED, result)
}

/// Handler for DELETE /admin/payments/:id.
async fn admin_delete_payment_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    id: Result<Path<PaymentId>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return path_rejection(correlation_id, rejection),
    };

    let result =
        authorize_admin(&state, &headers).and_then(|_| state.service().delete_payment(id));
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for POST /admin/code.
///
/// Replaces the calling administrator's access code.
async fn admin_code_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<UpdateCodeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Updating access code");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let result = access_code(&headers)
        .and_then(|current| state.service().update_code(current, &request.code));
    respond(correlation_id, StatusCode::OK, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/attendance.yaml").expect("Failed to load config");
        AppState::from_config(&config).expect("Failed to seed state")
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_register_returns_201() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json("/register", r#"{"name": "Mario Rossi", "code": "mario"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );
    }

    #[tokio::test]
    async fn test_register_missing_field_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json("/register", r#"{"name": "Mario Rossi"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json("/login", "{not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_code_returns_401() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json("/login", r#"{"code": "nobody"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_admin_route_without_header_returns_401() {
        let router = create_router(create_test_state());

        let request = Request::builder()
            .uri("/admin/summary")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_admin_route_with_worker_code_returns_403() {
        let state = create_test_state();
        state.service().register("Mario", "mario").unwrap();
        let router = create_router(state);

        let request = Request::builder()
            .uri("/admin/summary")
            .header(ACCESS_CODE_HEADER, "mario")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_status_requires_employee_id() {
        let router = create_router(create_test_state());

        let request = Request::builder()
            .uri("/status")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_clock_without_code_returns_401() {
        let state = create_test_state();
        let worker = state.service().register("Mario", "mario").unwrap();
        let router = create_router(state);

        let body = format!(r#"{{"employee_id": {}, "kind": "IN"}}"#, worker.id);
        let response = router.oneshot(post_json("/clock", &body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_payments_without_employee_returns_400() {
        let router = create_router(create_test_state());

        let request = Request::builder()
            .uri("/payments")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_with_bad_id_returns_400() {
        let router = create_router(create_test_state());

        let request = Request::builder()
            .method("DELETE")
            .uri("/admin/entries/abc")
            .header(ACCESS_CODE_HEADER, "admin")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_export_returns_csv() {
        let router = create_router(create_test_state());

        let request = Request::builder()
            .uri("/admin/export")
            .header(ACCESS_CODE_HEADER, "admin")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/csv; charset=utf-8"
        );
    }
}
