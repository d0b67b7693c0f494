use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Router,
};
use chrono::Local;
use serde_json::json;

use super::domain::{
    HouseholdId, MarriageRequest, MemberId, NewFamilyMember, NewHousehold, ParentageRequest,
};
use super::repository::{HouseholdRepository, RepositoryError};
use super::service::{HouseholdService, HouseholdServiceError};

/// Router builder exposing household and family-member record endpoints.
pub fn household_router<R>(service: Arc<HouseholdService<R>>) -> Router
where
    R: HouseholdRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/households",
            post(create_household_handler::<R>).get(list_households_handler::<R>),
        )
        .route(
            "/api/v1/households/:household_id",
            get(household_handler::<R>).delete(delete_household_handler::<R>),
        )
        .route("/api/v1/family-members", post(add_member_handler::<R>))
        .route("/api/v1/family-members/marriage", put(marriage_handler::<R>))
        .route("/api/v1/family-members/parents", put(parents_handler::<R>))
        .route(
            "/api/v1/family-members/:member_id/household",
            delete(remove_member_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn create_household_handler<R>(
    State(service): State<Arc<HouseholdService<R>>>,
    axum::Json(request): axum::Json<NewHousehold>,
) -> Response
where
    R: HouseholdRepository + 'static,
{
    match service.create_household(request.housing_type) {
        Ok(household) => (StatusCode::CREATED, axum::Json(household)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_households_handler<R>(
    State(service): State<Arc<HouseholdService<R>>>,
) -> Response
where
    R: HouseholdRepository + 'static,
{
    match service.list_households() {
        Ok(households) => (StatusCode::OK, axum::Json(households)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn household_handler<R>(
    State(service): State<Arc<HouseholdService<R>>>,
    Path(household_id): Path<u64>,
) -> Response
where
    R: HouseholdRepository + 'static,
{
    match service.household(HouseholdId(household_id)) {
        Ok(household) => (StatusCode::OK, axum::Json(household)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_household_handler<R>(
    State(service): State<Arc<HouseholdService<R>>>,
    Path(household_id): Path<u64>,
) -> Response
where
    R: HouseholdRepository + 'static,
{
    match service.delete_household(HouseholdId(household_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn add_member_handler<R>(
    State(service): State<Arc<HouseholdService<R>>>,
    axum::Json(submission): axum::Json<NewFamilyMember>,
) -> Response
where
    R: HouseholdRepository + 'static,
{
    let today = Local::now().date_naive();
    match service.add_member(submission, today) {
        Ok(member) => (StatusCode::CREATED, axum::Json(member)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn marriage_handler<R>(
    State(service): State<Arc<HouseholdService<R>>>,
    axum::Json(request): axum::Json<MarriageRequest>,
) -> Response
where
    R: HouseholdRepository + 'static,
{
    match service.set_couple_as_married(request) {
        Ok((spouse1, spouse2)) => {
            let payload = json!({ "spouses": [spouse1, spouse2] });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn parents_handler<R>(
    State(service): State<Arc<HouseholdService<R>>>,
    axum::Json(request): axum::Json<ParentageRequest>,
) -> Response
where
    R: HouseholdRepository + 'static,
{
    match service.set_parents_for_child(request) {
        Ok(child) => (StatusCode::OK, axum::Json(child)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn remove_member_handler<R>(
    State(service): State<Arc<HouseholdService<R>>>,
    Path(member_id): Path<u64>,
) -> Response
where
    R: HouseholdRepository + 'static,
{
    match service.remove_member_from_household(MemberId(member_id)) {
        Ok(member) => (StatusCode::OK, axum::Json(member)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: HouseholdServiceError) -> Response {
    let status = match &error {
        HouseholdServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        HouseholdServiceError::HouseholdNotFound(_)
        | HouseholdServiceError::MemberNotFound(_)
        | HouseholdServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        HouseholdServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::household::memory::InMemoryHouseholdStore;
    use axum::body::Body;
    use axum::http::{header, Request};
    use serde_json::Value;
    use tower::ServiceExt;

    fn router() -> Router {
        let store = Arc::new(InMemoryHouseholdStore::default());
        household_router(Arc::new(HouseholdService::new(store)))
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_json_body(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn create_household_returns_created_record() {
        let response = router()
            .oneshot(json_request(
                "POST",
                "/api/v1/households",
                json!({ "housingType": "Landed" }),
            ))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::CREATED);
        let payload = read_json_body(response).await;
        assert_eq!(payload["housingType"], json!("Landed"));
        assert_eq!(payload["members"], json!([]));
    }

    #[tokio::test]
    async fn unknown_housing_type_is_unprocessable() {
        let response = router()
            .oneshot(json_request(
                "POST",
                "/api/v1/households",
                json!({ "housingType": "Underground" }),
            ))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn add_member_validates_name_length() {
        let router = router();
        let created = router
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/households",
                json!({ "housingType": "HDB" }),
            ))
            .await
            .expect("route executes");
        let household = read_json_body(created).await;

        let response = router
            .oneshot(json_request(
                "POST",
                "/api/v1/family-members",
                json!({
                    "householdId": household["id"],
                    "name": "",
                    "gender": "Female",
                    "maritalStatus": "Single",
                    "occupationType": "Student",
                    "annualIncome": 0,
                    "birthDate": "2012-05-15",
                }),
            ))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let payload = read_json_body(response).await;
        assert!(payload["error"]
            .as_str()
            .unwrap_or_default()
            .contains("name"));
    }

    #[tokio::test]
    async fn missing_household_is_not_found() {
        let response = router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/households/12")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_then_fetch_reports_not_found() {
        let router = router();
        router
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/households",
                json!({ "housingType": "Condominium" }),
            ))
            .await
            .expect("route executes");

        let deleted = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/v1/households/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .expect("route executes");
        assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

        let listed = router
            .oneshot(
                Request::builder()
                    .uri("/api/v1/households")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .expect("route executes");
        assert_eq!(read_json_body(listed).await, json!([]));
    }
}
