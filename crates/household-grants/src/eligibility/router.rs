use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use super::{EligibilityEngine, EligibilityError, EligibilityFilter};
use crate::household::HouseholdRepository;

/// Raw query string; parsed by hand so malformed values get a descriptive rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EligibilityQuery {
    #[serde(default)]
    pub(crate) household_size: Option<String>,
    #[serde(default)]
    pub(crate) as_of: Option<String>,
}

impl EligibilityQuery {
    fn filter(&self) -> Result<EligibilityFilter, EligibilityError> {
        let household_size = match self.household_size.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                raw.parse::<i64>()
                    .map_err(|_| EligibilityError::InvalidHouseholdSize(raw.to_string()))?,
            ),
        };
        Ok(EligibilityFilter { household_size })
    }

    fn today(&self) -> Result<NaiveDate, EligibilityError> {
        match self.as_of.as_deref().map(str::trim) {
            None | Some("") => Ok(Local::now().date_naive()),
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| EligibilityError::InvalidAsOf(raw.to_string())),
        }
    }
}

/// Router builder exposing the eligibility determination endpoint.
pub fn eligibility_router<R>(engine: Arc<EligibilityEngine<R>>) -> Router
where
    R: HouseholdRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/grants/eligible-households",
            get(eligible_households_handler::<R>),
        )
        .with_state(engine)
}

pub(crate) async fn eligible_households_handler<R>(
    State(engine): State<Arc<EligibilityEngine<R>>>,
    Query(query): Query<EligibilityQuery>,
) -> Response
where
    R: HouseholdRepository + 'static,
{
    let outcome = query
        .filter()
        .and_then(|filter| Ok((filter, query.today()?)))
        .and_then(|(filter, today)| engine.determine(&filter, today));

    match outcome {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => {
            let status = match error {
                EligibilityError::InvalidHouseholdSize(_) | EligibilityError::InvalidAsOf(_) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                EligibilityError::Repository(_) => StatusCode::SERVICE_UNAVAILABLE,
            };
            let payload = json!({
                "error": error.to_string(),
            });
            (status, axum::Json(payload)).into_response()
        }
    }
}
