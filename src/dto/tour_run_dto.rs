//! DTOs de salidas de tour

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTourRunRequest {
    pub service_id: Uuid,

    #[validate(length(min = 2, max = 150))]
    pub guide_name: Option<String>,

    pub departs_on: NaiveDate,
    pub departs_at: NaiveTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTourRunRequest {
    #[validate(length(min = 2, max = 150))]
    pub guide_name: Option<String>,

    pub departs_on: Option<NaiveDate>,
    pub departs_at: Option<NaiveTime>,
}

#[derive(Debug, Serialize)]
pub struct TourRunResponse {
    pub id: Uuid,
    pub service_id: Uuid,
    pub guide_name: Option<String>,
    pub departs_on: NaiveDate,
    pub departs_at: NaiveTime,
    pub state: String,
    pub created_at: DateTime<Utc>,
}
