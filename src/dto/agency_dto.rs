//! DTOs de agencias

use crate::models::agency::Agency;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAgencyRequest {
    #[validate(length(min = 2, max = 150))]
    pub name: String,

    #[validate(email)]
    pub contact_email: Option<String>,

    #[validate(length(min = 5, max = 30))]
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAgencyRequest {
    #[validate(length(min = 2, max = 150))]
    pub name: Option<String>,

    #[validate(email)]
    pub contact_email: Option<String>,

    #[validate(length(min = 5, max = 30))]
    pub phone: Option<String>,

    pub active: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct AgencyResponse {
    pub id: Uuid,
    pub name: String,
    pub contact_email: Option<String>,
    pub phone: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Agency> for AgencyResponse {
    fn from(agency: Agency) -> Self {
        Self {
            id: agency.id,
            name: agency.name,
            contact_email: agency.contact_email,
            phone: agency.phone,
            active: agency.active,
            created_at: agency.created_at,
        }
    }
}
