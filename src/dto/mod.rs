//! DTOs de la API
//!
//! Requests con validación declarativa y responses serializables.

pub mod agency_dto;
pub mod auth_dto;
pub mod availability_dto;
pub mod common;
pub mod invoice_dto;
pub mod reservation_dto;
pub mod route_run_dto;
pub mod service_dto;
pub mod state_dto;
pub mod tour_run_dto;
pub mod vehicle_dto;
