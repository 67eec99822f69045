//! Routers de la API

pub mod agency_routes;
pub mod auth_routes;
pub mod availability_routes;
pub mod invoice_routes;
pub mod reservation_routes;
pub mod route_run_routes;
pub mod service_routes;
pub mod state_routes;
pub mod tour_run_routes;
pub mod vehicle_routes;
