//! Controladores de la API

pub mod agency_controller;
pub mod auth_controller;
pub mod availability_controller;
pub mod invoice_controller;
pub mod reservation_controller;
pub mod route_run_controller;
pub mod service_controller;
pub mod state_controller;
pub mod tour_run_controller;
pub mod vehicle_controller;
