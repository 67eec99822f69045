//! Repositorios de acceso a datos
//!
//! Cada repositorio filtra el borrado suave en SQL: las capas superiores
//! solo ven filas activas.

pub mod agency_repository;
pub mod invoice_repository;
pub mod reservation_repository;
pub mod route_run_repository;
pub mod service_repository;
pub mod state_repository;
pub mod tour_run_repository;
pub mod user_repository;
pub mod vehicle_repository;
