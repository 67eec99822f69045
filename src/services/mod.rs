//! Servicios de negocio
//!
//! Orquestan repositorios y núcleo: leen snapshots, piden la decisión y
//! persisten solo decisiones favorables.

pub mod auth_service;
pub mod availability_service;
pub mod capacity_service;
pub mod invoice_service;
pub mod reservation_service;
pub mod state_service;
