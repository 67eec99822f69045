//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL con las convenciones estándar.

pub mod agency;
pub mod invoice;
pub mod reservation;
pub mod route_run;
pub mod service;
pub mod state;
pub mod tour_run;
pub mod user;
pub mod vehicle;
