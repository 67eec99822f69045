//! Núcleo de reservas: capacidad, exclusividad y transiciones de estado
//!
//! Todas las decisiones de este módulo son funciones puras sobre datos ya
//! leídos. La capa de servicios se encarga de leer los snapshots dentro de
//! una transacción y de persistir el resultado; aquí no se toca la base de
//! datos ni se lanza ningún error: cada operación devuelve un resultado
//! etiquetado.

pub mod availability;
pub mod capacity;
pub mod exclusivity;
pub mod lifecycle;
pub mod state_catalog;

use crate::models::state::StateContext;
use thiserror::Error;

/// Motivos de rechazo del núcleo. Recuperables: se devuelven, nunca se
/// lanzan, y el mensaje es lo bastante concreto para mostrarse tal cual.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    #[error("{0}")]
    ConstraintViolation(String),

    #[error("insufficient capacity, {remaining} seats available")]
    CapacityExceeded { remaining: i32 },

    #[error("illegal transition from '{from}' to '{to}' for context {context}")]
    IllegalTransition {
        context: StateContext,
        from: String,
        to: String,
    },

    #[error("{0} not found")]
    ReferenceNotFound(String),

    #[error("state '{0}' is still referenced and cannot be deleted")]
    StateInUse(String),
}
