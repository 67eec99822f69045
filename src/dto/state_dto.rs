//! DTOs del catálogo de estados

use crate::models::state::{State, StateContext};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateStateRequest {
    pub context: StateContext,

    #[validate(length(min = 2, max = 100))]
    pub name: String,

    /// Código explícito; si falta se autogenera con el prefijo del contexto.
    #[validate(length(min = 4, max = 20))]
    pub code: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStateRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,

    pub active: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct StateResponse {
    pub id: Uuid,
    pub context: StateContext,
    pub code: String,
    pub name: String,
    pub active: bool,
}

impl From<State> for StateResponse {
    fn from(state: State) -> Self {
        Self {
            id: state.id,
            context: state.context,
            code: state.code,
            name: state.name,
            active: state.active,
        }
    }
}

/// Grafo de transiciones de un contexto, serializado como
/// estado -> destinos permitidos.
#[derive(Debug, Serialize)]
pub struct TransitionGraphResponse {
    pub context: StateContext,
    pub transitions: BTreeMap<String, Vec<String>>,
}
