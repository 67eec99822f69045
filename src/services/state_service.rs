//! Servicio del catálogo de estados
//!
//! Orquesta el catálogo puro (grafos, generación de códigos) con el
//! repositorio: listados por contexto, alta con código autogenerado,
//! guarda de borrado y transición genérica de entidades con estado.

use crate::core::{lifecycle, state_catalog, RejectionReason};
use crate::dto::state_dto::{CreateStateRequest, TransitionGraphResponse, UpdateStateRequest};
use crate::models::state::{State, StateContext};
use crate::repositories::state_repository::StateRepository;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use std::collections::BTreeMap;
use uuid::Uuid;

pub struct StateService {
    repository: StateRepository,
}

impl StateService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: StateRepository::new(pool),
        }
    }

    pub async fn list_by_context(&self, context: StateContext) -> Result<Vec<State>, AppError> {
        self.repository.find_by_context(context).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<State, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Estado no encontrado".to_string()))
    }

    /// Grafo fijo de transiciones de un contexto, en forma serializable.
    pub fn transition_graph(&self, context: StateContext) -> TransitionGraphResponse {
        let transitions: BTreeMap<String, Vec<String>> = state_catalog::transitions_for(context)
            .iter()
            .map(|(from, targets)| {
                (
                    from.to_string(),
                    targets.iter().map(|t| t.to_string()).collect(),
                )
            })
            .collect();

        TransitionGraphResponse {
            context,
            transitions,
        }
    }

    pub async fn create(&self, request: CreateStateRequest) -> Result<State, AppError> {
        let code = match request.code {
            Some(code) => {
                if self.repository.code_exists(&code).await? {
                    return Err(AppError::Conflict(format!(
                        "El código de estado '{}' ya existe",
                        code
                    )));
                }
                code
            }
            None => {
                let existing = self.repository.codes_for_context(request.context).await?;
                state_catalog::generate_code(request.context, &existing)
            }
        };

        self.repository
            .create(request.context, code, request.name)
            .await
    }

    pub async fn update(&self, id: Uuid, request: UpdateStateRequest) -> Result<State, AppError> {
        self.repository
            .update(id, request.name, request.active)
            .await
    }

    pub async fn deactivate(&self, id: Uuid) -> Result<State, AppError> {
        self.repository.deactivate(id).await
    }

    /// Borrado con guarda: se rehúsa con `StateInUse` mientras exista
    /// cualquier fila que referencie el estado. La comprobación es un
    /// resultado, no una excepción.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let state = self.find_by_id(id).await?;

        let referencing = self.repository.count_referencing_entities(id).await?;
        if referencing > 0 {
            return Err(RejectionReason::StateInUse(state.name).into());
        }

        self.repository.soft_delete(id).await
    }

    /// Transición genérica para entidades con estado propio (vehículos,
    /// salidas de ruta, salidas de tour, facturas): valida contra el grafo
    /// del contexto y resuelve la fila del estado destino.
    pub async fn transition_entity(
        &self,
        context: StateContext,
        current_state_id: Uuid,
        target_name: &str,
    ) -> Result<State, AppError> {
        let current = self
            .repository
            .find_by_id(current_state_id)
            .await?
            .ok_or_else(|| {
                AppError::Internal("La entidad referencia un estado inexistente".to_string())
            })?;

        if current.context != context {
            return Err(AppError::Internal(format!(
                "La entidad referencia un estado del contexto '{}', se esperaba '{}'",
                current.context, context
            )));
        }

        lifecycle::decide_transition(context, &current.name, target_name)?;

        self.repository
            .find_by_name(context, target_name)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "Falta el estado obligatorio '{}' del contexto '{}'",
                    target_name, context
                ))
            })
    }
}
