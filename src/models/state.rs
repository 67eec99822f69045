//! Modelo de State (catálogo de estados)
//!
//! Cada estado pertenece a un contexto (vehículo, reserva, salida de ruta,
//! salida de tour, factura) y tiene un código único autogenerado.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Contexto de entidad al que aplica un estado - mapea al ENUM state_context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type)]
#[sqlx(type_name = "state_context", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StateContext {
    Vehicle,
    Reservation,
    RouteRun,
    TourRun,
    Invoice,
}

impl StateContext {
    pub fn as_str(&self) -> &'static str {
        match self {
            StateContext::Vehicle => "vehicle",
            StateContext::Reservation => "reservation",
            StateContext::RouteRun => "route_run",
            StateContext::TourRun => "tour_run",
            StateContext::Invoice => "invoice",
        }
    }

    /// Prefijo del código autogenerado para cada contexto
    pub fn code_prefix(&self) -> &'static str {
        match self {
            StateContext::Vehicle => "VEH",
            StateContext::Reservation => "RES",
            StateContext::RouteRun => "ROU",
            StateContext::TourRun => "TOU",
            StateContext::Invoice => "INV",
        }
    }

    pub fn all() -> [StateContext; 5] {
        [
            StateContext::Vehicle,
            StateContext::Reservation,
            StateContext::RouteRun,
            StateContext::TourRun,
            StateContext::Invoice,
        ]
    }
}

impl fmt::Display for StateContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StateContext {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vehicle" => Ok(StateContext::Vehicle),
            "reservation" => Ok(StateContext::Reservation),
            "route_run" => Ok(StateContext::RouteRun),
            "tour_run" => Ok(StateContext::TourRun),
            "invoice" => Ok(StateContext::Invoice),
            other => Err(format!("unknown state context '{}'", other)),
        }
    }
}

/// State principal - mapea exactamente a la tabla states
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct State {
    pub id: Uuid,
    pub context: StateContext,
    pub code: String,
    pub name: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}
