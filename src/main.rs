use anyhow::Result;
use axum::{middleware as axum_middleware, response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tracing::{error, info};

use agency_backoffice::config::environment::EnvironmentConfig;
use agency_backoffice::database;
use agency_backoffice::middleware::auth::auth_middleware;
use agency_backoffice::middleware::cors::cors_middleware;
use agency_backoffice::routes;
use agency_backoffice::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("Back Office de Agencia de Viajes");
    info!("================================");

    // Inicializar base de datos
    let pool = match database::create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let config = EnvironmentConfig::from_env();
    let app_state = AppState::new(pool, config.clone());

    // Rutas protegidas por JWT; el usuario autenticado es el actor de cada
    // operación de ciclo de vida.
    let protected = Router::new()
        .nest("/api/state", routes::state_routes::create_state_router())
        .nest("/api/agency", routes::agency_routes::create_agency_router())
        .nest("/api/service", routes::service_routes::create_service_router())
        .nest("/api/vehicle", routes::vehicle_routes::create_vehicle_router())
        .nest("/api/route-run", routes::route_run_routes::create_route_run_router())
        .nest("/api/tour-run", routes::tour_run_routes::create_tour_run_router())
        .nest("/api/reservation", routes::reservation_routes::create_reservation_router())
        .nest("/api/availability", routes::availability_routes::create_availability_router())
        .nest("/api/invoice", routes::invoice_routes::create_invoice_router())
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    let app = Router::new()
        .route("/health", get(health_check))
        .nest("/api/auth", routes::auth_routes::create_auth_router())
        .merge(protected)
        .layer(cors_middleware())
        .with_state(app_state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("Servidor iniciando en http://{}", addr);
    info!("Endpoints disponibles:");
    info!("   GET  /health - Estado del servicio");
    info!("   POST /api/auth/login - Login de usuario");
    info!("   GET  /api/state/context/:context - Estados por contexto");
    info!("   GET  /api/availability - Búsqueda de disponibilidad");
    info!("   POST /api/reservation - Alta de reserva");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "service": "agency-backoffice",
        "status": "healthy"
    }))
}
