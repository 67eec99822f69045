use crate::dto::common::ApiResponse;
use crate::dto::invoice_dto::{CreateInvoiceRequest, InvoiceResponse};
use crate::dto::vehicle_dto::TransitionRequest;
use crate::models::state::StateContext;
use crate::repositories::invoice_repository::InvoiceRepository;
use crate::services::invoice_service::InvoiceService;
use crate::services::state_service::StateService;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct InvoiceController {
    pool: PgPool,
    service: InvoiceService,
    state_service: StateService,
}

impl InvoiceController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            service: InvoiceService::new(pool.clone()),
            state_service: StateService::new(pool.clone()),
            pool,
        }
    }

    /// Emite una factura sobre una reserva elegible (estado "Confirmed").
    pub async fn create(
        &self,
        request: CreateInvoiceRequest,
        actor: Uuid,
    ) -> Result<ApiResponse<InvoiceResponse>, AppError> {
        request.validate()?;

        let invoice = self
            .service
            .create_from_reservation(request.reservation_id, actor)
            .await?;
        Ok(ApiResponse::success_with_message(
            invoice.into(),
            "Factura emitida exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<InvoiceResponse, AppError> {
        let invoice = self.service.find_by_id(id).await?;
        Ok(invoice.into())
    }

    pub async fn list(&self) -> Result<Vec<InvoiceResponse>, AppError> {
        let invoices = self.service.list().await?;
        Ok(invoices.into_iter().map(InvoiceResponse::from).collect())
    }

    /// Cambio de estado validado contra el grafo del contexto `invoice`.
    pub async fn transition(
        &self,
        id: Uuid,
        request: TransitionRequest,
    ) -> Result<ApiResponse<InvoiceResponse>, AppError> {
        request.validate()?;

        let invoice = self.service.find_by_id(id).await?;

        let target = self
            .state_service
            .transition_entity(StateContext::Invoice, invoice.state_id, &request.target_state)
            .await?;

        let invoice = InvoiceRepository::new(self.pool.clone())
            .update_state(id, target.id)
            .await?;
        Ok(ApiResponse::success_with_message(
            invoice.into(),
            "Estado de la factura actualizado".to_string(),
        ))
    }
}
