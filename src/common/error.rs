use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro central, com `thiserror` para melhor ergonomia.
// Cada variante vira um par (status HTTP, código estável) em IntoResponse,
// para que os clientes não precisem interpretar texto livre.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Prédio não encontrado")]
    BuildingNotFound,

    #[error("Andar não encontrado")]
    FloorNotFound,

    #[error("Quarto não encontrado")]
    RoomNotFound,

    #[error("Inquilino não encontrado")]
    TenantNotFound,

    #[error("Funcionário não encontrado")]
    StaffNotFound,

    #[error("Fatura não encontrada")]
    BillNotFound,

    #[error("Leitura de consumo não encontrada")]
    UsageNotFound,

    #[error("Despesa não encontrada")]
    ExpenseNotFound,

    #[error("Chamado não encontrado")]
    TicketNotFound,

    #[error("Agenda não encontrada")]
    ScheduleNotFound,

    #[error("Horário não encontrado")]
    SlotNotFound,

    #[error("Encomenda não encontrada")]
    ParcelNotFound,

    #[error("Aviso não encontrado")]
    AnnouncementNotFound,

    #[error("Já existe um prédio com esse nome")]
    DuplicateBuildingName,

    #[error("Número de quarto duplicado")]
    DuplicateRoomNumber,

    #[error("Quarto já está ocupado")]
    RoomAlreadyOccupied,

    #[error("Quarto possui registros vinculados e não pode ser excluído")]
    RoomInUse,

    #[error("Esse identificador do LINE já está em uso")]
    LineUserIdAlreadyExists,

    #[error("Quarto não está ocupado")]
    RoomNotOccupied,

    #[error("Já existe fatura para esse quarto nesse mês")]
    BillAlreadyExists,

    #[error("Já existe leitura para esse quarto nesse mês")]
    UsageAlreadyExists,

    #[error("Horário já reservado")]
    SlotAlreadyBooked,

    #[error("Mês de cobrança inválido: {0}")]
    InvalidBillingMonth(String),

    #[error("Leitura atual menor que a anterior")]
    NegativeMeterDelta,

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Validação retorna todos os detalhes por campo.
        if let AppError::ValidationError(errors) = &self {
            let mut details = std::collections::HashMap::new();
            for (field, field_errors) in errors.field_errors() {
                let messages: Vec<String> = field_errors
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .collect();
                details.insert(field.to_string(), messages);
            }
            let body = Json(json!({
                "error": "Um ou mais campos são inválidos.",
                "code": "VALIDATION",
                "details": details,
            }));
            return (StatusCode::BAD_REQUEST, body).into_response();
        }

        let (status, code) = match &self {
            AppError::ValidationError(_) => (StatusCode::BAD_REQUEST, "VALIDATION"),
            AppError::EmailAlreadyExists => (StatusCode::CONFLICT, "EMAIL_ALREADY_EXISTS"),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "INVALID_TOKEN"),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "USER_NOT_FOUND"),
            AppError::BuildingNotFound => (StatusCode::NOT_FOUND, "BUILDING_NOT_FOUND"),
            AppError::FloorNotFound => (StatusCode::NOT_FOUND, "FLOOR_NOT_FOUND"),
            AppError::RoomNotFound => (StatusCode::NOT_FOUND, "ROOM_NOT_FOUND"),
            AppError::TenantNotFound => (StatusCode::NOT_FOUND, "TENANT_NOT_FOUND"),
            AppError::StaffNotFound => (StatusCode::NOT_FOUND, "STAFF_NOT_FOUND"),
            AppError::BillNotFound => (StatusCode::NOT_FOUND, "BILL_NOT_FOUND"),
            AppError::UsageNotFound => (StatusCode::NOT_FOUND, "USAGE_NOT_FOUND"),
            AppError::ExpenseNotFound => (StatusCode::NOT_FOUND, "EXPENSE_NOT_FOUND"),
            AppError::TicketNotFound => (StatusCode::NOT_FOUND, "TICKET_NOT_FOUND"),
            AppError::ScheduleNotFound => (StatusCode::NOT_FOUND, "SCHEDULE_NOT_FOUND"),
            AppError::SlotNotFound => (StatusCode::NOT_FOUND, "SLOT_NOT_FOUND"),
            AppError::ParcelNotFound => (StatusCode::NOT_FOUND, "PARCEL_NOT_FOUND"),
            AppError::AnnouncementNotFound => (StatusCode::NOT_FOUND, "ANNOUNCEMENT_NOT_FOUND"),
            AppError::DuplicateBuildingName => (StatusCode::CONFLICT, "DUPLICATE_BUILDING_NAME"),
            AppError::DuplicateRoomNumber => (StatusCode::CONFLICT, "DUPLICATE_ROOM_NUMBER"),
            AppError::RoomAlreadyOccupied => (StatusCode::CONFLICT, "ROOM_ALREADY_OCCUPIED"),
            AppError::RoomInUse => (StatusCode::CONFLICT, "ROOM_IN_USE"),
            AppError::LineUserIdAlreadyExists => {
                (StatusCode::CONFLICT, "LINE_USER_ID_ALREADY_EXISTS")
            }
            AppError::RoomNotOccupied => (StatusCode::CONFLICT, "ROOM_NOT_OCCUPIED"),
            AppError::BillAlreadyExists => (StatusCode::CONFLICT, "BILL_ALREADY_EXISTS"),
            AppError::UsageAlreadyExists => (StatusCode::CONFLICT, "USAGE_ALREADY_EXISTS"),
            AppError::SlotAlreadyBooked => (StatusCode::CONFLICT, "SLOT_ALREADY_BOOKED"),
            AppError::InvalidBillingMonth(_) => (StatusCode::BAD_REQUEST, "INVALID_BILLING_MONTH"),
            AppError::NegativeMeterDelta => (StatusCode::BAD_REQUEST, "NEGATIVE_METER_DELTA"),

            // Todos os outros erros (DatabaseError, InternalServerError, ...) viram 500.
            // O `tracing` loga a mensagem detalhada que `thiserror` nos deu.
            e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                let body = Json(json!({
                    "error": "Ocorreu um erro inesperado.",
                    "code": "INTERNAL",
                }));
                return (StatusCode::INTERNAL_SERVER_ERROR, body).into_response();
            }
        };

        let body = Json(json!({ "error": self.to_string(), "code": code }));
        (status, body).into_response()
    }
}
