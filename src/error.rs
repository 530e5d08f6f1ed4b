use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::booking::RequiredField;

pub const INCOMPLETE_NOTICE: &str =
    "Preencha nome, telefone, procedimento e horário antes de confirmar.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("{}", INCOMPLETE_NOTICE)]
    Incomplete { missing: Vec<RequiredField> },

    #[error("Barbeiro desconhecido: {0}")]
    UnknownBarber(String),

    #[error("Procedimento desconhecido: {0}")]
    UnknownService(String),
}

impl BookingError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            BookingError::Incomplete { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            BookingError::UnknownBarber(_) | BookingError::UnknownService(_) => {
                StatusCode::NOT_FOUND
            }
        }
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let missing = match &self {
            BookingError::Incomplete { missing } => missing.clone(),
            _ => Vec::new(),
        };

        let body = Json(json!({
            "success": false,
            "message": self.to_string(),
            "missing": missing,
        }));

        (status, body).into_response()
    }
}
