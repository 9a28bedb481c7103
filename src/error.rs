//! # Errores del Servidor
//! src/error.rs
//!
//! Taxonomía de fallas por conexión. Ninguna sale del handler de la
//! conexión: todas terminan en un log y el cierre del socket.

use std::io;

use thiserror::Error;

use crate::http::request::ParseError;

#[derive(Debug, Error)]
pub enum ServerError {
    /// El cliente cerró antes de mandar datos. Se ignora sin responder.
    #[error("client closed the connection without sending a request")]
    EmptyRequest,

    /// Request line o header fuera de la gramática mínima
    #[error("malformed request: {0}")]
    MalformedRequest(#[source] ParseError),

    /// Error de stream o de archivo después de entender el request
    #[error("I/O failure: {0}")]
    Io(#[from] io::Error),

    /// Configuración inválida al arrancar
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ServerError>;

impl From<ParseError> for ServerError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::EmptyRequest => ServerError::EmptyRequest,
            ParseError::Io(e) => ServerError::Io(e),
            other => ServerError::MalformedRequest(other),
        }
    }
}
