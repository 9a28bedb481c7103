//! # Construcción de Respuestas HTTP
//!
//! Serializa el resultado de resolver un request en una respuesta
//! HTTP/1.1 completa y la escribe en el stream de la conexión.
//!
//! | Resultado | Status line | Header | Body |
//! |---|---|---|---|
//! | `Redirect(dest)` | `301 Moved Permanently` | `Location: dest` | vacío |
//! | `NotFound` | `404 Not Found` | `Content-Type: text/html` | [`NOT_FOUND_PAGE`] |
//! | `Serve` | `200 OK` | `Content-Type: ...` | bytes del archivo |
//!
//! Toda respuesta termina los headers con `\r\n\r\n`, incluso sin body.
//!
//! ## Ejemplo de uso
//!
//! ```
//! use file_server::http::{Response, StatusCode};
//!
//! let response = Response::new(StatusCode::MovedPermanently)
//!     .with_header("Location", "/index.html");
//!
//! let bytes = response.to_bytes();
//! assert!(bytes.ends_with(b"\r\n\r\n"));
//! ```

use std::io::{self, Write};

use super::StatusCode;
use crate::resolver::ResolutionOutcome;

/// Página fija del 404. Sus bytes exactos son parte del contrato observable.
pub const NOT_FOUND_PAGE: &str = "<!DOCTYPE html>\n\
<html>\n\
\n\
<head>\n    <title>Maurice Harris - Network Project 1</title>\n</head>\n\
\n\
<body><h1>\n404 Error: Page Not Found\n</h1></body>\n\
\n\
</html>";

/// Página del 400 (solo con `--reject-malformed`)
pub const BAD_REQUEST_PAGE: &str = "<!DOCTYPE html>\n\
<html>\n\
<head><title>400 Bad Request</title></head>\n\
<body><h1>400 Error: Bad Request</h1></body>\n\
</html>";

/// Valor del header `Server`
pub const SERVER_NAME: &str = "file_server";

/// Representa una respuesta HTTP/1.1 completa
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,

    /// Headers en orden de inserción
    headers: Vec<(String, String)>,

    body: Vec<u8>,
}

impl Response {
    /// Crea una respuesta sin body, con `Content-Length: 0`
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
        .with_header("Content-Length", "0")
    }

    /// Agrega un header. Si ya existe uno con el mismo nombre, se sobrescribe.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.add_header(name, value);
        self
    }

    /// Versión mutable de [`Response::with_header`]
    pub fn add_header(&mut self, name: &str, value: &str) {
        match self.headers.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
    }

    /// Establece el body y actualiza `Content-Length`
    pub fn with_body_bytes(mut self, body: Vec<u8>) -> Self {
        let len = body.len().to_string();
        self.body = body;
        self.with_header("Content-Length", &len)
    }

    /// 301 hacia `destination`, sin body
    pub fn redirect(destination: &str) -> Self {
        Self::new(StatusCode::MovedPermanently).with_header("Location", destination)
    }

    /// 404 con la página fija
    pub fn not_found() -> Self {
        Self::new(StatusCode::NotFound)
            .with_header("Content-Type", "text/html; charset=utf-8")
            .with_body_bytes(NOT_FOUND_PAGE.as_bytes().to_vec())
    }

    /// 400 con una página fija
    pub fn bad_request() -> Self {
        Self::new(StatusCode::BadRequest)
            .with_header("Content-Type", "text/html; charset=utf-8")
            .with_body_bytes(BAD_REQUEST_PAGE.as_bytes().to_vec())
    }

    /// 200 con el contenido del archivo
    pub fn file(content_type: &str, bytes: Vec<u8>) -> Self {
        Self::new(StatusCode::Ok)
            .with_header("Content-Type", content_type)
            .with_body_bytes(bytes)
    }

    /// Convierte el resultado de la resolución en su respuesta
    pub fn from_outcome(outcome: ResolutionOutcome) -> Self {
        let response = match outcome {
            ResolutionOutcome::Redirect(destination) => Self::redirect(&destination),
            ResolutionOutcome::NotFound => Self::not_found(),
            ResolutionOutcome::Serve {
                content_type,
                bytes,
                ..
            } => Self::file(&content_type, bytes),
        };
        response.with_common_headers()
    }

    /// Headers que llevan todas las respuestas del servidor
    pub fn with_common_headers(self) -> Self {
        self.with_header("Server", SERVER_NAME)
            .with_header("Connection", "close")
    }

    /// Serializa la respuesta:
    /// - Status line: `HTTP/1.1 200 OK\r\n`
    /// - Headers: `Name: Value\r\n`
    /// - Línea vacía: `\r\n`
    /// - Body
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(128 + self.body.len());

        result.extend_from_slice(format!("HTTP/1.1 {}\r\n", self.status).as_bytes());
        for (name, value) in &self.headers {
            result.extend_from_slice(format!("{}: {}\r\n", name, value).as_bytes());
        }
        result.extend_from_slice(b"\r\n");
        result.extend_from_slice(&self.body);

        result
    }

    /// Escribe la respuesta completa y hace flush
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.to_bytes())?;
        writer.flush()
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Busca un header por nombre exacto
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
