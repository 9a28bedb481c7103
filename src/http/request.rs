//! # Parsing de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Parser mínimo que lee directamente del stream de la conexión.
//!
//! ## Formato
//!
//! ```text
//! GET /index.html HTTP/1.1\r\n
//! Host: localhost:6789\r\n
//! User-Agent: curl/8.5.0\r\n
//! \r\n
//! ```
//!
//! 1. **Request Line**: exactamente tres tokens separados por un espacio
//! 2. **Headers**: `Name: Value`, se corta en el primer `:`
//! 3. **Línea vacía**: fin de headers
//!
//! El body nunca se lee: al terminar, el stream queda posicionado justo
//! después de la línea vacía.

use std::collections::HashMap;
use std::io::{self, BufRead, Read};

use thiserror::Error;

/// Longitud máxima de una línea (request line o header), sin el terminador
pub const MAX_LINE_LEN: usize = 8 * 1024;

/// Cantidad máxima de líneas de header por request
pub const MAX_HEADERS: usize = 100;

/// Request HTTP parseado. Inmutable una vez construido.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Método tal cual llegó (ej: "GET"). No se valida.
    method: String,

    /// Target sin decodificar (ej: "/index.html")
    target: String,

    /// Versión del protocolo (ej: "HTTP/1.1")
    version: String,

    /// Headers con el nombre tal cual llegó. Duplicados: gana el último.
    headers: HashMap<String, String>,
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Error)]
pub enum ParseError {
    /// El cliente cerró la conexión sin mandar nada
    #[error("Empty request")]
    EmptyRequest,

    #[error("Invalid request line: {0:?}")]
    InvalidRequestLine(String),

    /// Header sin `:`
    #[error("Invalid header: {0:?}")]
    InvalidHeader(String),

    /// EOF antes de la línea vacía que cierra los headers
    #[error("Connection closed before end of headers")]
    TruncatedHeaders,

    #[error("Line longer than {0} bytes")]
    LineTooLong(usize),

    #[error("More than {0} header lines")]
    TooManyHeaders(usize),

    #[error("Request line or header is not valid UTF-8")]
    InvalidEncoding,

    /// Error de transporte mientras se leía el request
    #[error("I/O error while reading request: {0}")]
    Io(#[from] io::Error),
}

impl Request {
    /// Lee y parsea un request desde un stream con buffer
    ///
    /// Consume bytes hasta la línea vacía inclusive y nada más.
    ///
    /// # Errores
    ///
    /// * `ParseError::EmptyRequest` - el stream terminó antes de cualquier dato
    /// * `ParseError::Io` - falló la lectura del stream
    /// * cualquier otra variante - request malformado
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use file_server::http::Request;
    ///
    /// let mut raw: &[u8] = b"GET /index.html HTTP/1.1\r\nHost: localhost\r\n\r\n";
    /// let request = Request::read_from(&mut raw).unwrap();
    ///
    /// assert_eq!(request.target(), "/index.html");
    /// assert_eq!(request.header("Host"), Some("localhost"));
    /// ```
    pub fn read_from<R: BufRead>(reader: &mut R) -> Result<Self, ParseError> {
        // 1. Request line
        let request_line = match read_line(reader)? {
            Some(line) => line,
            None => return Err(ParseError::EmptyRequest),
        };
        let (method, target, version) = Self::parse_request_line(&request_line)?;

        // 2. Headers hasta la línea vacía
        let mut headers = HashMap::new();
        // Se cuentan líneas, no nombres distintos: los duplicados también suman
        let mut lines = 0usize;
        loop {
            let line = read_line(reader)?.ok_or(ParseError::TruncatedHeaders)?;
            if line.is_empty() {
                break;
            }
            lines += 1;
            if lines > MAX_HEADERS {
                return Err(ParseError::TooManyHeaders(MAX_HEADERS));
            }
            let (name, value) = Self::parse_header(&line)?;
            headers.insert(name, value);
        }

        Ok(Request {
            method,
            target,
            version,
            headers,
        })
    }

    /// Parsea un request completo que ya está en memoria
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        let mut reader = buffer;
        Self::read_from(&mut reader)
    }

    /// Formato: `METHOD TARGET VERSION`, separados por un único espacio
    fn parse_request_line(line: &str) -> Result<(String, String, String), ParseError> {
        let parts: Vec<&str> = line.split(' ').collect();

        match parts.as_slice() {
            [method, target, version]
                if !method.is_empty() && !target.is_empty() && !version.is_empty() =>
            {
                Ok((method.to_string(), target.to_string(), version.to_string()))
            }
            _ => Err(ParseError::InvalidRequestLine(line.to_string())),
        }
    }

    /// Corta en el primer `:` y quita solo un espacio inicial del valor
    fn parse_header(line: &str) -> Result<(String, String), ParseError> {
        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| ParseError::InvalidHeader(line.to_string()))?;
        let value = value.strip_prefix(' ').unwrap_or(value);

        Ok((name.to_string(), value.to_string()))
    }

    // === Acceso a los campos ===

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Busca un header por nombre exacto (sensible a mayúsculas)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|s| s.as_str())
    }
}

/// Lee una línea terminada en `\n` (o `\r\n`) sin el terminador.
///
/// Retorna `None` si el stream ya estaba en EOF.
fn read_line<R: BufRead>(reader: &mut R) -> Result<Option<String>, ParseError> {
    // +2 para que entre el terminador \r\n de una línea de largo máximo
    let limit = (MAX_LINE_LEN + 2) as u64;
    let mut buf = Vec::new();
    let read = (&mut *reader).take(limit).read_until(b'\n', &mut buf)?;

    if read == 0 {
        return Ok(None);
    }

    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    } else if read as u64 == limit {
        return Err(ParseError::LineTooLong(MAX_LINE_LEN));
    }

    if buf.len() > MAX_LINE_LEN {
        return Err(ParseError::LineTooLong(MAX_LINE_LEN));
    }

    String::from_utf8(buf)
        .map(Some)
        .map_err(|_| ParseError::InvalidEncoding)
}
