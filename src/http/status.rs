//! # Códigos de Estado HTTP
//!
//! Códigos que emite el servidor de archivos:
//!
//! - **2xx**: Éxito (200 OK, archivo servido)
//! - **3xx**: Redirección (301, tabla de redirecciones)
//! - **4xx**: Error del cliente (400 opcional, 404)
//!
//! Una falla de I/O cierra la conexión sin respuesta (no hay 5xx).

/// Códigos de estado que puede emitir el servidor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK - Se sirve el archivo solicitado
    Ok = 200,

    /// 301 Moved Permanently - El path está en la tabla de redirecciones
    MovedPermanently = 301,

    /// 400 Bad Request - Request malformado (solo con `--reject-malformed`)
    BadRequest = 400,

    /// 404 Not Found - No hay redirección ni archivo regular
    NotFound = 404,
}

impl StatusCode {
    /// Convierte el código a su valor numérico
    ///
    /// # Ejemplo
    /// ```
    /// use file_server::http::StatusCode;
    /// assert_eq!(StatusCode::MovedPermanently.as_u16(), 301);
    /// ```
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Retorna el reason phrase del código (RFC 9110)
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::MovedPermanently => "Moved Permanently",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
        }
    }
}

impl std::fmt::Display for StatusCode {
    /// Formato: "301 Moved Permanently"
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}
