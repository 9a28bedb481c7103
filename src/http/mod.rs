//! # Módulo HTTP
//!
//! Subconjunto mínimo de HTTP/1.1 implementado a mano:
//!
//! - Parsing de la request line y headers (sin body)
//! - Construcción y escritura de responses
//! - Códigos de estado
//!
//! Una conexión lleva exactamente un request y una response; no hay
//! keep-alive ni chunked encoding.
//!
//! ### Formato de Request
//!
//! ```text
//! GET /index.html HTTP/1.1\r\n
//! Header-Name: Header-Value\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 301 Moved Permanently\r\n
//! Content-Length: 0\r\n
//! Location: /index.html\r\n
//! \r\n
//! ```

pub mod request;
pub mod response;
pub mod status;

pub use request::{ParseError, Request};
pub use response::Response;
pub use status::StatusCode;
