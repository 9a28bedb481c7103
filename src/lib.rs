//! # File Server
//! src/lib.rs
//!
//! Servidor HTTP/1.1 mínimo de archivos estáticos: una conexión, un
//! request, una response (archivo, redirección o 404).
//!
//! ## Arquitectura
//!
//! - `http`: parsing del request y serialización de la response
//! - `resolver`: tabla de redirecciones y búsqueda en el document root
//! - `server`: loop de accept y manejo de cada conexión
//! - `config`: argumentos CLI / variables de entorno
//! - `logging`: subscriber de `tracing`
//! - `error`: taxonomía de errores por conexión
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use file_server::config::Config;
//! use file_server::server::Server;
//!
//! let mut server = Server::new(Config::default()).expect("configuración inválida");
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod resolver;
pub mod server;

pub use error::{Result, ServerError};
