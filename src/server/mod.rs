//! # Módulo del Servidor
//! src/server/mod.rs
//!
//! 1. `tcp`: escucha en un puerto y acepta conexiones (un thread por cada una)
//! 2. `connection`: lee el request, resuelve el target, escribe la response
//!    y cierra el socket

pub mod connection;
pub mod tcp;

// Re-exportar para facilitar el uso
pub use connection::{handle_connection, serve, ConnectionOptions, Exchange};
pub use tcp::Server;
