//! # File Server - Entry Point
//! src/main.rs
//!
//! Parsea la configuración, inicializa el logging y bloquea en el loop
//! de accept.

use file_server::config::Config;
use file_server::logging;
use file_server::server::Server;

fn main() {
    let config = Config::new();

    if let Err(e) = logging::init(&config.log_level) {
        eprintln!("💥 {}", e);
        std::process::exit(1);
    }

    let mut server = match Server::new(config) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!(error = %e, "no se pudo iniciar el servidor");
            std::process::exit(1);
        }
    };

    // Bloquea el thread principal
    if let Err(e) = server.run() {
        tracing::error!(error = %e, "error fatal");
        std::process::exit(1);
    }
}
