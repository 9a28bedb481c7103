//! # Configuración del Servidor
//! src/config.rs
//!
//! Argumentos CLI con fallback a variables de entorno. Ninguna opción
//! cambia la semántica del request/response; la tabla de redirecciones
//! no es configurable.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./file_server --port 8080 --root ./public --read-timeout-secs 30
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=8080 DOC_ROOT=./public ./file_server
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;

use crate::error::{Result, ServerError};

/// Configuración del servidor de archivos
#[derive(Debug, Clone, Parser)]
#[command(name = "file_server")]
#[command(about = "Servidor HTTP/1.1 de archivos estáticos")]
#[command(version)]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "6789", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "0.0.0.0", env = "HTTP_HOST")]
    pub host: String,

    /// Document root desde el que se sirven los archivos
    #[arg(short, long, default_value = ".", env = "DOC_ROOT")]
    pub root: PathBuf,

    /// Deadline de lectura por conexión en segundos (0 = sin límite)
    #[arg(long = "read-timeout-secs", default_value = "0", env = "READ_TIMEOUT_SECS")]
    pub read_timeout_secs: u64,

    /// Deadline de escritura por conexión en segundos (0 = sin límite)
    #[arg(long = "write-timeout-secs", default_value = "0", env = "WRITE_TIMEOUT_SECS")]
    pub write_timeout_secs: u64,

    /// Responder 400 Bad Request a requests malformados en vez de cerrar
    #[arg(long = "reject-malformed", env = "REJECT_MALFORMED")]
    pub reject_malformed: bool,

    /// Nivel de log por defecto (RUST_LOG tiene prioridad)
    #[arg(long = "log-level", default_value = "info", env = "LOG_LEVEL")]
    pub log_level: String,
}

impl Config {
    /// Crea la configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use file_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "0.0.0.0:6789");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        (self.read_timeout_secs > 0).then(|| Duration::from_secs(self.read_timeout_secs))
    }

    pub fn write_timeout(&self) -> Option<Duration> {
        (self.write_timeout_secs > 0).then(|| Duration::from_secs(self.write_timeout_secs))
    }

    /// Valida la configuración
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(ServerError::Config("host must not be empty".to_string()));
        }

        if !self.root.is_dir() {
            return Err(ServerError::Config(format!(
                "document root is not a directory: {}",
                self.root.display()
            )));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 6789,
            host: "0.0.0.0".to_string(),
            root: PathBuf::from("."),
            read_timeout_secs: 0,
            write_timeout_secs: 0,
            reject_malformed: false,
            log_level: "info".to_string(),
        }
    }
}
