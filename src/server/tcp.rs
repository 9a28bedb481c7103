//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Loop de accept: cada conexión se atiende en su propio thread. Lo único
//! compartido entre threads es el resolver (tabla de redirecciones y
//! document root), que es de solo lectura.

use std::io;
use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;
use std::thread;

use tracing::{debug, error, info};

use super::connection::{handle_connection, ConnectionOptions};
use crate::config::Config;
use crate::error::Result;
use crate::resolver::{RedirectTable, ResourceResolver};

/// Servidor de archivos HTTP/1.1, un thread por conexión
pub struct Server {
    config: Config,
    resolver: Arc<ResourceResolver>,
    options: ConnectionOptions,
    listener: Option<TcpListener>,
}

impl Server {
    /// Valida la configuración y construye el resolver compartido
    pub fn new(config: Config) -> Result<Self> {
        Self::with_redirects(config, RedirectTable::default())
    }

    /// Igual que [`Server::new`] pero con una tabla de redirecciones propia
    pub fn with_redirects(config: Config, redirects: RedirectTable) -> Result<Self> {
        config.validate()?;

        let resolver = ResourceResolver::new(config.root(), Arc::new(redirects))?;
        let options = ConnectionOptions::from_config(&config);

        Ok(Self {
            config,
            resolver: Arc::new(resolver),
            options,
            listener: None,
        })
    }

    /// Hace bind del listener si todavía no se hizo
    pub fn bind(&mut self) -> io::Result<SocketAddr> {
        if let Some(listener) = &self.listener {
            return listener.local_addr();
        }

        let address = self.config.address();
        let listener = TcpListener::bind(&address)?;
        let local = listener.local_addr()?;
        info!(address = %local, root = %self.resolver.root().display(), "servidor escuchando");

        self.listener = Some(listener);
        Ok(local)
    }

    /// Dirección real del listener (útil con puerto 0)
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.listener.as_ref().and_then(|l| l.local_addr().ok())
    }

    /// Acepta conexiones indefinidamente
    ///
    /// Solo retorna error si falla el bind; los errores de accept o de
    /// una conexión se loguean y el loop sigue.
    pub fn run(&mut self) -> io::Result<()> {
        self.bind()?;
        let Some(listener) = self.listener.as_ref() else {
            return Err(io::Error::new(io::ErrorKind::NotConnected, "listener not bound"));
        };

        info!("modo concurrente: un thread por conexión");

        for (id, stream) in listener.incoming().enumerate() {
            match stream {
                Ok(stream) => {
                    let resolver = Arc::clone(&self.resolver);
                    let options = self.options;

                    debug!(conn = id, "nueva conexión");

                    let spawned = thread::Builder::new()
                        .name(format!("conn-{}", id))
                        .spawn(move || handle_connection(stream, &resolver, &options));

                    if let Err(e) = spawned {
                        error!(error = %e, "no se pudo crear el thread de la conexión");
                    }
                }
                Err(e) => {
                    error!(error = %e, "error al aceptar conexión");
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServerError;
    use std::io::{Read, Write};
    use std::net::TcpStream;

    fn config_for(root: &std::path::Path) -> Config {
        Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            root: root.to_path_buf(),
            ..Config::default()
        }
    }

    #[test]
    fn test_new_rejects_missing_root() {
        let config = config_for(std::path::Path::new("/definitely/not/here"));

        assert!(matches!(Server::new(config), Err(ServerError::Config(_))));
    }

    #[test]
    fn test_bind_ephemeral_port() {
        let dir = tempfile::tempdir().unwrap();
        let mut server = Server::new(config_for(dir.path())).unwrap();

        assert!(server.local_addr().is_none());
        let addr = server.bind().unwrap();
        assert_ne!(addr.port(), 0);
        assert_eq!(server.local_addr(), Some(addr));
        // Segundo bind reutiliza el listener
        assert_eq!(server.bind().unwrap(), addr);
    }

    #[test]
    fn test_run_serves_with_custom_redirects() {
        let dir = tempfile::tempdir().unwrap();
        let redirects = RedirectTable::new([("/old", "/new.html")]);
        let mut server = Server::with_redirects(config_for(dir.path()), redirects).unwrap();
        let addr = server.bind().unwrap();

        thread::spawn(move || server.run());

        let mut client = TcpStream::connect(addr).unwrap();
        client.write_all(b"GET /old HTTP/1.1\r\n\r\n").unwrap();
        let mut buf = String::new();
        client.read_to_string(&mut buf).unwrap();

        assert!(buf.starts_with("HTTP/1.1 301 Moved Permanently\r\n"));
        assert!(buf.contains("Location: /new.html\r\n"));
    }
}
