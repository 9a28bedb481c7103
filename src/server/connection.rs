//! # Manejo de una Conexión
//! src/server/connection.rs
//!
//! Ciclo de vida de una conexión aceptada:
//!
//! ```text
//! leer request → resolver target → escribir response → cerrar
//! ```
//!
//! El `TcpStream` se recibe por valor: se cierra exactamente una vez,
//! al salir de [`handle_connection`], sin importar por qué rama salga.
//! Ninguna falla escapa de aquí hacia el loop de accept.

use std::io::{BufRead, BufReader, Write};
use std::net::{Shutdown, TcpStream};
use std::time::{Duration, Instant};

use tracing::{debug, error, info, info_span, warn};

use crate::config::Config;
use crate::error::{Result, ServerError};
use crate::http::{Request, Response, StatusCode};
use crate::resolver::ResourceResolver;

/// Opciones por conexión derivadas de la configuración
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectionOptions {
    /// Responder 400 a requests malformados en vez de cerrar en silencio
    pub reject_malformed: bool,
    pub read_timeout: Option<Duration>,
    pub write_timeout: Option<Duration>,
}

impl ConnectionOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            reject_malformed: config.reject_malformed,
            read_timeout: config.read_timeout(),
            write_timeout: config.write_timeout(),
        }
    }
}

/// Request atendido y status con el que se respondió
#[derive(Debug)]
pub struct Exchange {
    pub request: Request,
    pub status: StatusCode,
}

/// Atiende un request sobre streams arbitrarios
///
/// Con `reject_malformed`, un request malformado recibe un 400 antes de
/// devolver el error. `EmptyRequest` nunca produce bytes de salida.
pub fn serve<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    resolver: &ResourceResolver,
    options: &ConnectionOptions,
) -> Result<Exchange> {
    let request = match Request::read_from(reader) {
        Ok(request) => request,
        Err(e) => {
            let err = ServerError::from(e);
            if options.reject_malformed && matches!(err, ServerError::MalformedRequest(_)) {
                // El error original manda: una falla al escribir el 400 solo se loguea
                if let Err(write_err) = Response::bad_request()
                    .with_common_headers()
                    .write_to(writer)
                {
                    warn!(error = %write_err, "no se pudo enviar el 400");
                }
            }
            return Err(err);
        }
    };

    let outcome = resolver.resolve(request.target())?;
    let response = Response::from_outcome(outcome);
    response.write_to(writer)?;

    Ok(Exchange {
        request,
        status: response.status(),
    })
}

/// Maneja una conexión TCP completa y la cierra
pub fn handle_connection(stream: TcpStream, resolver: &ResourceResolver, options: &ConnectionOptions) {
    let start = Instant::now();
    let peer = stream
        .peer_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    let span = info_span!("conn", peer = %peer);
    let _enter = span.enter();

    if let Err(e) = apply_timeouts(&stream, options) {
        error!(error = %e, "no se pudieron configurar los timeouts");
        return;
    }

    let mut reader = BufReader::new(&stream);
    let mut writer = &stream;

    match serve(&mut reader, &mut writer, resolver, options) {
        Ok(exchange) => {
            info!(
                method = exchange.request.method(),
                target = exchange.request.target(),
                status = exchange.status.as_u16(),
                elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
                "respuesta enviada"
            );
        }
        Err(ServerError::EmptyRequest) => {
            debug!("conexión cerrada sin request");
        }
        Err(ServerError::MalformedRequest(e)) => {
            warn!(error = %e, responded = options.reject_malformed, "request malformado");
        }
        Err(e) => {
            error!(error = %e, "falla de I/O, se cierra la conexión");
        }
    }

    // FIN ordenado; el socket se libera al salir de la función
    if let Err(e) = stream.shutdown(Shutdown::Write) {
        debug!(error = %e, "shutdown del socket");
    }
}

fn apply_timeouts(stream: &TcpStream, options: &ConnectionOptions) -> std::io::Result<()> {
    stream.set_read_timeout(options.read_timeout)?;
    stream.set_write_timeout(options.write_timeout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::response::NOT_FOUND_PAGE;
    use crate::resolver::RedirectTable;
    use std::fs;
    use std::io::{self, Read};
    use std::net::TcpListener;
    use std::sync::Arc;
    use std::thread;
    use tempfile::TempDir;

    fn fixture() -> (TempDir, ResourceResolver) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.html"), "<h1>home</h1>").unwrap();
        let resolver = ResourceResolver::new(dir.path(), Arc::new(RedirectTable::default())).unwrap();
        (dir, resolver)
    }

    fn run(raw: &[u8], options: ConnectionOptions) -> (Result<Exchange>, Vec<u8>) {
        let (_dir, resolver) = fixture();
        let mut reader = raw;
        let mut out = Vec::new();
        let result = serve(&mut reader, &mut out, &resolver, &options);
        (result, out)
    }

    /// Writer que siempre falla, para simular un cliente que se fue
    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_serve_redirect() {
        let (result, out) = run(b"GET / HTTP/1.1\r\n\r\n", ConnectionOptions::default());
        let text = String::from_utf8(out).unwrap();

        assert_eq!(result.unwrap().status, StatusCode::MovedPermanently);
        assert!(text.starts_with("HTTP/1.1 301 Moved Permanently\r\n"));
        assert!(text.contains("Location: /index.html\r\n"));
        assert!(text.ends_with("\r\n\r\n"));
    }

    #[test]
    fn test_serve_file() {
        let (result, out) = run(b"GET /index.html HTTP/1.1\r\n\r\n", ConnectionOptions::default());

        let exchange = result.unwrap();
        assert_eq!(exchange.status, StatusCode::Ok);
        assert_eq!(exchange.request.target(), "/index.html");
        assert!(out.ends_with(b"\r\n\r\n<h1>home</h1>"));
    }

    #[test]
    fn test_serve_not_found() {
        let (result, out) = run(b"GET /missing.html HTTP/1.1\r\n\r\n", ConnectionOptions::default());

        assert_eq!(result.unwrap().status, StatusCode::NotFound);
        assert!(out.starts_with(b"HTTP/1.1 404 Not Found\r\n"));
        assert!(out.ends_with(NOT_FOUND_PAGE.as_bytes()));
    }

    #[test]
    fn test_empty_request_writes_nothing() {
        let options = ConnectionOptions {
            reject_malformed: true,
            ..Default::default()
        };
        let (result, out) = run(b"", options);

        assert!(matches!(result, Err(ServerError::EmptyRequest)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_malformed_closes_silently_by_default() {
        let (result, out) = run(b"GARBAGE\r\n\r\n", ConnectionOptions::default());

        assert!(matches!(result, Err(ServerError::MalformedRequest(_))));
        assert!(out.is_empty());
    }

    #[test]
    fn test_malformed_gets_400_when_rejecting() {
        let options = ConnectionOptions {
            reject_malformed: true,
            ..Default::default()
        };
        let (result, out) = run(b"GET / HTTP/1.1\r\nbroken header\r\n\r\n", options);

        assert!(matches!(result, Err(ServerError::MalformedRequest(_))));
        assert!(out.starts_with(b"HTTP/1.1 400 Bad Request\r\n"));
    }

    #[test]
    fn test_failed_400_keeps_malformed_error() {
        let (_dir, resolver) = fixture();
        let options = ConnectionOptions {
            reject_malformed: true,
            ..Default::default()
        };
        let mut reader: &[u8] = b"GET /\r\n\r\n";

        let result = serve(&mut reader, &mut BrokenPipe, &resolver, &options);

        assert!(matches!(result, Err(ServerError::MalformedRequest(_))));
    }

    #[test]
    fn test_write_failure_is_io_error() {
        let (_dir, resolver) = fixture();
        let mut reader: &[u8] = b"GET /index.html HTTP/1.1\r\n\r\n";

        let result = serve(&mut reader, &mut BrokenPipe, &resolver, &ConnectionOptions::default());

        assert!(matches!(result, Err(ServerError::Io(_))));
    }

    #[test]
    fn test_handle_connection_over_tcp() {
        let (_dir, resolver) = fixture();
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let t = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            handle_connection(stream, &resolver, &ConnectionOptions::default());
        });

        let mut client = TcpStream::connect(addr).unwrap();
        client.write_all(b"GET /index HTTP/1.1\r\nHost: test\r\n\r\n").unwrap();

        let mut buf = Vec::new();
        client.read_to_end(&mut buf).unwrap();
        let text = String::from_utf8_lossy(&buf);

        assert!(text.starts_with("HTTP/1.1 301 Moved Permanently\r\n"));
        assert!(text.contains("Location: /index.html\r\n"));

        t.join().unwrap();
    }

    #[test]
    fn test_handle_connection_peer_closed_immediately() {
        let (_dir, resolver) = fixture();
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let t = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            handle_connection(stream, &resolver, &ConnectionOptions::default());
        });

        // Conecta y cierra sin mandar datos
        drop(TcpStream::connect(addr).unwrap());

        t.join().unwrap();
    }

    #[test]
    fn test_handle_connection_read_timeout() {
        let (_dir, resolver) = fixture();
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let options = ConnectionOptions {
            read_timeout: Some(Duration::from_millis(100)),
            ..Default::default()
        };

        let t = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            handle_connection(stream, &resolver, &options);
        });

        // Cliente silencioso: el servidor debe cerrar sin responder
        let mut client = TcpStream::connect(addr).unwrap();
        client.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
        let mut buf = Vec::new();
        client.read_to_end(&mut buf).unwrap();

        assert!(buf.is_empty());
        t.join().unwrap();
    }
}
