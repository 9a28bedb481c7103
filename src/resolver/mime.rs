//! Detección del Content-Type de un archivo servido.

use std::path::Path;

pub const TEXT_PLAIN: &str = "text/plain";
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Determina el Content-Type por extensión y, si no la reconoce,
/// inspeccionando el contenido.
pub fn content_type(path: &Path, bytes: &[u8]) -> String {
    match mime_guess::from_path(path).first() {
        Some(mime) => mime.essence_str().to_string(),
        None => sniff(bytes).to_string(),
    }
}

/// UTF-8 válido sin bytes NUL se considera texto
fn sniff(bytes: &[u8]) -> &'static str {
    if !bytes.contains(&0) && std::str::from_utf8(bytes).is_ok() {
        TEXT_PLAIN
    } else {
        OCTET_STREAM
    }
}
