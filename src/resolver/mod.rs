//! # Resolución de Recursos
//! src/resolver/mod.rs
//!
//! Decide qué hacer con el target de un request:
//!
//! ```text
//! target → ¿tabla de redirecciones? → Redirect
//!        → ¿archivo regular bajo el document root? → Serve
//!        → NotFound
//! ```
//!
//! La tabla de redirecciones siempre se consulta antes que el disco.

pub mod mime;
pub mod redirect;

pub use redirect::RedirectTable;

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

/// Resultado de resolver un target. Exactamente una variante por request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// El target está en la tabla; el destino se envía tal cual
    Redirect(String),

    /// Ni redirección ni archivo regular dentro del document root
    NotFound,

    /// Archivo leído completo en memoria
    Serve {
        path: PathBuf,
        content_type: String,
        bytes: Vec<u8>,
    },
}

/// Resuelve targets contra la tabla de redirecciones y el document root
#[derive(Debug, Clone)]
pub struct ResourceResolver {
    /// Document root canonicalizado
    root: PathBuf,
    redirects: Arc<RedirectTable>,
}

impl ResourceResolver {
    /// Crea un resolver. El document root debe existir.
    pub fn new<P: AsRef<Path>>(root: P, redirects: Arc<RedirectTable>) -> io::Result<Self> {
        let root = fs::canonicalize(root.as_ref())?;
        if !root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("document root is not a directory: {}", root.display()),
            ));
        }

        Ok(Self { root, redirects })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resuelve un target
    ///
    /// # Errores
    ///
    /// Solo falla si el archivo existía pero no se pudo leer.
    pub fn resolve(&self, target: &str) -> io::Result<ResolutionOutcome> {
        if let Some(destination) = self.redirects.lookup(target) {
            return Ok(ResolutionOutcome::Redirect(destination.to_string()));
        }

        let path = match self.locate(target) {
            Some(path) => path,
            None => return Ok(ResolutionOutcome::NotFound),
        };

        let bytes = fs::read(&path)?;
        let content_type = mime::content_type(&path, &bytes);

        Ok(ResolutionOutcome::Serve {
            path,
            content_type,
            bytes,
        })
    }

    /// Traduce el target a un path dentro del root, sin tocar el disco.
    ///
    /// Cualquier `..`, raíz o prefijo invalida el target.
    fn map_path(&self, target: &str) -> Option<PathBuf> {
        let mut path = self.root.clone();
        for component in Path::new(target.trim_start_matches('/')).components() {
            match component {
                Component::Normal(segment) => path.push(segment),
                Component::CurDir => {}
                _ => return None,
            }
        }
        Some(path)
    }

    /// Path canónico de un archivo regular bajo el root, si existe
    fn locate(&self, target: &str) -> Option<PathBuf> {
        let Some(candidate) = self.map_path(target) else {
            warn!(requested = target, "target rechazado: sale del document root");
            return None;
        };

        let canonical = fs::canonicalize(&candidate).ok()?;
        // Un symlink puede apuntar fuera del root
        if !canonical.starts_with(&self.root) {
            warn!(requested = target, resolved = %canonical.display(), "symlink fuera del document root");
            return None;
        }

        match fs::metadata(&canonical) {
            Ok(metadata) if metadata.is_file() => Some(canonical),
            Ok(_) => {
                debug!(requested = target, "no es un archivo regular");
                None
            }
            Err(_) => None,
        }
    }
}
