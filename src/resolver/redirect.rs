//! # Tabla de Redirecciones
//!
//! Mapa fijo de paths alias → path canónico. Se construye una vez al
//! arrancar y se comparte (solo lectura) entre todas las conexiones.

use std::collections::HashMap;

/// Redirecciones con las que arranca el servidor
pub const DEFAULT_REDIRECTS: [(&str, &str); 3] = [
    ("/", "/index.html"),
    ("/index.htm", "/index.html"),
    ("/index", "/index.html"),
];

/// Tabla inmutable de redirecciones
///
/// No expone ningún método que la modifique: se comparte vía `Arc`
/// sin locks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTable {
    entries: HashMap<String, String>,
}

impl RedirectTable {
    /// Construye una tabla a partir de pares (path, destino)
    ///
    /// # Ejemplo
    /// ```
    /// use file_server::resolver::RedirectTable;
    ///
    /// let table = RedirectTable::new([("/old", "/new.html")]);
    /// assert_eq!(table.lookup("/old"), Some("/new.html"));
    /// assert_eq!(table.lookup("/new.html"), None);
    /// ```
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Coincidencia exacta sobre el target sin procesar
    pub fn lookup(&self, target: &str) -> Option<&str> {
        self.entries.get(target).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RedirectTable {
    /// Tabla con `/`, `/index.htm` e `/index` apuntando a `/index.html`
    fn default() -> Self {
        Self::new(DEFAULT_REDIRECTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_entries() {
        let table = RedirectTable::default();

        assert_eq!(table.len(), 3);
        assert_eq!(table.lookup("/"), Some("/index.html"));
        assert_eq!(table.lookup("/index.htm"), Some("/index.html"));
        assert_eq!(table.lookup("/index"), Some("/index.html"));
    }

    #[test]
    fn test_exact_match_only() {
        let table = RedirectTable::default();

        assert_eq!(table.lookup("/index.html"), None);
        assert_eq!(table.lookup("/index/"), None);
        assert_eq!(table.lookup("/INDEX"), None);
        assert_eq!(table.lookup("/?q=1"), None);
    }

    #[test]
    fn test_destination_not_reresolved() {
        let table = RedirectTable::new([("/a", "/b"), ("/b", "/c")]);

        assert_eq!(table.lookup("/a"), Some("/b"));
    }

    #[test]
    fn test_empty_table() {
        let table = RedirectTable::new(Vec::<(String, String)>::new());

        assert!(table.is_empty());
        assert_eq!(table.lookup("/"), None);
    }
}
