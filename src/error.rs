//! Error types shared by every table in the crate.

/// Errors reported by table construction and the key-value operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// The key was absent after a full probe cycle.
    ///
    /// Recoverable: callers either check `contains` first or catch this to
    /// implement default-value semantics.
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// A full probe cycle found no usable slot and the growth sequence is
    /// exhausted. The table is left unmodified; the growth sequence was
    /// undersized for the workload.
    #[error("table is full and the growth sequence is exhausted")]
    TableFull,

    /// A growth sequence failed validation before any table was built.
    #[error("invalid growth sequence: {0}")]
    InvalidSizes(&'static str),
}
