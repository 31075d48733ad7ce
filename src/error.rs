//! Error types shared by the domain model and the catalog. Validation errors
//! carry the user-facing wording directly so the UI can show them verbatim
//! without a translation layer in between.

use std::io;

use thiserror::Error;

/// A field failed its constraint while a record was being built. Construction
/// stops at the first one of these, so no half-built record ever escapes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("el título no puede estar vacío")]
    EmptyTitle,
    #[error("el autor es obligatorio")]
    EmptyAuthor,
    #[error("el año ingresado no es válido (Rango: 1400 - {max}): {year}")]
    YearOutOfRange { year: i32, max: i32 },
    #[error("formato inválido (Use: PDF, EPUB o MOBI): '{0}'")]
    InvalidFormat(String),
    #[error("el número de páginas debe ser positivo (recibido {0})")]
    NonPositivePageCount(i64),
    #[error("el narrador es obligatorio")]
    EmptyNarrator,
    #[error("la duración debe ser mayor a 0 (recibido {0})")]
    NonPositiveDuration(i64),
}

/// Failures raised by catalog lookups.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The 1-based index does not point at any record.
    #[error("ID no encontrado: {index} (el catálogo tiene {len} elementos)")]
    NotFound { index: usize, len: usize },
    /// The sink handed to `access` refused the output.
    #[error("no se pudo mostrar el contenido")]
    Output(#[from] io::Error),
}
