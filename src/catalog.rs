//! In-memory catalog. Records arrive already validated, so appending never
//! fails; the only fallible operation is looking a record up by the 1-based
//! index the user sees on screen.

use std::io::Write;

use tracing::{debug, info, warn};

use crate::error::{CatalogError, ValidationError};
use crate::models::{Audiobook, Digital, Ebook, Record};

/// Ordered collection of records. Insertion order is display order.
#[derive(Debug, Default)]
pub struct Catalog {
    records: Vec<Record>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog pre-loaded with the two demo records shown on first launch.
    pub fn with_demo_records() -> Result<Self, ValidationError> {
        let mut catalog = Self::new();
        catalog.append(Ebook::new("Don Quijote", "Cervantes", 1605, "PDF", 1200)?);
        catalog.append(Audiobook::new(
            "1984",
            "George Orwell",
            1949,
            "Francisco M.",
            480,
        )?);
        Ok(catalog)
    }

    pub fn append(&mut self, record: impl Into<Record>) {
        let record = record.into();
        info!(
            kind = record.kind_label(),
            title = record.title(),
            position = self.records.len() + 1,
            "record added to catalog"
        );
        self.records.push(record);
    }

    /// `(index, summary)` pairs numbered from 1. Summaries are rendered on
    /// each call, so the iterator always reflects the current records.
    pub fn list(&self) -> impl Iterator<Item = (usize, String)> + '_ {
        self.records
            .iter()
            .enumerate()
            .map(|(offset, record)| (offset + 1, record.summary()))
    }

    /// Borrow the record at a 1-based `index`.
    pub fn get(&self, index: usize) -> Result<&Record, CatalogError> {
        index
            .checked_sub(1)
            .and_then(|offset| self.records.get(offset))
            .ok_or(CatalogError::NotFound {
                index,
                len: self.records.len(),
            })
    }

    /// Run the `access` behaviour of the record at a 1-based `index`.
    pub fn access_at(&self, index: usize, out: &mut dyn Write) -> Result<(), CatalogError> {
        let record = self.get(index).inspect_err(|_| {
            warn!(index, len = self.records.len(), "access outside catalog bounds");
        })?;
        debug!(index, title = record.title(), "accessing record");
        record.access(out)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.append(Ebook::new("Uno", "A", 2001, "pdf", 10).unwrap());
        catalog.append(Audiobook::new("Dos", "B", 2002, "N", 20).unwrap());
        catalog.append(Ebook::new("Tres", "C", 2003, "mobi", 30).unwrap());
        catalog
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let catalog = sample_catalog();
        let listed: Vec<_> = catalog.list().collect();

        assert_eq!(listed.len(), 3);
        assert_eq!(
            listed.iter().map(|(index, _)| *index).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert!(listed[0].1.contains("Uno"));
        assert!(listed[1].1.starts_with("[AUDIO] Dos"));
        assert!(listed[2].1.contains("Formato: MOBI"));
    }

    #[test]
    fn test_list_is_restartable() {
        let mut catalog = sample_catalog();
        let first: Vec<_> = catalog.list().collect();
        let second: Vec<_> = catalog.list().collect();
        assert_eq!(first, second);

        catalog.append(Audiobook::new("Cuatro", "D", 2004, "N", 40).unwrap());
        assert_eq!(catalog.list().count(), 4);
        assert_eq!(catalog.list().last().map(|(index, _)| index), Some(4));
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::new();
        assert!(catalog.is_empty());
        assert_eq!(catalog.list().count(), 0);
        assert!(matches!(
            catalog.access_at(1, &mut Vec::new()),
            Err(CatalogError::NotFound { index: 1, len: 0 })
        ));
    }

    #[test]
    fn test_access_out_of_bounds() {
        let catalog = sample_catalog();
        let mut out = Vec::new();

        for index in [0, 4, usize::MAX] {
            assert!(matches!(
                catalog.access_at(index, &mut out),
                Err(CatalogError::NotFound { len: 3, .. })
            ));
        }
        assert!(out.is_empty());
    }

    #[test]
    fn test_access_invokes_matching_record() {
        let catalog = sample_catalog();

        let mut out = Vec::new();
        catalog.access_at(2, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            ">> Reproduciendo stream de audio: 'Dos' ... [EN PROGRESO]\n"
        );

        let mut out = Vec::new();
        catalog.access_at(3, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            ">> Descargando archivo: Tres.mobi ... [COMPLETADO]\n"
        );
    }

    #[test]
    fn test_demo_records() {
        let catalog = Catalog::with_demo_records().unwrap();
        let listed: Vec<_> = catalog.list().map(|(_, summary)| summary).collect();
        assert_eq!(
            listed,
            vec![
                "[TEXTO] Don Quijote | Autor: Cervantes (1605) | Formato: PDF (1200 págs)",
                "[AUDIO] 1984 | Voz: Francisco M. | Duración: 480 min",
            ]
        );
    }
}
