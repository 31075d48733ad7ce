//! Domain models for the catalog. Both record kinds embed the same
//! `Publication` core and only ever come into existence through their
//! validating constructors, so anything holding an `Ebook` or `Audiobook`
//! can rely on every field having passed its checks.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use chrono::{Datelike, Local};

use crate::error::ValidationError;

/// Earliest accepted publication year (roughly the arrival of the printing
/// press). The upper bound is the current calendar year, read on every call.
pub const MIN_YEAR: i32 = 1400;

/// Calendar year on the local clock.
pub fn current_year() -> i32 {
    Local::now().year()
}

/// Behaviour every catalog entry exposes regardless of its kind.
pub trait Digital {
    /// One-line description used by the catalog listing.
    fn summary(&self) -> String;

    /// Simulate opening the content, writing the progress line to `out`.
    fn access(&self, out: &mut dyn Write) -> io::Result<()>;
}

/// Fields shared by every record. There is no public constructor: the only
/// way to get one is through `Ebook::new` or `Audiobook::new`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publication {
    title: String,
    author: String,
    year: i32,
}

impl Publication {
    fn blank() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            year: 0,
        }
    }

    /// Run the shared setters in title, author, year order and stop at the
    /// first failure.
    fn build(title: &str, author: &str, year: i32) -> Result<Self, ValidationError> {
        let mut publication = Self::blank();
        publication.set_title(title)?;
        publication.set_author(author)?;
        publication.set_year(year)?;
        Ok(publication)
    }

    pub(crate) fn set_title(&mut self, title: &str) -> Result<(), ValidationError> {
        self.title = required(title).ok_or(ValidationError::EmptyTitle)?;
        Ok(())
    }

    pub(crate) fn set_author(&mut self, author: &str) -> Result<(), ValidationError> {
        self.author = required(author).ok_or(ValidationError::EmptyAuthor)?;
        Ok(())
    }

    pub(crate) fn set_year(&mut self, year: i32) -> Result<(), ValidationError> {
        self.set_year_until(year, current_year())
    }

    fn set_year_until(&mut self, year: i32, max: i32) -> Result<(), ValidationError> {
        if !(MIN_YEAR..=max).contains(&year) {
            return Err(ValidationError::YearOutOfRange { year, max });
        }
        self.year = year;
        Ok(())
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn year(&self) -> i32 {
        self.year
    }
}

/// Trimmed copy of `value`, or `None` when nothing but whitespace is left.
fn required(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// File formats an e-book may be distributed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EbookFormat {
    Pdf,
    Epub,
    Mobi,
}

impl EbookFormat {
    pub const ALL: [EbookFormat; 3] = [EbookFormat::Pdf, EbookFormat::Epub, EbookFormat::Mobi];

    pub fn as_str(&self) -> &'static str {
        match self {
            EbookFormat::Pdf => "PDF",
            EbookFormat::Epub => "EPUB",
            EbookFormat::Mobi => "MOBI",
        }
    }

    /// Lowercase file extension used for the simulated download.
    pub fn extension(&self) -> &'static str {
        match self {
            EbookFormat::Pdf => "pdf",
            EbookFormat::Epub => "epub",
            EbookFormat::Mobi => "mobi",
        }
    }
}

impl FromStr for EbookFormat {
    type Err = ValidationError;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|format| format.as_str() == normalized)
            .ok_or_else(|| ValidationError::InvalidFormat(raw.trim().to_string()))
    }
}

impl fmt::Display for EbookFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A text publication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ebook {
    base: Publication,
    format: EbookFormat,
    page_count: i64,
}

impl Ebook {
    /// Validate every field and return a complete ebook, or the first error.
    pub fn new(
        title: &str,
        author: &str,
        year: i32,
        format: &str,
        page_count: i64,
    ) -> Result<Self, ValidationError> {
        let base = Publication::build(title, author, year)?;
        let format = format.parse::<EbookFormat>()?;
        if page_count <= 0 {
            return Err(ValidationError::NonPositivePageCount(page_count));
        }

        Ok(Self {
            base,
            format,
            page_count,
        })
    }

    pub fn publication(&self) -> &Publication {
        &self.base
    }

    pub fn format(&self) -> EbookFormat {
        self.format
    }

    pub fn page_count(&self) -> i64 {
        self.page_count
    }

    fn file_name(&self) -> String {
        format!(
            "{}.{}",
            self.base.title.replace(' ', "_"),
            self.format.extension()
        )
    }
}

impl Digital for Ebook {
    fn summary(&self) -> String {
        format!(
            "[TEXTO] {} | Autor: {} ({}) | Formato: {} ({} págs)",
            self.base.title, self.base.author, self.base.year, self.format, self.page_count
        )
    }

    fn access(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(
            out,
            ">> Descargando archivo: {} ... [COMPLETADO]",
            self.file_name()
        )
    }
}

/// A narrated publication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Audiobook {
    base: Publication,
    narrator: String,
    duration_minutes: i64,
}

impl Audiobook {
    /// Same base-field ordering as `Ebook::new`, then narrator and duration.
    pub fn new(
        title: &str,
        author: &str,
        year: i32,
        narrator: &str,
        duration_minutes: i64,
    ) -> Result<Self, ValidationError> {
        let base = Publication::build(title, author, year)?;
        let narrator = required(narrator).ok_or(ValidationError::EmptyNarrator)?;
        if duration_minutes <= 0 {
            return Err(ValidationError::NonPositiveDuration(duration_minutes));
        }

        Ok(Self {
            base,
            narrator,
            duration_minutes,
        })
    }

    pub fn publication(&self) -> &Publication {
        &self.base
    }

    pub fn narrator(&self) -> &str {
        &self.narrator
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration_minutes
    }
}

impl Digital for Audiobook {
    fn summary(&self) -> String {
        format!(
            "[AUDIO] {} | Voz: {} | Duración: {} min",
            self.base.title, self.narrator, self.duration_minutes
        )
    }

    fn access(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(
            out,
            ">> Reproduciendo stream de audio: '{}' ... [EN PROGRESO]",
            self.base.title
        )
    }
}

/// A catalog entry. The set of kinds is closed, so a plain enum dispatches
/// the `Digital` behaviour instead of boxed trait objects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Ebook(Ebook),
    Audiobook(Audiobook),
}

impl Record {
    pub fn publication(&self) -> &Publication {
        match self {
            Record::Ebook(ebook) => ebook.publication(),
            Record::Audiobook(audiobook) => audiobook.publication(),
        }
    }

    pub fn title(&self) -> &str {
        self.publication().title()
    }

    /// Label used in form titles and log lines.
    pub fn kind_label(&self) -> &'static str {
        match self {
            Record::Ebook(_) => "Ebook",
            Record::Audiobook(_) => "Audiolibro",
        }
    }
}

impl Digital for Record {
    fn summary(&self) -> String {
        match self {
            Record::Ebook(ebook) => ebook.summary(),
            Record::Audiobook(audiobook) => audiobook.summary(),
        }
    }

    fn access(&self, out: &mut dyn Write) -> io::Result<()> {
        match self {
            Record::Ebook(ebook) => ebook.access(out),
            Record::Audiobook(audiobook) => audiobook.access(out),
        }
    }
}

impl From<Ebook> for Record {
    fn from(ebook: Ebook) -> Self {
        Record::Ebook(ebook)
    }
}

impl From<Audiobook> for Record {
    fn from(audiobook: Audiobook) -> Self {
        Record::Audiobook(audiobook)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}
