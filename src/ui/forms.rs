use std::str::FromStr;

use anyhow::{anyhow, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::error::ValidationError;
use crate::models::{Audiobook, Ebook, Record};

/// Which record the form is collecting.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum RecordKind {
    Ebook,
    Audiobook,
}

impl RecordKind {
    pub(crate) fn title(&self) -> &'static str {
        match self {
            RecordKind::Ebook => "Registrar Ebook",
            RecordKind::Audiobook => "Registrar Audiolibro",
        }
    }

    fn fields(&self) -> &'static [FieldDef] {
        match self {
            RecordKind::Ebook => &EBOOK_FIELDS,
            RecordKind::Audiobook => &AUDIOBOOK_FIELDS,
        }
    }
}

/// Keystrokes a field accepts.
#[derive(Copy, Clone, PartialEq, Eq)]
enum FieldInput {
    Text,
    Number,
}

struct FieldDef {
    label: &'static str,
    input: FieldInput,
}

const fn text(label: &'static str) -> FieldDef {
    FieldDef {
        label,
        input: FieldInput::Text,
    }
}

const fn number(label: &'static str) -> FieldDef {
    FieldDef {
        label,
        input: FieldInput::Number,
    }
}

const EBOOK_FIELDS: [FieldDef; 5] = [
    text("Título"),
    text("Autor"),
    number("Año de publicación"),
    text("Formato (PDF/EPUB/MOBI)"),
    number("Total de páginas"),
];

const AUDIOBOOK_FIELDS: [FieldDef; 5] = [
    text("Título"),
    text("Autor"),
    number("Año de publicación"),
    text("Nombre del Narrador"),
    number("Duración (minutos)"),
];

/// Form state for registering a record. Values stay raw text until submit.
#[derive(Clone)]
pub(crate) struct RecordForm {
    pub(crate) kind: RecordKind,
    values: Vec<String>,
    pub(crate) active: usize,
    pub(crate) error: Option<String>,
}

impl RecordForm {
    pub(crate) fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            values: vec![String::new(); kind.fields().len()],
            active: 0,
            error: None,
        }
    }

    pub(crate) fn field_count(&self) -> usize {
        self.values.len()
    }

    pub(crate) fn is_last_field(&self) -> bool {
        self.active + 1 == self.field_count()
    }

    pub(crate) fn next_field(&mut self) {
        self.active = (self.active + 1) % self.field_count();
    }

    pub(crate) fn previous_field(&mut self) {
        self.active = (self.active + self.field_count() - 1) % self.field_count();
    }

    /// Append a character to the active field. Numeric fields take digits only.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        let accepted = match self.kind.fields()[self.active].input {
            FieldInput::Number => ch.is_ascii_digit(),
            FieldInput::Text => !ch.is_control(),
        };
        if accepted {
            self.values[self.active].push(ch);
        }
        accepted
    }

    pub(crate) fn backspace(&mut self) {
        self.values[self.active].pop();
    }

    /// Turn the raw text into typed values. Only numeric parsing happens
    /// here; field constraints are checked by `RecordDraft::build`.
    pub(crate) fn parse_inputs(&self) -> Result<RecordDraft> {
        let fields = self.kind.fields();
        let title = self.values[0].clone();
        let author = self.values[1].clone();
        let year = parse_number(&self.values[2], fields[2].label)?;
        let detail = self.values[3].clone();
        let amount = parse_number(&self.values[4], fields[4].label)?;

        Ok(match self.kind {
            RecordKind::Ebook => RecordDraft::Ebook {
                title,
                author,
                year,
                format: detail,
                page_count: amount,
            },
            RecordKind::Audiobook => RecordDraft::Audiobook {
                title,
                author,
                year,
                narrator: detail,
                duration_minutes: amount,
            },
        })
    }

    /// Label prefix as drawn in front of the value, used for cursor placement.
    pub(crate) fn prefix(&self, index: usize) -> String {
        format!("{}: ", self.kind.fields()[index].label)
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, index: usize) -> Line<'static> {
        let value = &self.values[index];
        let is_active = index == self.active;

        let display = if value.is_empty() {
            "<obligatorio>".to_string()
        } else {
            value.clone()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(self.prefix(index)),
            Span::styled(display, style),
        ])
    }

    /// Character count of the field at `index`.
    pub(crate) fn value_len(&self, index: usize) -> usize {
        self.values[index].chars().count()
    }
}

fn parse_number<T: FromStr>(raw: &str, label: &str) -> Result<T> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(anyhow!("El campo '{label}' es obligatorio."));
    }
    raw.parse::<T>()
        .map_err(|_| anyhow!("El campo '{label}' debe ser un número entero."))
}

/// Typed but not yet validated field values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RecordDraft {
    Ebook {
        title: String,
        author: String,
        year: i32,
        format: String,
        page_count: i64,
    },
    Audiobook {
        title: String,
        author: String,
        year: i32,
        narrator: String,
        duration_minutes: i64,
    },
}

impl RecordDraft {
    /// Hand the values to the matching validating constructor.
    pub(crate) fn build(self) -> Result<Record, ValidationError> {
        match self {
            RecordDraft::Ebook {
                title,
                author,
                year,
                format,
                page_count,
            } => Ebook::new(&title, &author, year, &format, page_count).map(Record::from),
            RecordDraft::Audiobook {
                title,
                author,
                year,
                narrator,
                duration_minutes,
            } => Audiobook::new(&title, &author, year, &narrator, duration_minutes)
                .map(Record::from),
        }
    }
}

/// Prompt for the 1-based index of the record to open.
#[derive(Default, Clone)]
pub(crate) struct IndexForm {
    pub(crate) value: String,
    pub(crate) error: Option<String>,
}

impl IndexForm {
    pub(crate) const PREFIX: &'static str = "ID a descargar: ";

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_ascii_digit() {
            self.value.push(ch);
            true
        } else {
            false
        }
    }

    pub(crate) fn backspace(&mut self) {
        self.value.pop();
    }

    pub(crate) fn parse_index(&self) -> Result<usize> {
        parse_number(&self.value, "ID")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(form: &mut RecordForm, values: &[&str]) {
        for value in values {
            for ch in value.chars() {
                form.push_char(ch);
            }
            form.next_field();
        }
    }

    #[test]
    fn test_numeric_fields_reject_non_digits() {
        let mut form = RecordForm::new(RecordKind::Ebook);
        form.active = 2;
        assert!(!form.push_char('x'));
        assert!(!form.push_char('-'));
        assert!(form.push_char('1'));
        assert_eq!(form.value_len(2), 1);

        form.active = 0;
        assert!(form.push_char('x'));
        assert!(!form.push_char('\n'));
    }

    #[test]
    fn test_parse_ebook_draft() {
        let mut form = RecordForm::new(RecordKind::Ebook);
        fill(&mut form, &["Don Quijote", "Cervantes", "1605", "pdf", "1200"]);

        let draft = form.parse_inputs().unwrap();
        assert_eq!(
            draft,
            RecordDraft::Ebook {
                title: "Don Quijote".into(),
                author: "Cervantes".into(),
                year: 1605,
                format: "pdf".into(),
                page_count: 1200,
            }
        );
        assert!(draft.build().is_ok());
    }

    #[test]
    fn test_empty_number_keeps_form_open() {
        let mut form = RecordForm::new(RecordKind::Audiobook);
        fill(&mut form, &["1984", "Orwell", "", "Francisco M.", "480"]);

        let err = form.parse_inputs().unwrap_err();
        assert_eq!(
            err.to_string(),
            "El campo 'Año de publicación' es obligatorio."
        );
    }

    #[test]
    fn test_overflowing_number_rejected() {
        let mut form = RecordForm::new(RecordKind::Ebook);
        fill(&mut form, &["T", "A", "99999999999", "PDF", "1"]);
        assert!(form
            .parse_inputs()
            .unwrap_err()
            .to_string()
            .contains("número entero"));
    }

    #[test]
    fn test_draft_validation_failure() {
        let mut form = RecordForm::new(RecordKind::Ebook);
        fill(&mut form, &["T", "A", "1200", "PDF", "10"]);
        let draft = form.parse_inputs().unwrap();
        assert!(matches!(
            draft.build(),
            Err(ValidationError::YearOutOfRange { year: 1200, .. })
        ));
    }

    #[test]
    fn test_field_focus_wraps() {
        let mut form = RecordForm::new(RecordKind::Audiobook);
        form.previous_field();
        assert_eq!(form.active, 4);
        assert!(form.is_last_field());
        form.next_field();
        assert_eq!(form.active, 0);
    }

    #[test]
    fn test_index_form() {
        let mut form = IndexForm::default();
        assert!(form.parse_index().is_err());
        assert!(!form.push_char('a'));
        form.push_char('1');
        form.push_char('2');
        form.backspace();
        assert_eq!(form.parse_index().unwrap(), 1);
    }
}
