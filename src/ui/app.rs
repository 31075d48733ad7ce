use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListState, Paragraph, Wrap};
use ratatui::Frame;
use tracing::warn;

use crate::catalog::Catalog;
use crate::error::CatalogError;

use super::forms::{IndexForm, RecordForm, RecordKind};
use super::helpers::{catalog_items, centered_rect, surface_error, EMPTY_CATALOG};
use super::screens::CatalogScreen;

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
const MENU_TITLE: &str = "=== SISTEMA DE GESTIÓN DE LIBROS ELECTRÓNICOS ===";
const MENU_ENTRIES: [&str; 5] = [
    "1. Registrar nuevo Ebook",
    "2. Registrar nuevo Audiolibro",
    "3. Consultar Catálogo",
    "4. Acceder a Contenido",
    "5. Salir",
];
const CONTINUE_HINT: &str = "[Presione Enter para continuar...]";
const SAVED: &str = "[ÉXITO] Material registrado correctamente.";
const NOT_SAVED: &str = "[ERROR CRÍTICO]: No se pudo registrar.";
const NOT_FOUND: &str = "[!] ID no encontrado.";
const INVALID_OPTION: &str = "Opción inválida.";

/// Top-level views.
enum Screen {
    Menu,
    Catalog(CatalogScreen),
}

/// Overlays and input modes on top of the current screen.
enum Mode {
    Normal,
    AddingRecord(RecordForm),
    SelectingIndex(IndexForm),
    Notice(Notice),
}

/// Result panel that stays up until the user acknowledges it.
struct Notice {
    title: String,
    lines: Vec<String>,
    kind: StatusKind,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Session state: the catalog it owns plus what is on screen.
pub struct App {
    catalog: Catalog,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            screen: Screen::Menu,
            mode: Mode::Normal,
            status: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Process one key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::AddingRecord(form) => self.handle_record_form(code, form),
            Mode::SelectingIndex(form) => self.handle_index_form(code, form)?,
            Mode::Notice(notice) => match code {
                KeyCode::Enter | KeyCode::Esc => Mode::Normal,
                _ => Mode::Notice(notice),
            },
        };

        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match self.screen {
            Screen::Menu => {
                match code {
                    KeyCode::Char('1') => {
                        self.clear_status();
                        return Ok(Mode::AddingRecord(RecordForm::new(RecordKind::Ebook)));
                    }
                    KeyCode::Char('2') => {
                        self.clear_status();
                        return Ok(Mode::AddingRecord(RecordForm::new(RecordKind::Audiobook)));
                    }
                    KeyCode::Char('3') => {
                        self.clear_status();
                        self.screen = Screen::Catalog(CatalogScreen::default());
                    }
                    KeyCode::Char('4') => return Ok(self.open_index_prompt()),
                    KeyCode::Char('5') | KeyCode::Char('q') | KeyCode::Esc => {
                        *exit = true;
                    }
                    KeyCode::Char(_) => self.set_status(INVALID_OPTION, StatusKind::Error),
                    _ => {}
                }
                Ok(Mode::Normal)
            }
            Screen::Catalog(ref mut listing) => {
                let len = self.catalog.len();
                match code {
                    KeyCode::Char('q') => {
                        *exit = true;
                    }
                    KeyCode::Esc | KeyCode::Backspace => {
                        self.clear_status();
                        self.screen = Screen::Menu;
                    }
                    KeyCode::Up => listing.move_selection(-1, len),
                    KeyCode::Down => listing.move_selection(1, len),
                    KeyCode::PageUp => listing.move_selection(-5, len),
                    KeyCode::PageDown => listing.move_selection(5, len),
                    KeyCode::Enter => {
                        if len == 0 {
                            self.set_status(EMPTY_CATALOG, StatusKind::Error);
                        } else {
                            let index = listing.selected_index();
                            return self.access(index);
                        }
                    }
                    KeyCode::Char('i') | KeyCode::Char('4') => {
                        return Ok(self.open_index_prompt());
                    }
                    _ => {}
                }
                Ok(Mode::Normal)
            }
        }
    }

    fn handle_record_form(&mut self, code: KeyCode, mut form: RecordForm) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Registro cancelado.", StatusKind::Info);
                return Mode::Normal;
            }
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter if !form.is_last_field() => form.next_field(),
            KeyCode::Enter => return self.submit_record(form),
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Mode::AddingRecord(form)
    }

    /// Malformed numbers keep the form open for correction; a field that
    /// fails validation discards the whole draft.
    fn submit_record(&mut self, mut form: RecordForm) -> Mode {
        let draft = match form.parse_inputs() {
            Ok(draft) => draft,
            Err(err) => {
                let message = surface_error(&err);
                form.error = Some(message.clone());
                self.set_status(message, StatusKind::Error);
                return Mode::AddingRecord(form);
            }
        };

        match draft.build() {
            Ok(record) => {
                self.catalog.append(record);
                self.set_status(SAVED, StatusKind::Info);
                Mode::Notice(Notice {
                    title: form.kind.title().to_string(),
                    lines: vec![SAVED.to_string()],
                    kind: StatusKind::Info,
                })
            }
            Err(err) => {
                warn!(kind = ?form.kind, %err, "record rejected");
                self.set_status(NOT_SAVED, StatusKind::Error);
                Mode::Notice(Notice {
                    title: form.kind.title().to_string(),
                    lines: vec![NOT_SAVED.to_string(), format!("Detalle: {err}")],
                    kind: StatusKind::Error,
                })
            }
        }
    }

    fn open_index_prompt(&mut self) -> Mode {
        if self.catalog.is_empty() {
            self.set_status(EMPTY_CATALOG, StatusKind::Error);
            return Mode::Normal;
        }
        self.clear_status();
        if matches!(self.screen, Screen::Menu) {
            self.screen = Screen::Catalog(CatalogScreen::default());
        }
        Mode::SelectingIndex(IndexForm::default())
    }

    fn handle_index_form(&mut self, code: KeyCode, mut form: IndexForm) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.clear_status();
                return Ok(Mode::Normal);
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match form.parse_index() {
                Ok(index) => return self.access(index),
                Err(err) => form.error = Some(surface_error(&err)),
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Ok(Mode::SelectingIndex(form))
    }

    /// Run the record's access behaviour and show what it printed.
    fn access(&mut self, index: usize) -> Result<Mode> {
        let mut output = Vec::new();
        match self.catalog.access_at(index, &mut output) {
            Ok(()) => {
                self.clear_status();
                let text = String::from_utf8_lossy(&output);
                Ok(Mode::Notice(Notice {
                    title: format!("Acceso #{index}"),
                    lines: text.lines().map(str::to_string).collect(),
                    kind: StatusKind::Info,
                }))
            }
            Err(CatalogError::NotFound { .. }) => {
                self.set_status(NOT_FOUND, StatusKind::Error);
                Ok(Mode::Normal)
            }
            Err(err) => Err(err.into()),
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::Menu => self.draw_menu(frame, content_area),
            Screen::Catalog(listing) => self.draw_catalog(frame, content_area, listing),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::AddingRecord(form) => self.draw_record_form(frame, area, form),
            Mode::SelectingIndex(form) => self.draw_index_prompt(frame, area, form),
            Mode::Notice(notice) => self.draw_notice(frame, area, notice),
            Mode::Normal => {}
        }
    }

    fn draw_menu(&self, frame: &mut Frame, area: Rect) {
        let mut lines: Vec<Line> = MENU_ENTRIES.iter().map(|entry| Line::from(*entry)).collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Registros en catálogo: {}", self.catalog.len()),
            Style::default().fg(Color::Gray),
        )));

        let menu = Paragraph::new(lines).alignment(Alignment::Left).block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    MENU_TITLE,
                    Style::default().add_modifier(Modifier::BOLD),
                )),
        );
        frame.render_widget(menu, area);
    }

    fn draw_catalog(&self, frame: &mut Frame, area: Rect, listing: &CatalogScreen) {
        let block = Block::default().borders(Borders::ALL).title("Catálogo");

        if self.catalog.is_empty() {
            let message = Paragraph::new(EMPTY_CATALOG)
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let list = List::new(catalog_items(&self.catalog))
            .block(block)
            .highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("▶ ");

        let mut list_state = ListState::default();
        list_state.select(Some(listing.selected));
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        match (&self.screen, &self.mode) {
            (_, Mode::AddingRecord(_)) => Line::from(vec![
                Span::styled("[Enter]", key_style),
                Span::raw(" Siguiente/Guardar   "),
                Span::styled("[Tab]", key_style),
                Span::raw(" Cambiar campo   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancelar"),
            ]),
            (_, Mode::SelectingIndex(_)) => Line::from(vec![
                Span::styled("[0-9]", key_style),
                Span::raw(" ID   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Acceder   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancelar"),
            ]),
            (_, Mode::Notice(_)) => Line::from(vec![
                Span::styled("[Enter]", key_style),
                Span::raw(" Continuar"),
            ]),
            (Screen::Menu, Mode::Normal) => Line::from(vec![
                Span::styled("[1-5]", key_style),
                Span::raw(" Seleccione opción   "),
                Span::styled("[q]", key_style),
                Span::raw(" Salir"),
            ]),
            (Screen::Catalog(_), Mode::Normal) => Line::from(vec![
                Span::styled("[↑↓]", key_style),
                Span::raw(" Navegar   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Acceder   "),
                Span::styled("[i]", key_style),
                Span::raw(" Acceder por ID   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Menú"),
            ]),
        }
    }

    fn draw_record_form(&self, frame: &mut Frame, area: Rect, form: &RecordForm) {
        let popup_area = centered_rect(70, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(form.kind.title())
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines: Vec<Line> = (0..form.field_count())
            .map(|index| form.build_line(index))
            .collect();
        lines.push(Line::from(""));

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter para continuar • Esc para cancelar",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines);
        frame.render_widget(paragraph, inner);

        let prefix = form.prefix(form.active).chars().count() as u16;
        let cursor_x = inner.x + prefix + form.value_len(form.active) as u16;
        let cursor_y = inner.y + form.active as u16;
        frame.set_cursor_position((cursor_x, cursor_y));
    }

    fn draw_index_prompt(&self, frame: &mut Frame, area: Rect, form: &IndexForm) {
        let popup_area = centered_rect(50, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Acceder a Contenido")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![Line::from(vec![
            Span::raw(IndexForm::PREFIX),
            Span::styled(form.value.clone(), Style::default().fg(Color::Yellow)),
        ])];
        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                format!("1 - {}", self.catalog.len()),
                Style::default().fg(Color::Gray),
            )));
        }

        frame.render_widget(Paragraph::new(lines), inner);

        let cursor_x = inner.x
            + IndexForm::PREFIX.chars().count() as u16
            + form.value.chars().count() as u16;
        frame.set_cursor_position((cursor_x, inner.y));
    }

    fn draw_notice(&self, frame: &mut Frame, area: Rect, notice: &Notice) {
        let popup_area = centered_rect(70, 40, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(notice.title.clone())
            .borders(Borders::ALL)
            .border_style(notice.kind.style());

        let mut lines: Vec<Line> = notice
            .lines
            .iter()
            .map(|line| Line::from(line.clone()))
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            CONTINUE_HINT,
            Style::default().fg(Color::Gray),
        )));

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}
