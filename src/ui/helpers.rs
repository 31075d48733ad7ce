use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::ListItem;

use crate::catalog::Catalog;

/// Message shown wherever the catalog has nothing to list.
pub(crate) const EMPTY_CATALOG: &str = "Biblioteca vacía.";

/// One `N. summary` list row per record, in catalog order.
pub(crate) fn catalog_items(catalog: &Catalog) -> Vec<ListItem<'static>> {
    catalog
        .list()
        .map(|(index, summary)| ListItem::new(Line::from(format!("{index}. {summary}"))))
        .collect()
}

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_surface_error_picks_root_cause() {
        let err = anyhow!("ID no encontrado").context("access failed");
        assert_eq!(surface_error(&err), "ID no encontrado");
    }

    #[test]
    fn test_centered_rect_stays_inside() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(60, 50, area);
        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 20);
        assert_eq!(popup.x, 20);
        assert_eq!(popup.y, 10);
    }

    #[test]
    fn test_catalog_items_one_per_record() {
        let catalog = Catalog::with_demo_records().unwrap();
        assert_eq!(catalog_items(&catalog).len(), 2);
        assert!(catalog_items(&Catalog::new()).is_empty());
    }
}
