/// Selection state for the catalog listing. The catalog itself lives on the
/// `App`; the screen only remembers which row is highlighted.
#[derive(Default)]
pub(crate) struct CatalogScreen {
    pub(crate) selected: usize,
}

impl CatalogScreen {
    pub(crate) fn move_selection(&mut self, offset: isize, len: usize) {
        if len == 0 {
            return;
        }
        let len = len as isize;
        let mut new = self.selected as isize + offset;
        if new < 0 {
            new = 0;
        }
        if new >= len {
            new = len - 1;
        }
        self.selected = new as usize;
    }

    /// 1-based catalog index of the highlighted row.
    pub(crate) fn selected_index(&self) -> usize {
        self.selected + 1
    }
}
