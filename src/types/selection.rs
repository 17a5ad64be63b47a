/// Row selection. At most one row is selected at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    row: Option<usize>,
}

impl Selection {
    pub const fn none() -> Self {
        Self { row: None }
    }

    pub const fn row(&self) -> Option<usize> {
        self.row
    }

    pub fn is_selected(&self, row: usize) -> bool {
        self.row == Some(row)
    }

    /// Number of selected rows, always 0 or 1.
    pub const fn count(&self) -> usize {
        if self.row.is_some() {
            1
        } else {
            0
        }
    }

    /// Select `row` or, with `on == false`, deselect it.
    ///
    /// Returns the notifications to emit in order: a clear for the
    /// previously selected row (if any) followed by the new selection.
    pub(crate) fn set(&mut self, row: usize, on: bool) -> Vec<SelectionChange> {
        let mut changes = Vec::new();
        if self.is_selected(row) == on {
            return changes;
        }
        if let Some(prev) = self.clear() {
            changes.push(prev);
        }
        if on {
            self.row = Some(row);
            changes.push(SelectionChange {
                row: Some(row),
                count: 1,
                selected: true,
            });
        }
        changes
    }

    pub(crate) fn clear(&mut self) -> Option<SelectionChange> {
        self.row.take().map(|_| SelectionChange {
            row: None,
            count: 0,
            selected: false,
        })
    }
}

/// Selection-changed notification.
///
/// `row` is `None` when the whole selection was cleared; `count` is 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionChange {
    pub row: Option<usize>,
    pub count: usize,
    pub selected: bool,
}
