//! Bounded list of discovered networks with a selection cursor.
//!
//! [`NetworkList`] is the pure data model; [`NetworkListModel`] pairs it with
//! a display and re-renders the visible window after every mutation.

use heapless::{String, Vec};
use log::{debug, info};

use crate::{
    network::{NetworkRecord, SSID_BYTES},
    text::{self, RenderOutcome, TextDisplay},
};

/// Records kept from one scan cycle.
pub const MAX_NETWORKS: usize = 10;
/// Rows shown at once; one per display page.
pub const VISIBLE_ROWS: usize = text::LINES;
/// Placeholder rendered while a scan is in flight.
pub const SCANNING_MESSAGE: &str = "SCANNING...";

/// Marker + SSID + newline.
const ROW_BYTES: usize = 1 + SSID_BYTES + 1;

/// Rendered text of the visible window.
pub type ListText = String<{ VISIBLE_ROWS * ROW_BYTES }>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AddOutcome {
    Stored,
    /// List was at capacity; the record was discarded.
    Dropped,
}

/// Half-open index range `start..end` of rows on screen.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Window {
    pub start: usize,
    pub end: usize,
}

/// Rows to show for `len` entries with `selected` highlighted.
///
/// The first `rows` entries stay on screen until the cursor moves past them;
/// after that the cursor is pinned to the bottom row.
pub fn visible_window(len: usize, selected: usize, rows: usize) -> Window {
    let mut start = 0;
    let mut end = len.min(rows);

    if rows > 0 && selected >= rows {
        start = selected + 1 - rows;
        end = (start + rows).min(len);
        start = end.saturating_sub(rows);
    }

    Window { start, end }
}

#[derive(Clone, Debug, Default)]
pub struct NetworkList<const N: usize> {
    records: Vec<NetworkRecord, N>,
    selected: usize,
}

impl<const N: usize> NetworkList<N> {
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
            selected: 0,
        }
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[NetworkRecord] {
        &self.records
    }

    /// Cursor position, `None` while the list is empty.
    pub fn selected_index(&self) -> Option<usize> {
        if self.records.is_empty() {
            None
        } else {
            Some(self.selected)
        }
    }

    pub fn selected(&self) -> Option<&NetworkRecord> {
        self.records.get(self.selected)
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.selected = 0;
    }

    pub fn push(&mut self, record: NetworkRecord) -> AddOutcome {
        match self.records.push(record) {
            Ok(()) => AddOutcome::Stored,
            Err(_) => AddOutcome::Dropped,
        }
    }

    /// Moves the cursor down, wrapping to the top. `None` when empty.
    pub fn select_next(&mut self) -> Option<usize> {
        let len = self.records.len();
        if len == 0 {
            return None;
        }
        self.selected = (self.selected + 1) % len;
        Some(self.selected)
    }

    /// Moves the cursor up, wrapping to the bottom. `None` when empty.
    pub fn select_previous(&mut self) -> Option<usize> {
        let len = self.records.len();
        if len == 0 {
            return None;
        }
        self.selected = (self.selected + len - 1) % len;
        Some(self.selected)
    }

    pub fn window(&self) -> Window {
        visible_window(self.records.len(), self.selected, VISIBLE_ROWS)
    }

    /// Text for the visible window: `>` marks the cursor row, one row per line.
    pub fn compose(&self) -> ListText {
        let window = self.window();
        let mut out = ListText::new();

        for (offset, record) in self.records[window.start..window.end].iter().enumerate() {
            let marker = if window.start + offset == self.selected {
                '>'
            } else {
                ' '
            };
            let _ = out.push(marker);
            let _ = out.push_str(record.name());
            let _ = out.push('\n');
        }

        out
    }
}

/// Network list bound to the display it renders on.
///
/// Every method mutates the list first and renders second: a bus fault
/// is returned to the caller but the mutation is kept.
pub struct NetworkListModel<D, const N: usize = MAX_NETWORKS> {
    display: D,
    list: NetworkList<N>,
}

impl<D, const N: usize> NetworkListModel<D, N>
where
    D: TextDisplay,
{
    pub const fn new(display: D) -> Self {
        Self {
            display,
            list: NetworkList::new(),
        }
    }

    pub fn list(&self) -> &NetworkList<N> {
        &self.list
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn into_display(self) -> D {
        self.display
    }

    pub fn selected(&self) -> Option<&NetworkRecord> {
        self.list.selected()
    }

    /// Empties the list and shows the scanning placeholder.
    pub fn clear(&mut self) -> Result<RenderOutcome, D::Error> {
        self.list.clear();
        text::render(&mut self.display, SCANNING_MESSAGE)
    }

    /// Appends `record`; a full list drops it without rendering.
    pub fn add(&mut self, record: NetworkRecord) -> Result<AddOutcome, D::Error> {
        let outcome = self.list.push(record);
        if outcome == AddOutcome::Dropped {
            debug!("list: full at {}, record dropped", N);
            return Ok(outcome);
        }

        self.refresh()?;
        Ok(outcome)
    }

    /// Replaces the contents with up to `N` records and renders once.
    ///
    /// Returns how many records were stored.
    pub fn replace_all<I>(&mut self, records: I) -> Result<usize, D::Error>
    where
        I: IntoIterator<Item = NetworkRecord>,
    {
        self.list.clear();
        let mut dropped = 0usize;
        for record in records {
            if self.list.push(record) == AddOutcome::Dropped {
                dropped += 1;
            }
        }

        let stored = self.list.len();
        info!("list: {} networks stored, {} dropped", stored, dropped);
        self.refresh()?;
        Ok(stored)
    }

    pub fn select_next(&mut self) -> Result<Option<usize>, D::Error> {
        let moved = self.list.select_next();
        self.after_move(moved)
    }

    pub fn select_previous(&mut self) -> Result<Option<usize>, D::Error> {
        let moved = self.list.select_previous();
        self.after_move(moved)
    }

    /// Re-renders the visible window.
    pub fn refresh(&mut self) -> Result<RenderOutcome, D::Error> {
        let text = self.list.compose();
        text::render(&mut self.display, &text)
    }

    /// Replaces the list view with a free-form message until the next mutation.
    pub fn show_message(&mut self, message: &str) -> Result<RenderOutcome, D::Error> {
        text::render(&mut self.display, message)
    }

    fn after_move(&mut self, moved: Option<usize>) -> Result<Option<usize>, D::Error> {
        let Some(selected) = moved else {
            return Ok(None);
        };

        let window = self.list.window();
        debug!(
            "list: cursor {} of {} window {}..{}",
            selected,
            self.list.len(),
            window.start,
            window.end
        );
        self.refresh()?;
        Ok(Some(selected))
    }
}
