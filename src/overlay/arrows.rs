//! Arrow bars: ordered fixed-size cells tracking level/phase progress.

/// Discrete cell states. Cells carry no animation; progress is shown by
/// recoloring in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellState {
    #[default]
    Unvisited,
    Current,
    Completed,
    Failed,
}

/// A row of cells with a settable visible length. Length changes trim or
/// extend the visible range without reordering; hidden cells keep their
/// state.
pub struct ArrowBar {
    cells: Vec<CellState>,
    visible: usize,
    base: usize,
}

impl ArrowBar {
    pub fn new(base: usize) -> Self {
        Self {
            cells: vec![CellState::Unvisited; base],
            visible: base,
            base,
        }
    }

    pub fn visible(&self) -> usize {
        self.visible
    }

    pub fn visible_states(&self) -> &[CellState] {
        &self.cells[..self.visible.min(self.cells.len())]
    }

    pub fn state(&self, index: usize) -> Option<CellState> {
        self.cells.get(index).copied()
    }

    /// Set how many cells are visible, growing the backing row if needed.
    pub fn set_length(&mut self, length: usize) {
        if length > self.cells.len() {
            self.cells.resize(length, CellState::Unvisited);
        }
        self.visible = length;
    }

    /// Explicit index-based state write. Out-of-range writes are ignored.
    pub fn set_state(&mut self, index: usize, state: CellState) {
        if let Some(cell) = self.cells.get_mut(index) {
            *cell = state;
        }
    }

    /// Scene reset: everything unvisited, visible length back to base.
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            *cell = CellState::Unvisited;
        }
        self.visible = self.base;
    }
}
