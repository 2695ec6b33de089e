use serde::{Deserialize, Serialize};

use super::types::{Cell, Mark};

const BOARD_SIZE: usize = 3;
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Nine cells in row-major order: index `i` is row `i / 3`, column `i % 3`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from a 9-character layout of `O`, `X` and `.`;
    /// whitespace is ignored.
    #[cfg(test)]
    pub fn from_layout(layout: &str) -> Self {
        let mut board = Self::new();
        let symbols = layout.chars().filter(|c| !c.is_whitespace());
        for (index, symbol) in symbols.enumerate() {
            board.cells[index] = match symbol {
                'O' => Cell::Circle,
                'X' => Cell::Cross,
                _ => Cell::Empty,
            };
        }
        board
    }

    pub fn is_valid_index(index: usize) -> bool {
        index < CELL_COUNT
    }

    pub fn get(&self, index: usize) -> Cell {
        assert!(Self::is_valid_index(index), "cell index {} out of range", index);
        self.cells[index]
    }

    pub fn is_empty_at(&self, index: usize) -> bool {
        self.get(index).is_empty()
    }

    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    pub(super) fn set(&mut self, index: usize, mark: Mark) {
        debug_assert!(self.is_empty_at(index), "cell {} written twice", index);
        self.cells[index] = Cell::from(mark);
    }

    pub(super) fn clear(&mut self) {
        self.cells = [Cell::Empty; CELL_COUNT];
    }

    pub fn available_moves(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(index, _)| index)
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    pub fn count(&self, mark: Mark) -> usize {
        let target = Cell::from(mark);
        self.cells.iter().filter(|&&cell| cell == target).count()
    }
}
