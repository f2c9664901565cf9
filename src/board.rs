//! Game board representation and collision detection

use ratatui::style::Color;

/// Standard board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 22;
/// Hidden rows at the top of the board for spawning
pub const HIDDEN_ROWS: usize = 2;
pub const VISIBLE_ROWS: usize = BOARD_HEIGHT - HIDDEN_ROWS;

/// A board coordinate. Row 0 is the top row, rows grow downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub column: i32,
    pub row: i32,
}

impl Coord {
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// The coordinate `rows` further down
    pub fn down(self, rows: i32) -> Self {
        Self::new(self.column, self.row + rows)
    }
}

/// The four cells occupied by a piece
pub type Cells = [Coord; 4];

/// A cell on the board - either empty or filled with a color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Color),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }
}

type Row = [Cell; BOARD_WIDTH];

const EMPTY_ROW: Row = [Cell::Empty; BOARD_WIDTH];

/// The game board
#[derive(Debug, Clone)]
pub struct Board {
    /// Grid stored as [row][col], row 0 is the top
    rows: [Row; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            rows: [EMPTY_ROW; BOARD_HEIGHT],
        }
    }

    /// Get the cell at a coordinate, `None` if outside the grid
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        let (row, col) = Self::index(coord)?;
        Some(self.rows[row][col])
    }

    fn index(coord: Coord) -> Option<(usize, usize)> {
        let row = usize::try_from(coord.row).ok()?;
        let col = usize::try_from(coord.column).ok()?;
        (row < BOARD_HEIGHT && col < BOARD_WIDTH).then_some((row, col))
    }

    /// Whether a single coordinate collides.
    ///
    /// Anything left, right or below the grid collides. Rows above the top
    /// (negative) never do, so pieces may poke out of the spawn buffer.
    pub fn is_cell_blocked(&self, coord: Coord) -> bool {
        if coord.column < 0 || coord.column >= BOARD_WIDTH as i32 {
            return true;
        }
        if coord.row >= BOARD_HEIGHT as i32 {
            return true;
        }
        if coord.row < 0 {
            return false;
        }
        self.rows[coord.row as usize][coord.column as usize].is_filled()
    }

    /// Check if any of the given coordinates collides
    pub fn is_blocked(&self, cells: &[Coord]) -> bool {
        cells.iter().any(|&coord| self.is_cell_blocked(coord))
    }

    /// Write cells into the board, then remove full rows.
    ///
    /// Returns the number of rows cleared. Cells above the top are dropped.
    pub fn settle(&mut self, cells: &[Coord], color: Color) -> usize {
        for &coord in cells {
            if let Some((row, col)) = Self::index(coord) {
                self.rows[row][col] = Cell::Filled(color);
            }
        }
        self.clear_lines()
    }

    /// Shift `cells` down until one more row would collide
    pub fn landing_spot(&self, cells: Cells) -> Cells {
        let mut spot = cells;
        loop {
            let next = spot.map(|coord| coord.down(1));
            if self.is_blocked(&next) {
                return spot;
            }
            spot = next;
        }
    }

    /// Remove full rows and refill from the top, returning how many went
    fn clear_lines(&mut self) -> usize {
        let mut write_row = BOARD_HEIGHT;

        // Compact surviving rows toward the bottom
        for read_row in (0..BOARD_HEIGHT).rev() {
            if !self.is_line_full(read_row) {
                write_row -= 1;
                if write_row != read_row {
                    self.rows[write_row] = self.rows[read_row];
                }
            }
        }

        // Fill the top with empty rows
        for row in 0..write_row {
            self.rows[row] = EMPTY_ROW;
        }

        write_row
    }

    /// Check if a line is completely filled
    fn is_line_full(&self, row: usize) -> bool {
        self.rows[row].iter().all(|cell| cell.is_filled())
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Iterate every filled cell with its color
    pub fn filled_cells(&self) -> impl Iterator<Item = (Coord, Color)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().filter_map(move |(col, cell)| match cell {
                Cell::Filled(color) => Some((Coord::new(col as i32, row as i32), *color)),
                Cell::Empty => None,
            })
        })
    }

    /// Check if the board is completely empty
    pub fn is_empty(&self) -> bool {
        self.rows
            .iter()
            .all(|row| row.iter().all(|cell| cell.is_empty()))
    }
}
