use termion::{clear, cursor};

use crate::board::Cell;
use crate::game::session::Markers;
use crate::rules::{Topology, GRAVITY_COLUMNS};

const GUIDE_GAP: &str = "    ";
const GRAVITY_RULE: &str = "---------------------------";
const GRAVITY_GUIDE: &str = " 1   2   3   4   5   6   7 ";

/// Builds each frame into a buffer before it is written out in one go.
pub struct GameDisplay {
    buffer: String,
    clear_screen: bool,
}

impl Default for GameDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl GameDisplay {
    /// A display that clears the terminal before every board.
    pub fn new() -> Self {
        Self {
            buffer: String::with_capacity(1024),
            clear_screen: true,
        }
    }

    /// A display that emits no terminal control sequences.
    pub fn plain() -> Self {
        Self {
            clear_screen: false,
            ..Self::new()
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        if self.clear_screen {
            self.buffer
                .push_str(&format!("{}{}", cursor::Goto(1, 1), clear::All));
        }
    }

    /// Renders the board, with the index guide beside grid boards when
    /// `show_guide` is set. Gravity boards always carry their column guide.
    pub fn render_board(
        &mut self,
        rules: &Topology,
        cells: &[Cell],
        markers: Markers,
        show_guide: bool,
    ) -> &str {
        self.buffer.push('\n');
        match rules {
            Topology::Grid(grid) => self.render_grid(grid.size(), cells, markers, show_guide),
            Topology::Gravity(_) => self.render_gravity(cells, markers),
        }
        &self.buffer
    }

    fn render_grid(&mut self, size: usize, cells: &[Cell], markers: Markers, show_guide: bool) {
        let token_lines: Vec<String> = cells
            .chunks(size)
            .map(|row| join_cells(row, markers))
            .collect();
        let index_lines: Vec<String> = (0..size)
            .map(|row| {
                (row * size..(row + 1) * size)
                    .map(|index| {
                        if size == 3 {
                            index.to_string()
                        } else {
                            format!("{:>2}", index)
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(" | ")
            })
            .collect();
        let horizontal = "-".repeat(3 * (size - 1) + size);

        for (row, tokens) in token_lines.iter().enumerate() {
            if show_guide {
                self.buffer.push_str(&format!(
                    " {}{}{}\n",
                    tokens, GUIDE_GAP, index_lines[row]
                ));
            } else {
                self.buffer.push_str(&format!(" {}\n", tokens));
            }

            if row + 1 == size {
                break;
            }

            if !show_guide {
                self.buffer.push_str(&format!(" {}\n", horizontal));
            } else if size == 3 {
                self.buffer
                    .push_str(&format!(" {}{}{}\n", horizontal, GUIDE_GAP, horizontal));
            } else {
                // two-digit indices widen the guide
                self.buffer.push_str(&format!(
                    " {}{}{}----\n",
                    horizontal, GUIDE_GAP, horizontal
                ));
            }
        }
        self.buffer.push('\n');
    }

    fn render_gravity(&mut self, cells: &[Cell], markers: Markers) {
        for row in cells.chunks(GRAVITY_COLUMNS) {
            self.buffer
                .push_str(&format!(" {}\n", join_cells(row, markers)));
        }
        self.buffer.push_str(GRAVITY_RULE);
        self.buffer.push('\n');
        self.buffer.push_str(GRAVITY_GUIDE);
        self.buffer.push_str("\n\n");
    }

    pub fn push_line(&mut self, line: &str) {
        self.buffer.push_str(line);
        self.buffer.push('\n');
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }
}

fn join_cells(row: &[Cell], markers: Markers) -> String {
    row.iter()
        .map(|&cell| markers.symbol(cell).to_string())
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{GameRules, GravityRules, GridRules};

    fn grid(size: usize) -> Topology {
        Topology::Grid(GridRules::new(size).unwrap())
    }

    fn sample_cells(rules: &Topology) -> Vec<Cell> {
        let mut cells = rules.empty_board();
        cells[1] = Cell::Human;
        cells[4] = Cell::Computer;
        cells[6] = Cell::Human;
        cells
    }

    #[test]
    fn test_grid_with_guide() {
        let rules = grid(3);
        let mut display = GameDisplay::plain();
        display.clear();
        let rendered = display.render_board(&rules, &sample_cells(&rules), Markers::new(true), true);

        let expected = [
            "",
            "   | X |      0 | 1 | 2",
            " ---------    ---------",
            "   | O |      3 | 4 | 5",
            " ---------    ---------",
            " X |   |      6 | 7 | 8",
            "",
        ];
        assert_eq!(rendered, expected.join("\n") + "\n");
    }

    #[test]
    fn test_grid_without_guide() {
        let rules = grid(3);
        let mut display = GameDisplay::plain();
        display.render_board(&rules, &sample_cells(&rules), Markers::new(false), false);

        let lines: Vec<&str> = display.buffer().lines().collect();
        assert_eq!(
            lines,
            vec!["", "   | O |  ", " ---------", "   | X |  ", " ---------", " O |   |  ", ""]
        );
    }

    #[test]
    fn test_larger_grid_guide_is_padded() {
        let rules = grid(4);
        let mut display = GameDisplay::plain();
        display.render_board(&rules, &rules.empty_board(), Markers::new(true), true);

        let lines: Vec<&str> = display.buffer().lines().collect();
        assert_eq!(lines[1], "   |   |   |       0 |  1 |  2 |  3");
        assert_eq!(lines[2], " -------------    -----------------");
        assert_eq!(lines[7], "   |   |   |      12 | 13 | 14 | 15");
    }

    #[test]
    fn test_gravity_board() {
        let rules = Topology::Gravity(GravityRules);
        let mut cells = rules.empty_board();
        cells[35] = Cell::Human;
        cells[36] = Cell::Computer;
        let mut display = GameDisplay::plain();
        display.render_board(&rules, &cells, Markers::new(true), false);

        let lines: Vec<&str> = display.buffer().lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[1], "   |   |   |   |   |   |  ");
        assert_eq!(lines[6], " X | O |   |   |   |   |  ");
        assert_eq!(lines[7], GRAVITY_RULE);
        assert_eq!(lines[8], GRAVITY_GUIDE);
    }

    #[test]
    fn test_clear_emits_control_sequence() {
        let mut display = GameDisplay::new();
        display.clear();
        assert!(display.buffer().starts_with('\u{1b}'));

        let mut plain = GameDisplay::plain();
        plain.clear();
        assert!(plain.buffer().is_empty());
    }
}
