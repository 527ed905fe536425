//! Fixed-size glyph buffer with layered drawing.
//!
//! Layers are painted in order (gridlines, axes, curves) and each one
//! overwrites whatever is under it. Curve cells carry the id of the substance
//! that painted them, so colouring never has to re-derive ownership.

use crate::axis::ChartLayout;
use crate::config::Glyphs;
use crate::raster::{LitCell, Mark};
use crate::substance::SubstanceId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layer {
    #[default]
    Blank,
    Gridline,
    Axis,
    Curve(Mark),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub layer: Layer,
    /// Substance that painted this cell; `None` for everything but curves.
    pub owner: Option<SubstanceId>,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        glyph: ' ',
        layer: Layer::Blank,
        owner: None,
    };

    pub fn is_curve(&self) -> bool {
        matches!(self.layer, Layer::Curve(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridCanvas {
    layout: ChartLayout,
    cells: Vec<Cell>,
}

impl GridCanvas {
    pub fn blank(layout: ChartLayout) -> Self {
        Self {
            layout,
            cells: vec![Cell::BLANK; layout.width() * layout.height()],
        }
    }

    pub fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    pub fn width(&self) -> usize {
        self.layout.width()
    }

    pub fn height(&self) -> usize {
        self.layout.height()
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&Cell> {
        if column >= self.width() {
            return None;
        }
        self.cells.get(row * self.width() + column)
    }

    /// Writes outside the canvas are dropped.
    fn put(&mut self, row: usize, column: usize, cell: Cell) {
        if row < self.height() && column < self.width() {
            let w = self.width();
            self.cells[row * w + column] = cell;
        }
    }

    /// Horizontal gridlines every `interval` rows across the data columns.
    pub fn draw_gridlines(&mut self, interval: usize, glyph: char) {
        let cell = Cell {
            glyph,
            layer: Layer::Gridline,
            owner: None,
        };
        for row in (0..self.layout.plot_rows()).step_by(interval.max(1)) {
            for column in self.layout.data_columns() {
                self.put(row, column, cell);
            }
        }
    }

    /// Left vertical rule, bottom horizontal rule and the corner between them.
    pub fn draw_axes(&mut self, glyphs: &Glyphs) {
        let axis = |glyph| Cell {
            glyph,
            layer: Layer::Axis,
            owner: None,
        };
        let (axis_row, axis_col) = (self.layout.axis_row(), self.layout.axis_column());
        for row in 0..axis_row {
            self.put(row, axis_col, axis(glyphs.axis_vertical));
        }
        for column in 0..self.width() {
            self.put(axis_row, column, axis(glyphs.axis_horizontal));
        }
        self.put(axis_row, axis_col, axis(glyphs.axis_corner));
    }

    /// Paint one traced curve. Shared cells go to whoever paints last.
    pub fn paint_curve(&mut self, substance: SubstanceId, cells: &[LitCell], glyphs: &Glyphs) {
        for lit in cells {
            let glyph = match lit.mark {
                Mark::Point => glyphs.point,
                Mark::Stroke => glyphs.stroke,
            };
            self.put(
                lit.row,
                lit.column,
                Cell {
                    glyph,
                    layer: Layer::Curve(lit.mark),
                    owner: Some(substance),
                },
            );
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width())
    }

    /// Every curve cell as `(row, column, cell)`.
    pub fn lit_cells(&self) -> impl Iterator<Item = (usize, usize, &Cell)> {
        let w = self.width();
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_curve())
            .map(move |(i, c)| (i / w, i % w, c))
    }

    /// Glyphs only, one line per row.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity((self.width() + 1) * self.height() * 3);
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.extend(row.iter().map(|c| c.glyph));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Gutters;

    fn canvas(width: usize, height: usize) -> GridCanvas {
        GridCanvas::blank(ChartLayout::new(width, height, Gutters::default()).unwrap())
    }

    #[test]
    fn blank_canvas_is_spaces() {
        let c = canvas(5, 3);
        assert_eq!(c.to_text(), "     \n     \n     ");
        assert_eq!(c.lit_cells().count(), 0);
    }

    #[test]
    fn axes_frame_the_plot() {
        let mut c = canvas(6, 4);
        c.draw_axes(&Glyphs::default());
        assert_eq!(c.to_text(), "│     \n│     \n│     \n└─────");
        assert_eq!(c.get(3, 0).unwrap().layer, Layer::Axis);
    }

    #[test]
    fn gridlines_skip_gutters() {
        let mut c = canvas(6, 8);
        c.draw_gridlines(5, '·');
        let lines: Vec<String> = c.to_text().lines().map(String::from).collect();
        assert_eq!(lines[0], " ···· ");
        assert_eq!(lines[5], " ···· ");
        assert_eq!(lines[1], "      ");
        // row 7 is the axis row, never a gridline
        assert_eq!(lines[7], "      ");
    }

    #[test]
    fn axes_overwrite_gridlines() {
        let mut c = canvas(6, 6);
        c.draw_gridlines(5, '·');
        c.draw_axes(&Glyphs::default());
        assert_eq!(c.get(0, 0).unwrap().glyph, '│');
        assert_eq!(c.get(0, 1).unwrap().glyph, '·');
    }

    #[test]
    fn later_curve_wins_shared_cell() {
        let mut c = canvas(6, 6);
        let glyphs = Glyphs::default();
        let a = SubstanceId(0);
        let b = SubstanceId(1);
        let point = |row, column| LitCell {
            row,
            column,
            mark: Mark::Point,
        };
        c.paint_curve(a, &[point(2, 2), point(2, 3)], &glyphs);
        c.paint_curve(
            b,
            &[LitCell {
                row: 2,
                column: 3,
                mark: Mark::Stroke,
            }],
            &glyphs,
        );
        assert_eq!(c.get(2, 2).unwrap().owner, Some(a));
        let shared = c.get(2, 3).unwrap();
        assert_eq!(shared.owner, Some(b));
        assert_eq!(shared.layer, Layer::Curve(Mark::Stroke));
        assert_eq!(c.lit_cells().count(), 2);
    }

    #[test]
    fn out_of_bounds_reads_and_writes_are_ignored() {
        let mut c = canvas(4, 3);
        c.paint_curve(
            SubstanceId(0),
            &[LitCell {
                row: 10,
                column: 10,
                mark: Mark::Point,
            }],
            &Glyphs::default(),
        );
        assert!(c.get(10, 10).is_none());
        assert!(c.get(0, 4).is_none());
        assert_eq!(c.lit_cells().count(), 0);
    }
}
