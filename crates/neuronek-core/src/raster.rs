//! Curve rasterization with a pen model.
//!
//! A column whose intensity is at or below the noise floor lifts the pen: no
//! glyph, and no stroke joins it to the next sample. Between two pen-down
//! columns at different rows, the rows strictly between them are filled in
//! the earlier column, which gives a stair-stepped continuous line.

use crate::axis::{ChartLayout, TimeAxis};
use crate::decay::DecayModel;
use crate::substance::SubstanceId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    /// Sampled position of the curve.
    Point,
    /// Vertical connector between two samples.
    Stroke,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LitCell {
    pub row: usize,
    pub column: usize,
    pub mark: Mark,
}

pub struct CurveRasterizer<'a> {
    model: &'a DecayModel<'a>,
    layout: &'a ChartLayout,
    axis: &'a TimeAxis,
}

impl<'a> CurveRasterizer<'a> {
    pub fn new(model: &'a DecayModel<'a>, layout: &'a ChartLayout, axis: &'a TimeAxis) -> Self {
        Self {
            model,
            layout,
            axis,
        }
    }

    /// Lit cells of one substance's curve, in non-decreasing column order.
    pub fn trace(&self, substance: SubstanceId) -> Vec<LitCell> {
        let mut cells = Vec::new();
        let mut pen: Option<usize> = None;

        for sample in self.model.sample_curve(substance, self.layout, self.axis) {
            if !self.model.is_visible(sample.value) {
                pen = None;
                continue;
            }

            let row = self.layout.row_for(sample.value);
            if let Some(prev) = pen
                && prev != row
            {
                let (top, bottom) = (prev.min(row), prev.max(row));
                cells.extend((top + 1..bottom).map(|r| LitCell {
                    row: r,
                    column: sample.column - 1,
                    mark: Mark::Stroke,
                }));
            }

            cells.push(LitCell {
                row,
                column: sample.column,
                mark: Mark::Point,
            });
            pen = Some(row);
        }

        cells
    }
}
