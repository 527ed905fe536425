//! Which substance owns a lit cell.
//!
//! The fast path is [`attribute`]: the canvas stores the painter's id in each
//! curve cell. [`PointAttributor::derive_owner`] recomputes ownership from the
//! decay model instead. It is O(substances) per cell, so O(substances² × width)
//! per frame when run over a whole canvas; it exists to audit the stored tags.

use crate::axis::{ChartLayout, TimeAxis};
use crate::canvas::GridCanvas;
use crate::decay::DecayModel;
use crate::substance::SubstanceId;

/// Owner recorded in the canvas at `(row, column)`.
pub fn attribute(canvas: &GridCanvas, row: usize, column: usize) -> Option<SubstanceId> {
    canvas.get(row, column).and_then(|cell| cell.owner)
}

pub struct PointAttributor<'a> {
    model: &'a DecayModel<'a>,
    layout: &'a ChartLayout,
    axis: &'a TimeAxis,
}

impl<'a> PointAttributor<'a> {
    pub fn new(model: &'a DecayModel<'a>, layout: &'a ChartLayout, axis: &'a TimeAxis) -> Self {
        Self {
            model,
            layout,
            axis,
        }
    }

    /// Substance whose sampled curve point lands on `(row, column)`.
    ///
    /// Substances are tried last-declared first, the same order in which the
    /// last painter wins on the canvas, so both rules pick the same owner.
    /// Only curve points can be derived; strokes have no sample of their own.
    pub fn derive_owner(&self, row: usize, column: usize) -> Option<SubstanceId> {
        if !self.layout.data_columns().contains(&column) || row >= self.layout.plot_rows() {
            return None;
        }
        let t = self.axis.time_at(self.layout, column);
        self.model.table().ids().rev().find(|&id| {
            let value = self.model.intensity(id, t);
            self.model.is_visible(value) && self.layout.row_for(value) == row
        })
    }
}
