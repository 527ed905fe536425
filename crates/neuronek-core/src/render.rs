//! One frame, start to finish.

use std::time::SystemTime;

use crate::axis::{ChartLayout, TimeAxis};
use crate::canvas::GridCanvas;
use crate::config::RenderConfig;
use crate::decay::DecayModel;
use crate::error::ConfigError;
use crate::dosage::DosageEvent;
use crate::legend::Legend;
use crate::raster::CurveRasterizer;
use crate::substance::SubstanceTable;

#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// The canvas cannot hold the axes and at least one data column.
    TooSmall {
        width: usize,
        height: usize,
        min_width: usize,
        min_height: usize,
    },
    /// The config failed [`RenderConfig::validate`]; nothing was drawn.
    Misconfigured { reason: &'static str },
    Chart(GridCanvas),
}

impl Frame {
    pub fn canvas(&self) -> Option<&GridCanvas> {
        match self {
            Self::Chart(canvas) => Some(canvas),
            Self::TooSmall { .. } | Self::Misconfigured { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rendering {
    pub frame: Frame,
    pub legend: Legend,
}

impl Rendering {
    /// Canvas glyphs (or the placeholder), a blank line, then the legend.
    pub fn to_text(&self) -> String {
        let body = match &self.frame {
            Frame::Chart(canvas) => canvas.to_text(),
            Frame::TooSmall {
                width,
                height,
                min_width,
                min_height,
            } => format!("Terminal too small ({width}x{height}, need {min_width}x{min_height})"),
            Frame::Misconfigured { reason } => format!("Invalid render config: {reason}"),
        };
        format!("{body}\n\n{}", self.legend.to_text())
    }
}

/// Smallest `(width, height)` that is rasterized with `config`.
pub fn minimum_size(config: &RenderConfig) -> (usize, usize) {
    let (w, h) = ChartLayout::structural_minimum(config.gutters);
    (w.max(config.min_width), h.max(config.min_height))
}

/// Render `events` for every substance in `table` onto a `width` × `height`
/// canvas ending at `now`.
pub fn render(
    table: &SubstanceTable,
    events: &[DosageEvent],
    width: usize,
    height: usize,
    now: SystemTime,
    config: &RenderConfig,
) -> Rendering {
    let legend = Legend::build(table, events, now, config);

    if let Err(e) = config.validate() {
        let reason = match e {
            ConfigError::Invalid(reason) => reason,
            _ => "invalid render config",
        };
        log::warn!("not rendering: {reason}");
        return Rendering {
            frame: Frame::Misconfigured { reason },
            legend,
        };
    }

    let (min_width, min_height) = minimum_size(config);
    let layout = ChartLayout::new(width, height, config.gutters)
        .filter(|_| width >= min_width && height >= min_height);
    let Some(layout) = layout else {
        log::debug!("canvas {width}x{height} below minimum {min_width}x{min_height}");
        return Rendering {
            frame: Frame::TooSmall {
                width,
                height,
                min_width,
                min_height,
            },
            legend,
        };
    };

    let mut canvas = GridCanvas::blank(layout);
    canvas.draw_gridlines(config.gridline_interval, config.glyphs.gridline);
    canvas.draw_axes(&config.glyphs);

    let model = DecayModel::new(table, events, config.decay);
    let axis = TimeAxis::new(now, config.window);
    let rasterizer = CurveRasterizer::new(&model, &layout, &axis);
    for id in table.ids() {
        let cells = rasterizer.trace(id);
        canvas.paint_curve(id, &cells, &config.glyphs);
    }

    log::debug!(
        "rendered {width}x{height}: {} events, {} lit cells",
        events.len(),
        canvas.lit_cells().count()
    );

    Rendering {
        frame: Frame::Chart(canvas),
        legend,
    }
}
