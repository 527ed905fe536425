//! Canvas geometry and the column → time mapping.
//!
//! ```text
//!  col 0   first data col            last data col
//!    │ · · · · · · · · · · · · · · · · ·          row 0 (intensity 1.0)
//!    │                                  ▏
//!    │ · · · · · · · · · · · · · · · · ·
//!    │                                  ▏         row plot_rows-1 (intensity 0.0)
//!    └───────────────────────────────────         axis row
//!      now - window                   now
//! ```

use std::ops::RangeInclusive;
use std::time::{Duration, SystemTime};

use crate::config::Gutters;

/// Size of a canvas and where its plot area sits inside it.
///
/// Shared by the sampler, rasterizer, canvas and attributor so that sampling
/// and drawing stay column-aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartLayout {
    width: usize,
    height: usize,
    gutters: Gutters,
}

impl ChartLayout {
    /// `None` unless there is room for the axes, one data column and one plot row.
    pub fn new(width: usize, height: usize, gutters: Gutters) -> Option<Self> {
        let (min_w, min_h) = Self::structural_minimum(gutters);
        if gutters.left == 0 || gutters.bottom == 0 || width < min_w || height < min_h {
            return None;
        }
        Some(Self {
            width,
            height,
            gutters,
        })
    }

    /// Smallest `(width, height)` that [`ChartLayout::new`] accepts.
    pub fn structural_minimum(gutters: Gutters) -> (usize, usize) {
        (gutters.left + gutters.right + 1, gutters.bottom + 1)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn first_data_column(&self) -> usize {
        self.gutters.left
    }

    pub fn last_data_column(&self) -> usize {
        self.width - 1 - self.gutters.right
    }

    pub fn data_columns(&self) -> RangeInclusive<usize> {
        self.first_data_column()..=self.last_data_column()
    }

    /// Rows available to curves (row 0 is the top).
    pub fn plot_rows(&self) -> usize {
        self.height - self.gutters.bottom
    }

    pub fn axis_row(&self) -> usize {
        self.plot_rows()
    }

    pub fn axis_column(&self) -> usize {
        self.gutters.left - 1
    }

    /// `floor((plot_rows - 1) * (1 - intensity))`, with intensity clamped to [0, 1].
    pub fn row_for(&self, intensity: f64) -> usize {
        let span = (self.plot_rows() - 1) as f64;
        let level = if intensity.is_nan() {
            0.0
        } else {
            intensity.clamp(0.0, 1.0)
        };
        let row = (span * (1.0 - level)).floor() as usize;
        row.min(self.plot_rows() - 1)
    }
}

/// The rolling display window `[now - window, now]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeAxis {
    now: SystemTime,
    window: Duration,
}

impl TimeAxis {
    pub fn new(now: SystemTime, window: Duration) -> Self {
        Self { now, window }
    }

    pub fn now(&self) -> SystemTime {
        self.now
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Time shown at the leftmost data column.
    pub fn start(&self) -> SystemTime {
        self.now
            .checked_sub(self.window)
            .unwrap_or(SystemTime::UNIX_EPOCH)
    }

    /// Time sampled at `column`. Columns outside the data range are clamped
    /// into it.
    pub fn time_at(&self, layout: &ChartLayout, column: usize) -> SystemTime {
        let first = layout.first_data_column();
        let last = layout.last_data_column();
        let column = column.clamp(first, last);
        if column == last {
            return self.now;
        }
        if column == first {
            return self.start();
        }
        // measured back from `now` so the result never passes it
        let progress = (column - first) as f64 / (last - first) as f64;
        let back = Duration::try_from_secs_f64(self.window.as_secs_f64() * (1.0 - progress))
            .unwrap_or(self.window);
        self.now
            .checked_sub(back)
            .unwrap_or(SystemTime::UNIX_EPOCH)
            .max(self.start())
    }

    /// Time between two adjacent data columns.
    pub fn step(&self, layout: &ChartLayout) -> Duration {
        let span = layout.last_data_column() - layout.first_data_column();
        if span == 0 {
            self.window
        } else {
            self.window / span as u32
        }
    }
}
