//! # neuronek-core
//!
//! **Substance intensity curves on a character grid.**
//!
//! `neuronek-core` turns an append-only log of dosage events into per-substance
//! intensity curves (superposed exponential decays), samples them across a
//! rolling time window, and rasterizes them onto a fixed-size glyph canvas with
//! gridlines, axes and a legend.
//!
//! ## Quick Start
//!
//! ```
//! use std::time::{Duration, SystemTime};
//! use neuronek_core::{DoseLog, Frame, RenderConfig, SubstanceTable, render};
//!
//! let table = SubstanceTable::builtin();
//! let caffeine = table.find_by_symbol('C').unwrap();
//!
//! let now = SystemTime::now();
//! let mut doses = DoseLog::new();
//! doses
//!     .record(&table, caffeine, 200.0, now - Duration::from_secs(2 * 3600))
//!     .unwrap();
//!
//! let rendering = render(&table, doses.events(), 80, 20, now, &RenderConfig::default());
//! assert!(matches!(rendering.frame, Frame::Chart(_)));
//! println!("{}", rendering.to_text());
//! ```
//!
//! ## Architecture
//!
//! Doses → DecayModel → TimeAxis sampling → CurveRasterizer → GridCanvas → Legend
//!
//! Every frame is recomputed from scratch. Nothing here keeps state between
//! frames, and nothing in the render path returns an error: inputs are
//! validated when the [`SubstanceTable`] and [`DoseLog`] are built, and
//! undersized canvases degrade to [`Frame::TooSmall`].

pub mod attribution;
pub mod axis;
pub mod canvas;
pub mod config;
pub mod decay;
pub mod dosage;
pub mod error;
pub mod legend;
pub mod raster;
pub mod render;
pub mod substance;

pub use attribution::{PointAttributor, attribute};
pub use axis::{ChartLayout, TimeAxis};
pub use canvas::{Cell, GridCanvas, Layer};
pub use config::{DecayParams, ElapsedFormat, Glyphs, Gutters, MAX_WINDOW, RenderConfig};
pub use decay::{DecayModel, IntensitySample, dose_contribution};
pub use dosage::{DoseLog, DosageEvent};
pub use error::{ConfigError, DoseError, SubstanceError};
pub use legend::{Legend, LegendEntry, RecentDose, format_elapsed};
pub use raster::{CurveRasterizer, LitCell, Mark};
pub use render::{Frame, Rendering, minimum_size, render};
pub use substance::{Rgb, Substance, SubstanceId, SubstanceSpec, SubstanceTable};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
