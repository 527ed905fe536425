//! Substance legend and the recent-doses strip.

use std::time::{Duration, SystemTime};

use crate::config::{ElapsedFormat, RenderConfig};
use crate::dosage::DosageEvent;
use crate::substance::{Rgb, SubstanceId, SubstanceTable};

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

/// Render an elapsed duration with the chosen policy.
pub fn format_elapsed(elapsed: Duration, format: ElapsedFormat) -> String {
    let secs = elapsed.as_secs();
    match format {
        ElapsedFormat::Coarse => match secs {
            s if s < MINUTE => "now".to_string(),
            s if s < HOUR => format!("{}m", s / MINUTE),
            s if s < DAY => format!("{}h", s / HOUR),
            s => format!("{}d", s / DAY),
        },
        ElapsedFormat::Composite => {
            let pair = |major: u64, major_unit: &str, minor: u64, minor_unit: &str| {
                if minor == 0 {
                    format!("{major}{major_unit}")
                } else {
                    format!("{major}{major_unit} {minor}{minor_unit}")
                }
            };
            match secs {
                s if s < MINUTE => format!("{s}s"),
                s if s < HOUR => format!("{}m", s / MINUTE),
                s if s < DAY => pair(s / HOUR, "h", (s % HOUR) / MINUTE, "m"),
                s => pair(s / DAY, "d", (s % DAY) / HOUR, "h"),
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub substance: SubstanceId,
    pub marker: char,
    pub name: String,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecentDose {
    pub substance: SubstanceId,
    pub symbol: char,
    pub color: Rgb,
    pub amount: f64,
    pub elapsed: Duration,
    /// `<symbol> <amount><unit> (<elapsed>)`
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Legend {
    pub entries: Vec<LegendEntry>,
    pub recent: Vec<RecentDose>,
}

impl Legend {
    pub fn build(
        table: &SubstanceTable,
        events: &[DosageEvent],
        now: SystemTime,
        config: &RenderConfig,
    ) -> Self {
        let entries = table
            .iter()
            .map(|(id, s)| LegendEntry {
                substance: id,
                marker: config.glyphs.legend_marker,
                name: s.name().to_string(),
                color: s.color(),
            })
            .collect();

        let recent = events
            .iter()
            .rev()
            .filter_map(|e| {
                let substance = table.get(e.substance())?;
                // a timestamp ahead of `now` (clock skew) reads as "just now"
                let elapsed = now.duration_since(e.at()).unwrap_or_default();
                let label = format!(
                    "{} {:.0}{} ({})",
                    substance.symbol(),
                    e.amount(),
                    config.dose_unit,
                    format_elapsed(elapsed, config.elapsed_format)
                );
                Some(RecentDose {
                    substance: e.substance(),
                    symbol: substance.symbol(),
                    color: substance.color(),
                    amount: e.amount(),
                    elapsed,
                    label,
                })
            })
            .take(config.recent_limit)
            .collect();

        Self { entries, recent }
    }

    /// `● Caffeine  ● Nicotine    Recent: C 200mg (2h) · N 2mg (now)`
    pub fn to_text(&self) -> String {
        let mut out = self
            .entries
            .iter()
            .map(|e| format!("{} {}", e.marker, e.name))
            .collect::<Vec<_>>()
            .join("  ");
        if !self.recent.is_empty() {
            if !out.is_empty() {
                out.push_str("    ");
            }
            out.push_str("Recent: ");
            out.push_str(
                &self
                    .recent
                    .iter()
                    .map(|r| r.label.as_str())
                    .collect::<Vec<_>>()
                    .join(" · "),
            );
        }
        out
    }
}
