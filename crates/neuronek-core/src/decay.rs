//! Exponential decay superposition.
//!
//! Each dose contributes `amount * 0.5^(elapsed / half_life) / reference_dose`.
//! Contributions at or below the noise floor are dropped, the rest are summed,
//! and the sum saturates at 1.0: overlapping doses never draw above full scale.

use std::time::{Duration, SystemTime};

use crate::axis::{ChartLayout, TimeAxis};
use crate::config::DecayParams;
use crate::dosage::DosageEvent;
use crate::substance::{SubstanceId, SubstanceTable};

/// Normalized remaining effect of one dose after `elapsed`.
pub fn dose_contribution(
    amount: f64,
    elapsed: Duration,
    half_life: Duration,
    reference_dose: f64,
) -> f64 {
    let half_lives = elapsed.as_secs_f64() / half_life.as_secs_f64();
    amount * 0.5f64.powf(half_lives) / reference_dose
}

/// One point of a sampled curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntensitySample {
    pub column: usize,
    pub time: SystemTime,
    pub value: f64,
}

/// Read-only view over the substance table and dose events.
#[derive(Debug, Clone, Copy)]
pub struct DecayModel<'a> {
    table: &'a SubstanceTable,
    events: &'a [DosageEvent],
    params: DecayParams,
}

impl<'a> DecayModel<'a> {
    pub fn new(table: &'a SubstanceTable, events: &'a [DosageEvent], params: DecayParams) -> Self {
        Self {
            table,
            events,
            params,
        }
    }

    pub fn table(&self) -> &'a SubstanceTable {
        self.table
    }

    pub fn params(&self) -> &DecayParams {
        &self.params
    }

    /// Intensity of `substance` at `t`, in [0, 1].
    ///
    /// Only doses strictly before `t` count. Unknown ids yield 0.
    pub fn intensity(&self, substance: SubstanceId, t: SystemTime) -> f64 {
        let Some(half_life) = self.table.get(substance).map(|s| s.half_life()) else {
            return 0.0;
        };

        let total: f64 = self
            .events
            .iter()
            .filter(|e| e.substance() == substance)
            .filter_map(|e| match t.duration_since(e.at()) {
                Ok(elapsed) if !elapsed.is_zero() => Some(dose_contribution(
                    e.amount(),
                    elapsed,
                    half_life,
                    self.params.reference_dose,
                )),
                _ => None,
            })
            .filter(|&c| c > self.params.noise_floor)
            .sum();

        total.min(1.0)
    }

    /// True when `value` is high enough to be drawn.
    pub fn is_visible(&self, value: f64) -> bool {
        value > self.params.noise_floor
    }

    /// Sample `substance` at every data column of `layout`, left to right.
    pub fn sample_curve(
        &self,
        substance: SubstanceId,
        layout: &ChartLayout,
        axis: &TimeAxis,
    ) -> Vec<IntensitySample> {
        layout
            .data_columns()
            .map(|column| {
                let time = axis.time_at(layout, column);
                IntensitySample {
                    column,
                    time,
                    value: self.intensity(substance, time),
                }
            })
            .collect()
    }
}
