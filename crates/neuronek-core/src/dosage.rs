//! Append-only dosage log.

use std::time::SystemTime;

use crate::error::DoseError;
use crate::substance::{SubstanceId, SubstanceTable};

/// One administration of a substance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DosageEvent {
    substance: SubstanceId,
    amount: f64,
    at: SystemTime,
}

impl DosageEvent {
    pub fn substance(&self) -> SubstanceId {
        self.substance
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn at(&self) -> SystemTime {
        self.at
    }
}

/// Events in insertion order. There is no way to edit or remove an event.
#[derive(Debug, Clone, Default)]
pub struct DoseLog {
    events: Vec<DosageEvent>,
}

impl DoseLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a dose. The amount must be positive and finite and the
    /// substance must belong to `table`.
    pub fn record(
        &mut self,
        table: &SubstanceTable,
        substance: SubstanceId,
        amount: f64,
        at: SystemTime,
    ) -> Result<&DosageEvent, DoseError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(DoseError::NonPositiveAmount(amount));
        }
        if !table.contains(substance) {
            return Err(DoseError::UnknownSubstance(substance));
        }
        self.events.push(DosageEvent {
            substance,
            amount,
            at,
        });
        log::debug!(
            "dose recorded: substance #{} amount {amount} ({} total)",
            substance.index(),
            self.events.len()
        );
        Ok(&self.events[self.events.len() - 1])
    }

    pub fn events(&self) -> &[DosageEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The last `n` recorded events, most recent first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &DosageEvent> {
        self.events.iter().rev().take(n)
    }
}
