use crate::error::{SpanningError, SpanningResult};

/// Tunables for one spanning run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpanningOptions {
    /// Stop as soon as the largest component holds at least this share of
    /// the targets. `1.0` runs until everything is joined or the grid is
    /// exhausted.
    pub stop_fraction: f64,
    /// Cells whose cost from the nearest target would exceed this are never
    /// expanded.
    pub max_cost: f64,
    /// Log progress every time this many more percent of the grid has been
    /// settled. `0` turns progress logging off.
    pub progress_step: u8,
    /// Keep the ordered list of connection events in the report.
    pub record_connections: bool,
}

impl Default for SpanningOptions {
    fn default() -> Self {
        Self {
            stop_fraction: 1.0,
            max_cost: f64::INFINITY,
            progress_step: 1,
            record_connections: true,
        }
    }
}

impl SpanningOptions {
    pub fn with_stop_fraction(mut self, fraction: f64) -> Self {
        self.stop_fraction = fraction;
        self
    }

    pub fn with_max_cost(mut self, max_cost: f64) -> Self {
        self.max_cost = max_cost;
        self
    }

    pub fn with_progress_step(mut self, step: u8) -> Self {
        self.progress_step = step;
        self
    }

    pub fn with_record_connections(mut self, record: bool) -> Self {
        self.record_connections = record;
        self
    }

    /// Reject values the search cannot honour.
    pub fn validate(&self) -> SpanningResult<()> {
        if !(self.stop_fraction > 0.0 && self.stop_fraction <= 1.0) {
            return Err(SpanningError::InvalidOptions {
                reason: format!("stop_fraction {} not in (0, 1]", self.stop_fraction),
            });
        }
        if self.max_cost.is_nan() || self.max_cost < 0.0 {
            return Err(SpanningError::InvalidOptions {
                reason: format!("max_cost {} must be non-negative", self.max_cost),
            });
        }
        Ok(())
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn partial_config_fills_defaults() {
        let opts: SpanningOptions = serde_json::from_str(r#"{"stop_fraction":0.9}"#).unwrap();
        assert_eq!(opts.stop_fraction, 0.9);
        assert_eq!(opts.progress_step, 1);
        assert!(opts.record_connections);
    }
}
