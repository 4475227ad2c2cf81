use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Cumulated time of one builder stage over all glyphs of a unit.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
    /// Number of glyphs that reached the stage.
    pub glyphs: usize,
}

/// Timing trace of one processing unit, stages in first-run order.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn stage(&self, label: &str) -> Option<&StageTiming> {
        self.stages.iter().find(|s| s.label == label)
    }
}

/// Accumulates per-stage durations while glyphs go through the builder.
#[derive(Debug, Default)]
pub struct StageClock {
    stages: Vec<(&'static str, Duration, usize)>,
}

impl StageClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` and charge its duration to `label`.
    pub fn time<T>(&mut self, label: &'static str, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let out = f();
        self.record(label, start.elapsed());
        out
    }

    pub fn record(&mut self, label: &'static str, elapsed: Duration) {
        match self.stages.iter_mut().find(|(l, _, _)| *l == label) {
            Some((_, total, runs)) => {
                *total += elapsed;
                *runs += 1;
            }
            None => self.stages.push((label, elapsed, 1)),
        }
    }

    pub fn into_breakdown(self, total: Duration) -> TimingBreakdown {
        TimingBreakdown {
            total_ms: to_ms(total),
            stages: self
                .stages
                .into_iter()
                .map(|(label, elapsed, glyphs)| StageTiming {
                    label: label.to_string(),
                    elapsed_ms: to_ms(elapsed),
                    glyphs,
                })
                .collect(),
        }
    }
}

fn to_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}
