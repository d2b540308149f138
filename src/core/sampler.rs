use serde::{Deserialize, Serialize};

use crate::core::functions::{EvalState, FunctionParams, FunctionRegistry, MathFunction};
use crate::core::types::SamplePoint;

/// Integer walk over the domain window.
///
/// `t = i + j / scale` for `i` in `-count..=count - 2` and `j` in `0..scale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleDomain {
    pub count: i32,
    pub scale: i32,
}

impl SampleDomain {
    #[must_use]
    pub fn new(count: i32, scale: i32) -> Self {
        Self { count, scale }
    }

    /// A non-positive count or scale yields an empty walk instead of a
    /// division by zero.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.count < 1 || self.scale < 1
    }

    #[must_use]
    pub fn sample_count(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        let rows = 2 * i64::from(self.count) - 1;
        usize::try_from(rows * i64::from(self.scale)).unwrap_or(usize::MAX)
    }

    #[must_use]
    pub fn first_row(self) -> i64 {
        -i64::from(self.count)
    }

    #[must_use]
    pub fn last_row(self) -> i64 {
        i64::from(self.count) - 2
    }

    #[must_use]
    pub fn delta(self) -> f64 {
        1.0 / f64::from(self.scale)
    }
}

/// Counters gathered while walking one curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SamplerStats {
    pub evaluated: usize,
    pub discarded: usize,
    pub segments: usize,
}

/// Segment candidate between two consecutive accepted samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveSegment {
    pub from: SamplePoint,
    pub to: SamplePoint,
}

/// Lazy walk of one parametric curve.
///
/// Every step evaluates X first and publishes it as `last_x` before Y runs,
/// so a Y function reading `last_x` sees the value of the same sample.
/// Non-finite samples are dropped and break the current run; the scan itself
/// never stops early.
pub struct CurveSampler<'a> {
    function_x: MathFunction,
    function_y: MathFunction,
    params: &'a FunctionParams,
    state: &'a mut EvalState,
    domain: SampleDomain,
    row: i64,
    column: i64,
    previous: Option<SamplePoint>,
    stats: SamplerStats,
}

impl<'a> CurveSampler<'a> {
    pub fn new(
        registry: &FunctionRegistry,
        index_x: i32,
        index_y: i32,
        domain: SampleDomain,
        params: &'a FunctionParams,
        state: &'a mut EvalState,
    ) -> Self {
        Self {
            function_x: registry.lookup(index_x),
            function_y: registry.lookup(index_y),
            params,
            state,
            domain,
            row: domain.first_row(),
            column: 0,
            previous: None,
            stats: SamplerStats::default(),
        }
    }

    /// Rewinds to the first sample. Scratch and random state are not rewound.
    pub fn restart(&mut self) {
        self.row = self.domain.first_row();
        self.column = 0;
        self.previous = None;
        self.stats = SamplerStats::default();
    }

    #[must_use]
    pub fn stats(&self) -> SamplerStats {
        self.stats
    }

    fn next_parameter(&mut self) -> Option<f64> {
        if self.domain.is_empty() || self.row > self.domain.last_row() {
            return None;
        }
        let t = self.row as f64 + self.column as f64 * self.domain.delta();
        self.column += 1;
        if self.column >= i64::from(self.domain.scale) {
            self.column = 0;
            self.row += 1;
        }
        Some(t)
    }

    fn evaluate(&mut self, t: f64) -> SamplePoint {
        let x = self.function_x.evaluate(self.params, self.state, t);
        self.state.scratch.last_x = x;
        let y = self.function_y.evaluate(self.params, self.state, t);
        self.state.scratch.last_y = y;
        SamplePoint::new(t, x, y)
    }
}

impl Iterator for CurveSampler<'_> {
    type Item = CurveSegment;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(t) = self.next_parameter() {
            let sample = self.evaluate(t);
            self.stats.evaluated += 1;

            if !sample.x.is_finite() || !sample.y.is_finite() {
                self.stats.discarded += 1;
                self.previous = None;
                continue;
            }

            if let Some(from) = self.previous.replace(sample) {
                self.stats.segments += 1;
                return Some(CurveSegment { from, to: sample });
            }
        }
        None
    }
}
