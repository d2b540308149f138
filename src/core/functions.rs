use std::f64::consts::{FRAC_PI_2, PI};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::mathf::{self, DEG_TO_RAD, RAD_TO_DEG};
use crate::core::noise::perlin_noise;
use crate::core::random::{RandomStream, gaussian_random};
use crate::error::{PlotError, PlotResult};

/// Tunable scalars read by parameterized registry entries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FunctionParams {
    #[serde(default)]
    pub mean: f64,
    #[serde(default = "default_variance")]
    pub variance: f64,
    #[serde(default = "default_balance")]
    pub balance: f64,
}

fn default_variance() -> f64 {
    1.0
}

fn default_balance() -> f64 {
    1.0
}

impl Default for FunctionParams {
    fn default() -> Self {
        Self {
            mean: 0.0,
            variance: default_variance(),
            balance: default_balance(),
        }
    }
}

/// Outputs of the most recent X and Y evaluations.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Scratch {
    pub last_x: f64,
    pub last_y: f64,
}

/// Mutable evaluation state shared by every function in a frame.
#[derive(Debug, Clone, Default)]
pub struct EvalState {
    pub scratch: Scratch,
    pub random: RandomStream,
}

/// What a registry entry is allowed to touch while evaluating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FunctionCapability {
    Pure,
    Parametric,
    ScratchReader,
    StreamConsumer,
}

#[derive(Clone, Copy)]
pub enum FunctionBody {
    Pure(fn(f64) -> f64),
    Parametric(fn(&FunctionParams, f64) -> f64),
    ScratchReader(fn(&Scratch, f64) -> f64),
    StreamConsumer(fn(&FunctionParams, &mut RandomStream, f64) -> f64),
}

impl FunctionBody {
    #[must_use]
    pub fn capability(self) -> FunctionCapability {
        match self {
            Self::Pure(_) => FunctionCapability::Pure,
            Self::Parametric(_) => FunctionCapability::Parametric,
            Self::ScratchReader(_) => FunctionCapability::ScratchReader,
            Self::StreamConsumer(_) => FunctionCapability::StreamConsumer,
        }
    }
}

impl std::fmt::Debug for FunctionBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.capability())
    }
}

/// One named unary transform of the catalog.
#[derive(Debug, Clone, Copy)]
pub struct MathFunction {
    pub name: &'static str,
    pub body: FunctionBody,
}

impl MathFunction {
    #[must_use]
    pub const fn new(name: &'static str, body: FunctionBody) -> Self {
        Self { name, body }
    }

    #[must_use]
    pub fn capability(&self) -> FunctionCapability {
        self.body.capability()
    }

    /// Evaluates `f(t)`. Scratch is only read here; the caller owns the
    /// X-then-Y write order.
    pub fn evaluate(&self, params: &FunctionParams, state: &mut EvalState, t: f64) -> f64 {
        match self.body {
            FunctionBody::Pure(f) => f(t),
            FunctionBody::Parametric(f) => f(params, t),
            FunctionBody::ScratchReader(f) => f(&state.scratch, t),
            FunctionBody::StreamConsumer(f) => f(params, &mut state.random, t),
        }
    }
}

const IDENTITY: MathFunction = MathFunction::new("identity/t", FunctionBody::Pure(|t| t));

/// Fixed, ordered catalog of named functions.
///
/// Entry 0 is the fallback for every out-of-range lookup. The catalog is never
/// resized after construction.
#[derive(Debug, Clone)]
pub struct FunctionRegistry {
    entries: IndexMap<&'static str, FunctionBody>,
}

impl FunctionRegistry {
    pub fn new(functions: impl IntoIterator<Item = MathFunction>) -> PlotResult<Self> {
        let mut entries = IndexMap::new();
        for function in functions {
            if entries.insert(function.name, function.body).is_some() {
                return Err(PlotError::InvalidData(format!(
                    "duplicate function name `{}`",
                    function.name
                )));
            }
        }
        if entries.is_empty() {
            return Err(PlotError::InvalidData(
                "function registry must not be empty".to_owned(),
            ));
        }
        Ok(Self { entries })
    }

    /// Builds the stock catalog.
    #[must_use]
    pub fn builtin() -> Self {
        let entries = builtin_functions()
            .into_iter()
            .map(|function| (function.name, function.body))
            .collect();
        Self { entries }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves `index`, falling back to entry 0 when out of range.
    #[must_use]
    pub fn lookup(&self, index: i32) -> MathFunction {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.entries.get_index(i))
            .or_else(|| self.entries.first())
            .map_or(IDENTITY, |(name, body)| MathFunction::new(*name, *body))
    }

    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.keys().copied().collect()
    }

    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.entries.get_index_of(name)
    }

    #[must_use]
    pub fn capability(&self, index: i32) -> FunctionCapability {
        self.lookup(index).capability()
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn gaussian_density(p: &FunctionParams, x: f64) -> f64 {
    1.0 / (p.variance * (2.0 * PI).sqrt())
        * (-(x - p.mean).powi(2) / (2.0 * p.variance.powi(2))).exp()
}

fn hashed_uv_threshold(p: &FunctionParams, t: f64) -> f64 {
    let u = mathf::repeat(t, 1.0);
    let v = (t / 2.0).trunc();
    let w = (u * 12.9898 + v * 78.233) * 43_758.5453;
    if mathf::frac(w) >= p.balance { 1.0 } else { 0.0 }
}

fn heart_x(p: &FunctionParams, r: f64) -> f64 {
    p.balance * (1.0 - r.sin()) * r.cos()
}

fn heart_y(p: &FunctionParams, r: f64) -> f64 {
    p.balance * (1.0 - r.sin()) * r.sin()
}

fn sinh(x: f64) -> f64 {
    (x.exp() - (-x).exp()) / 2.0
}

fn cosh(x: f64) -> f64 {
    (x.exp() + (-x).exp()) / 2.0
}

#[rustfmt::skip]
fn builtin_functions() -> Vec<MathFunction> {
    use FunctionBody::{Parametric, Pure, ScratchReader, StreamConsumer};

    vec![
        IDENTITY,
        MathFunction::new("last/x", ScratchReader(|s, _| s.last_x)),
        MathFunction::new("last/y", ScratchReader(|s, _| s.last_y)),
        MathFunction::new("basic/0", Pure(|_| 0.0)),
        MathFunction::new("basic/x", Pure(|x| x)),
        MathFunction::new("basic/|x|", Pure(f64::abs)),
        MathFunction::new("basic/1÷x", Pure(|x| 1.0 / x)),
        MathFunction::new("basic/1÷x^a", Parametric(|p, x| 1.0 / x.powf(p.balance))),
        MathFunction::new("basic/sign(x)", Pure(mathf::sign)),
        MathFunction::new("basic/repeat(x, a)", Parametric(|p, x| mathf::repeat(x, p.balance))),
        MathFunction::new("basic/deg→rad", Pure(|x| x * DEG_TO_RAD)),
        MathFunction::new("basic/rad→deg", Pure(|x| x * RAD_TO_DEG)),
        MathFunction::new("shader/step(a, x)", Parametric(|p, x| if x >= p.balance { 1.0 } else { 0.0 })),
        MathFunction::new("shader/frac(x)", Pure(mathf::frac)),
        MathFunction::new("power/x^2", Pure(|x| x * x)),
        MathFunction::new("power/x^3", Pure(|x| x * x * x)),
        MathFunction::new("power/x^0.5", Pure(|x| x.powf(0.5))),
        MathFunction::new("power/x^0.1", Pure(|x| x.powf(0.1))),
        MathFunction::new("power/x^-0.5", Pure(|x| x.powf(-0.5))),
        MathFunction::new("power/x^-2", Pure(|x| x.powf(-2.0))),
        MathFunction::new("power/x^a", Parametric(|p, x| x.powf(p.balance))),
        MathFunction::new("exp/e^x", Pure(f64::exp)),
        MathFunction::new("exp/0.5^x", Pure(|x| 0.5f64.powf(x))),
        MathFunction::new("exp/2^x", Pure(|x| 2f64.powf(x))),
        MathFunction::new("exp/3^x", Pure(|x| 3f64.powf(x))),
        MathFunction::new("exp/x^x", Pure(|x| x.powf(x))),
        MathFunction::new("log/ln(x)", Pure(f64::ln)),
        MathFunction::new("log/log(x, 2)", Pure(|x| mathf::log_base(x, 2.0))),
        MathFunction::new("log/log(x, 0.5)", Pure(|x| mathf::log_base(x, 0.5))),
        MathFunction::new("log/x·ln(x)", Pure(|x| x * x.ln())),
        MathFunction::new("log/x·log(x, 2)", Pure(|x| x * mathf::log_base(x, 2.0))),
        MathFunction::new("log/log(x, 10)", Pure(f64::log10)),
        MathFunction::new("log/x·log(x, 10)", Pure(|x| x * mathf::log_base(x, 10.0))),
        MathFunction::new("trig/sin(x)", Pure(f64::sin)),
        MathFunction::new("trig/cos(x)", Pure(f64::cos)),
        MathFunction::new("trig/tan(x)", Pure(f64::tan)),
        MathFunction::new("trig/sec(x)", Pure(|x| 1.0 / x.cos())),
        MathFunction::new("trig/csc(x)", Pure(|x| 1.0 / x.sin())),
        MathFunction::new("trig/cot(x)", Pure(|x| 1.0 / x.tan())),
        MathFunction::new("trig/asin(x)", Pure(f64::asin)),
        MathFunction::new("trig/acos(x)", Pure(f64::acos)),
        MathFunction::new("trig/atan(x)", Pure(f64::atan)),
        MathFunction::new("trig/atan2(x, 1)", Pure(|x| x.atan2(1.0))),
        MathFunction::new("trig/sin(x)÷x", Pure(|x| x.sin() / x)),
        MathFunction::new("trig/sin(1÷x)", Pure(|x| (1.0 / x).sin())),
        MathFunction::new("trig/cos(1÷x)", Pure(|x| (1.0 / x).cos())),
        MathFunction::new("trig/x·sin(1÷x)", Pure(|x| x * (1.0 / x).sin())),
        MathFunction::new("trig/cos(½π - x)", Pure(|x| (FRAC_PI_2 - x).cos())),
        MathFunction::new("trig/sin(x) + cos(x)", Pure(|x| x.sin() + x.cos())),
        MathFunction::new("trig/7sin(x) + 2cos(x)", Pure(|x| 7.0 * x.sin() + 2.0 * x.cos())),
        MathFunction::new("trig/7sin(x)^2 + 2cos(x)", Pure(|x| 7.0 * x.sin() * x.sin() + 2.0 * x.cos())),
        MathFunction::new("trig/7sin(x^2) + 2cos(x)", Pure(|x| 7.0 * (x * x).sin() + 2.0 * x.cos())),
        MathFunction::new(
            "trig/7sin(x^3) + 2cos(log(x, 2)) - tan(x^5)",
            Pure(|x| 7.0 * (x * x * x).sin() + 2.0 * mathf::log_base(x, 2.0).cos() - x.powf(5.0).tan()),
        ),
        MathFunction::new("poly/-5x^2 + 3x + 2", Pure(|x| -5.0 * x * x + 3.0 * x + 2.0)),
        MathFunction::new("poly/(-5x^2 + 3x + 2)'", Pure(|x| -10.0 * x + 3.0)),
        MathFunction::new("poly/5x^7 + 3x^4", Pure(|x| 5.0 * x.powf(7.0) + 3.0 * x.powf(4.0))),
        MathFunction::new("poly/(5x^7 + 3x^4)'", Pure(|x| 35.0 * x.powf(6.0) + 12.0 * x.powf(3.0))),
        MathFunction::new("gauss/density(x; μ, σ)", Parametric(gaussian_density)),
        MathFunction::new("gauss/random(μ, σ)", StreamConsumer(|p, rng, _| gaussian_random(rng, p.mean, p.variance))),
        MathFunction::new("heart/x = a(1 - sin r)cos r", Parametric(heart_x)),
        MathFunction::new("heart/y = a(1 - sin r)sin r", Parametric(heart_y)),
        MathFunction::new("diamond/x = pingpong(t, a)", Parametric(|p, t| mathf::ping_pong(t, p.balance))),
        MathFunction::new(
            "diamond/y = pingpong(t + ½a, a) - ½a",
            Parametric(|p, t| mathf::ping_pong(t + 0.5 * p.balance, p.balance) - 0.5 * p.balance),
        ),
        MathFunction::new("water/x = a(1 - sin r)cos r", Parametric(heart_x)),
        MathFunction::new("water/y = sin r", Pure(f64::sin)),
        MathFunction::new("circle/x = a·sin r", Parametric(|p, r| p.balance * r.sin())),
        MathFunction::new("circle/y = a·cos r", Parametric(|p, r| p.balance * r.cos())),
        MathFunction::new("spiral/x = a·r·cos r", Parametric(|p, r| p.balance * r * r.cos())),
        MathFunction::new("spiral/y = a·r·sin r", Parametric(|p, r| p.balance * r * r.sin())),
        MathFunction::new("hyperbolic/sinh(x)", Pure(sinh)),
        MathFunction::new("hyperbolic/cosh(x)", Pure(cosh)),
        MathFunction::new("hyperbolic/tanh(x)", Pure(|x| sinh(x) / cosh(x))),
        MathFunction::new("hyperbolic/sech(x)", Pure(|x| 1.0 / cosh(x))),
        MathFunction::new("hyperbolic/csch(x)", Pure(|x| 1.0 / sinh(x))),
        MathFunction::new("hyperbolic/coth(x)", Pure(|x| cosh(x) / sinh(x))),
        MathFunction::new("noise/perlin(a·x, 0)", Parametric(|p, x| perlin_noise(x * p.balance, 0.0))),
        MathFunction::new("noise/perlin(0, a·x)", Parametric(|p, x| perlin_noise(0.0, x * p.balance))),
        MathFunction::new("noise/perlin(a·x, a·x)", Parametric(|p, x| perlin_noise(x * p.balance, x * p.balance))),
        MathFunction::new("random/rnd·x", StreamConsumer(|_, rng, x| rng.value() * x)),
        MathFunction::new(
            "random/rnd·x (seeded by x)",
            StreamConsumer(|_, rng, x| {
                rng.reseed_from_int(x as i32);
                rng.value() * x
            }),
        ),
        MathFunction::new("random/uv ≥ a", Parametric(hashed_uv_threshold)),
        MathFunction::new("gamma/x^2.2", Pure(|x| x.powf(2.2))),
        MathFunction::new("gamma/x^0.45", Pure(|x| x.powf(0.45))),
    ]
}
