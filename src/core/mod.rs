pub mod functions;
pub mod mathf;
pub mod noise;
pub mod random;
pub mod sampler;
pub mod types;
pub mod viewport;

pub use functions::{
    EvalState, FunctionBody, FunctionCapability, FunctionParams, FunctionRegistry, MathFunction,
    Scratch,
};
pub use noise::perlin_noise;
pub use random::{RandomStream, gaussian_random};
pub use sampler::{CurveSampler, CurveSegment, SampleDomain, SamplerStats};
pub use types::{SamplePoint, Viewport};
pub use viewport::{DrawSegment, RenderMode, ViewportMapper, is_culled};
