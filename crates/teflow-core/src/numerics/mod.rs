mod cost;

pub use cost::{curvature, marginal_cost};

pub const EPSILON: f64 = 1e-9;
pub const CONSERVATION_EPSILON: f64 = 1e-6;
pub const DEFAULT_SATURATION: f64 = 0.99;
