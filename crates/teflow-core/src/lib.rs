pub mod demand;
pub mod descent;
pub mod network;
pub mod numerics;
pub mod report;
pub mod routing;
pub mod solver;
pub mod topology;

use std::fmt;

pub use network::{Commodity, Link, LinkId, Network, NodeId, Path};
pub use solver::{optimize, IterationRecord};

#[derive(Debug, Clone)]
pub enum TeError {
    InvalidInput(String),
}

impl fmt::Display for TeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeError::InvalidInput(message) => write!(f, "invalid input: {message}"),
        }
    }
}

impl std::error::Error for TeError {}

#[derive(Debug, Clone)]
pub struct SplitOptions {
    pub iterations: usize,
    pub saturation: f64,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            iterations: 200,
            saturation: numerics::DEFAULT_SATURATION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_match_contract() {
        let opts = SplitOptions::default();
        assert_eq!(opts.iterations, 200);
        assert_eq!(opts.saturation, 0.99);
    }

    #[test]
    fn error_display_carries_message() {
        let err = TeError::InvalidInput("capacity must be positive".to_string());
        assert_eq!(err.to_string(), "invalid input: capacity must be positive");
    }
}
