//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - fixed step size `dt` and total step count `num_points`,
//! - playback sampling interval `points_inter`,
//! - gravitational constant `g`

use crate::error::ConfigError;

/// Sampling interval used when a scenario does not set one
pub const DEFAULT_POINTS_INTER: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub dt: f64, // step size
    pub num_points: usize, // total steps
    pub points_inter: usize, // steps between drawn segments
    pub g: f64, // gravitational constant
}

impl Parameters {
    pub fn new(g: f64, dt: f64, num_points: usize) -> Self {
        Self {
            dt,
            num_points,
            points_inter: DEFAULT_POINTS_INTER,
            g,
        }
    }

    pub fn with_points_inter(mut self, points_inter: usize) -> Self {
        self.points_inter = points_inter;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.dt.is_finite() {
            return Err(ConfigError::NonFinite { what: "dt".into() });
        }
        if self.dt <= 0.0 {
            return Err(ConfigError::NonPositiveStep(self.dt));
        }
        if self.num_points == 0 {
            return Err(ConfigError::NoSteps);
        }
        if self.points_inter == 0 {
            return Err(ConfigError::ZeroSamplingInterval);
        }
        if !self.g.is_finite() {
            return Err(ConfigError::NonFinite { what: "G".into() });
        }
        Ok(())
    }
}
