//! High-level runtime engine settings
//!
//! Selects the stepping scheme and which force terms a `Scenario` wires up

use std::fmt;

/// Finite-difference scheme applied to every body each step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scheme {
    /// Averaged-acceleration second-order displacement update
    SecondOrder,
    /// Heun predictor-corrector
    #[default]
    Heun,
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::SecondOrder => write!(f, "second-order"),
            Scheme::Heun => write!(f, "heun"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Engine {
    pub scheme: Scheme, // heun or second-order
    pub pairwise: bool, // false = bodies only feel the central mass
}
