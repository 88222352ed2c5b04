//! Core state types for the N-body simulation.
//!
//! - `Body`: one point mass with its kinematic state
//! - `System`: the caller-owned collection of bodies plus the simulation time `t`
//!
//! Both are plain data; the integrator mutates them in place.

use super::vector::Vec2;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub name: Option<String>, // display label
    pub mass: f64, // constant for the run
    pub radius: f64, // collision radius
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2, // last evaluated acceleration
}

impl Body {
    /// Point body with zero radius and zero initial acceleration
    pub fn new(mass: f64, position: Vec2, velocity: Vec2) -> Self {
        Self {
            name: None,
            mass,
            radius: 0.0,
            position,
            velocity,
            acceleration: Vec2::zeros(),
        }
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn momentum(&self) -> Vec2 {
        self.velocity.scale(self.mass)
    }

    fn validate(&self, index: usize) -> Result<(), ConfigError> {
        if !self.mass.is_finite() {
            return Err(ConfigError::NonFinite { what: format!("mass of body {index}") });
        }
        if self.mass <= 0.0 {
            return Err(ConfigError::NonPositiveMass { body: index, mass: self.mass });
        }
        if !self.radius.is_finite() {
            return Err(ConfigError::NonFinite { what: format!("radius of body {index}") });
        }
        if self.radius < 0.0 {
            return Err(ConfigError::NegativeRadius { body: index, radius: self.radius });
        }
        if !self.position.is_finite() {
            return Err(ConfigError::NonFinite { what: format!("position of body {index}") });
        }
        if !self.velocity.is_finite() {
            return Err(ConfigError::NonFinite { what: format!("velocity of body {index}") });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct System {
    pub bodies: Vec<Body>,
    pub t: f64, // time
}

impl System {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies, t: 0.0 }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Copy of every body's current position, in body order
    pub fn positions(&self) -> Vec<Vec2> {
        self.bodies.iter().map(|b| b.position).collect()
    }

    /// Display label for body `i`: its name, or `body i`
    pub fn label(&self, i: usize) -> String {
        match self.bodies.get(i).and_then(|b| b.name.as_deref()) {
            Some(name) => name.to_string(),
            None => format!("body {i}"),
        }
    }

    /// Sum of `m * v` over all bodies
    pub fn total_momentum(&self) -> Vec2 {
        self.bodies
            .iter()
            .fold(Vec2::zeros(), |acc, b| acc.add(&b.momentum()))
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies
            .iter()
            .map(|b| 0.5 * b.mass * b.velocity.magnitude_squared())
            .sum()
    }

    /// Reject systems the integrator cannot start from
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bodies.is_empty() {
            return Err(ConfigError::EmptySystem);
        }
        for (i, b) in self.bodies.iter().enumerate() {
            b.validate(i)?;
        }
        Ok(())
    }
}
