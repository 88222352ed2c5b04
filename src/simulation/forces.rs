//! Force / acceleration contributors for the n-body engine
//!
//! Defines the [`Acceleration`] trait and two inverse-square laws:
//! - [`CentralMass`]: a fixed dominant mass pulling every body
//! - [`PairwiseGravity`]: mutual attraction between every pair of bodies
//!
//! Terms are evaluated against a positions snapshot passed separately from
//! the bodies, so the integrator can evaluate predicted positions without
//! touching the committed state. Separations at or below the radius sum are
//! reported as a [`Contact`] before any division happens.

use std::fmt;

use super::states::Body;
use super::vector::Vec2;

/// Distances at or below this are treated as coincident bodies
pub const MIN_SEPARATION: f64 = 1e-12;

/// One side of a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyRef {
    Body(usize),
    Central,
}

impl fmt::Display for BodyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyRef::Body(i) => write!(f, "body {i}"),
            BodyRef::Central => write!(f, "central body"),
        }
    }
}

/// Two participants closer than their radius sum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub first: BodyRef,
    pub second: BodyRef,
}

/// Compares the actual distance, not its square, against the radius sum
fn touching(distance: f64, radius_sum: f64) -> bool {
    distance <= radius_sum || distance <= MIN_SEPARATION
}

/// Collection of acceleration terms
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per body
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Compute total accelerations for `bodies` placed at `positions`
    /// - `out[i]` is overwritten with the sum of contributions from all terms
    /// - stops at the first contact any term reports
    pub fn accumulate_accels(
        &self,
        bodies: &[Body],
        positions: &[Vec2],
        out: &mut [Vec2],
    ) -> Result<(), Contact> {
        for a in out.iter_mut() {
            *a = Vec2::zeros();
        }
        for term in &self.terms {
            term.acceleration(bodies, positions, out)?;
        }
        Ok(())
    }

    /// First contact any term finds at `positions`, without evaluating forces
    pub fn first_contact(&self, bodies: &[Body], positions: &[Vec2]) -> Option<Contact> {
        self.terms.iter().find_map(|term| term.contact(bodies, positions))
    }

    /// Summed potential energy of every term
    pub fn potential_energy(&self, bodies: &[Body], positions: &[Vec2]) -> f64 {
        self.terms
            .iter()
            .map(|term| term.potential_energy(bodies, positions))
            .sum()
    }
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Acceleration source operating on a positions snapshot
/// Implementations add their contribution into `out[i]` for each body;
/// `bodies[i]` supplies mass and radius, `positions[i]` the location
pub trait Acceleration {
    fn acceleration(&self, bodies: &[Body], positions: &[Vec2], out: &mut [Vec2]) -> Result<(), Contact>;

    /// Contact between participants of this term, if any
    ///
    /// Terms without a notion of size never report one.
    fn contact(&self, _bodies: &[Body], _positions: &[Vec2]) -> Option<Contact> {
        None
    }

    fn potential_energy(&self, bodies: &[Body], positions: &[Vec2]) -> f64;
}

/// Fixed heavy body; the bodies it pulls do not move it
#[derive(Debug, Clone, PartialEq)]
pub struct CentralMass {
    pub g: f64,
    pub mass: f64,
    pub position: Vec2,
    pub radius: f64,
}

impl CentralMass {
    /// Acceleration of a light body at `position`: `-G M r / |r|^3`
    pub fn acceleration_at(&self, position: &Vec2, body_radius: f64) -> Option<Vec2> {
        let r = position.sub(&self.position);
        let distance = r.magnitude();
        if touching(distance, self.radius + body_radius) {
            return None;
        }
        // unit vector, then divided by |r| twice more
        let direction = r.normalize().ok()?;
        Some(direction.scale(-self.g * self.mass / (distance * distance)))
    }
}

impl Acceleration for CentralMass {
    fn acceleration(&self, bodies: &[Body], positions: &[Vec2], out: &mut [Vec2]) -> Result<(), Contact> {
        for (i, (b, x)) in bodies.iter().zip(positions).enumerate() {
            let a = self.acceleration_at(x, b.radius).ok_or(Contact {
                first: BodyRef::Central,
                second: BodyRef::Body(i),
            })?;
            out[i] = out[i].add(&a);
        }
        Ok(())
    }

    fn contact(&self, bodies: &[Body], positions: &[Vec2]) -> Option<Contact> {
        bodies
            .iter()
            .zip(positions)
            .position(|(b, x)| touching(x.sub(&self.position).magnitude(), self.radius + b.radius))
            .map(|i| Contact {
                first: BodyRef::Central,
                second: BodyRef::Body(i),
            })
    }

    fn potential_energy(&self, bodies: &[Body], positions: &[Vec2]) -> f64 {
        bodies
            .iter()
            .zip(positions)
            .map(|(b, x)| -self.g * self.mass * b.mass / x.sub(&self.position).magnitude())
            .sum()
    }
}

/// Newtonian attraction between every unordered pair of bodies
#[derive(Debug, Clone, PartialEq)]
pub struct PairwiseGravity {
    pub g: f64,
}

impl PairwiseGravity {
    /// Contributions `(on i, on j)` for one pair, or `None` on contact
    ///
    /// The field `G r / |r|^3` with `r = x_i - x_j` is computed once and
    /// applied with opposite signs, so equal masses give exactly negated
    /// accelerations.
    pub fn pair_accelerations(&self, xi: &Vec2, bi: &Body, xj: &Vec2, bj: &Body) -> Option<(Vec2, Vec2)> {
        let r = xi.sub(xj);
        let distance = r.magnitude();
        if touching(distance, bi.radius + bj.radius) {
            return None;
        }
        let inv_r3 = 1.0 / (distance * distance * distance);
        let field = r.scale(self.g * inv_r3);
        Some((field.scale(-bj.mass), field.scale(bi.mass)))
    }
}

impl Acceleration for PairwiseGravity {
    fn acceleration(&self, bodies: &[Body], positions: &[Vec2], out: &mut [Vec2]) -> Result<(), Contact> {
        let n = bodies.len();
        // Loop over each unordered pair (i, j) with i < j
        for i in 0..n {
            for j in (i + 1)..n {
                let (on_i, on_j) = self
                    .pair_accelerations(&positions[i], &bodies[i], &positions[j], &bodies[j])
                    .ok_or(Contact {
                        first: BodyRef::Body(i),
                        second: BodyRef::Body(j),
                    })?;
                out[i] = out[i].add(&on_i);
                out[j] = out[j].add(&on_j);
            }
        }
        Ok(())
    }

    fn contact(&self, bodies: &[Body], positions: &[Vec2]) -> Option<Contact> {
        let n = bodies.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let distance = positions[i].sub(&positions[j]).magnitude();
                if touching(distance, bodies[i].radius + bodies[j].radius) {
                    return Some(Contact {
                        first: BodyRef::Body(i),
                        second: BodyRef::Body(j),
                    });
                }
            }
        }
        None
    }

    fn potential_energy(&self, bodies: &[Body], positions: &[Vec2]) -> f64 {
        let n = bodies.len();
        let mut u = 0.0;
        for i in 0..n {
            for j in (i + 1)..n {
                let r = positions[i].sub(&positions[j]).magnitude();
                u -= self.g * bodies[i].mass * bodies[j].mass / r;
            }
        }
        u
    }
}
