//! Per-particle collision step: wall reflection first, then a first-match scan
//! over the other particles.

use crate::core::bounds::Bounds;
use crate::core::event::{Collision, CollisionObserver};
use crate::core::particle::{Particle, DIM};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Predicate deciding whether a tentative position touches another particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactRule {
    /// Circle-circle overlap: `|tentative - other| <= r_i + r_j`.
    ///
    /// Flips the components along which the stepped particle approaches the other one;
    /// if it approaches along none, every nonzero component flips.
    #[default]
    Overlap,
    /// An axis registers when the tentative coordinate equals the other particle's
    /// coordinate exactly.
    ExactCoordinate,
}

impl ContactRule {
    /// Axes to flip if `tentative` (moving with `v`, radius `radius`) contacts `other`,
    /// or `None` when the pair is not in contact.
    ///
    /// Under `Overlap` a contact may flip no axis at all (stationary particle).
    pub fn contact_axes(
        self,
        tentative: &[f64; DIM],
        v: &[f64; DIM],
        radius: f64,
        other: &Particle,
    ) -> Option<[bool; DIM]> {
        let mut hit = [false; DIM];
        match self {
            ContactRule::ExactCoordinate => {
                for (h, (&t, &o)) in hit.iter_mut().zip(tentative.iter().zip(&other.r)) {
                    *h = t == o;
                }
                hit.iter().any(|&h| h).then_some(hit)
            }
            ContactRule::Overlap => {
                let mut d = [0.0_f64; DIM];
                for (dk, (&o, &t)) in d.iter_mut().zip(other.r.iter().zip(tentative)) {
                    *dk = o - t;
                }
                let r_sum = radius + other.radius;
                if dot(&d, &d) > r_sum * r_sum {
                    return None;
                }
                for (h, (&dk, &vk)) in hit.iter_mut().zip(d.iter().zip(v)) {
                    *h = dk * vk > 0.0;
                }
                if !hit.iter().any(|&h| h) {
                    // separating or coincident centres: reverse every moving component
                    for (h, &vk) in hit.iter_mut().zip(v) {
                        *h = vk != 0.0;
                    }
                }
                Some(hit)
            }
        }
    }
}

/// What a single call to [`step_particle`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// No contact; the full tentative position was committed.
    Free,
    /// Wall contact on the flagged axes; particle scan skipped.
    Wall { x: bool, y: bool },
    /// First particle contact found during the scan.
    Contact(Collision),
}

/// Advance particle `index` by one tick of length `dt`.
///
/// Order of checks:
/// 1. tentative position `r + v * dt`;
/// 2. per-axis wall test; a hit flips that velocity component and keeps the old
///    coordinate, a miss commits the tentative coordinate;
/// 3. any wall hit ends the step;
/// 4. otherwise scan the other particles in ascending index order against their
///    current positions; the first contact flips the hit components, commits the
///    remaining tentative coordinates, notifies `observer` and ends the step;
/// 5. no contact commits the whole tentative position.
///
/// Errors (raised before anything is mutated):
/// - `Error::InvalidTimeStep` if `dt` is not finite and positive.
/// - `Error::IndexOutOfRange` if `index >= particles.len()`.
/// - `Error::InvalidBounds` if `bounds` is degenerate.
pub fn step_particle<O: CollisionObserver + ?Sized>(
    index: usize,
    particles: &mut [Particle],
    dt: f64,
    bounds: &Bounds,
    rule: ContactRule,
    observer: &mut O,
) -> Result<StepOutcome> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(Error::InvalidTimeStep(dt));
    }
    let len = particles.len();
    let p = particles
        .get(index)
        .ok_or(Error::IndexOutOfRange { index, len })?;
    bounds.validate()?;

    let radius = p.radius;
    let v0 = p.v;
    let tentative = p.tentative_position(dt);

    let mut r = p.r;
    let mut v = v0;
    let mut wall = [false; DIM];
    for k in 0..DIM {
        if bounds.wall_contact(k, tentative[k], radius) {
            v[k] = -v[k];
            wall[k] = true;
        } else {
            r[k] = tentative[k];
        }
    }

    if wall.iter().any(|&w| w) {
        log::debug!("particle {index} wall contact (x: {}, y: {})", wall[0], wall[1]);
        commit(&mut particles[index], r, v);
        return Ok(StepOutcome::Wall {
            x: wall[0],
            y: wall[1],
        });
    }

    let found = particles.iter().enumerate().find_map(|(j, other)| {
        if j == index {
            return None;
        }
        rule.contact_axes(&tentative, &v0, radius, other).map(|hit| (j, hit))
    });

    let Some((j, hit)) = found else {
        commit(&mut particles[index], tentative, v0);
        return Ok(StepOutcome::Free);
    };

    // r still holds the tentative coordinates here; undo them on the flipped axes
    let r_old = particles[index].r;
    for k in 0..DIM {
        if hit[k] {
            v[k] = -v[k];
            r[k] = r_old[k];
        }
    }
    commit(&mut particles[index], r, v);

    let collision = Collision {
        i: index,
        j,
        x: hit[0],
        y: hit[1],
    };
    observer.on_collision(&collision);
    Ok(StepOutcome::Contact(collision))
}

#[inline]
fn commit(p: &mut Particle, r: [f64; DIM], v: [f64; DIM]) {
    p.r = r;
    p.v = v;
}

#[inline]
pub(crate) fn dot(a: &[f64; DIM], b: &[f64; DIM]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
