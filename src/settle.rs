//! Frame-by-frame settling of a particle field under load.
//!
//! Every frame each particle proposes a small random move with a downward
//! bias that fades with depth. The move is accepted only when the particle's
//! probe box at the new position touches no other particle of the field.
//! Particles are processed in field order, so a particle that moves early in a
//! frame can block one that is evaluated later.

use std::collections::HashSet;
use std::thread;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::SurfaceError;
use crate::field::ParticleField;
use crate::geometry::{point, Rect};
use crate::surface::{ShapeId, Surface};

/// Tuning of one settling animation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SettleProfile {
    /// Number of frames to run.
    pub frames: usize,
    /// Smallest move factor, reached by deep particles.
    pub move_floor: i32,
    /// Move factor at the top of the soil band.
    pub move_cap: i32,
    /// Largest horizontal jitter in either direction.
    pub jitter: i32,
    /// Pause between frames in milliseconds.
    pub frame_delay_ms: u64,
    /// Side of the square probe used for collision checks.
    pub probe_size: f64,
    /// Depth over which the move factor drops by one.
    pub depth_divisor: f64,
}

impl SettleProfile {
    /// Gentle settling under a safe load.
    pub const NORMAL: SettleProfile = SettleProfile {
        frames: 15,
        move_floor: 1,
        move_cap: 10,
        jitter: 1,
        frame_delay_ms: 80,
        probe_size: 10.0,
        depth_divisor: 8.0,
    };

    /// Violent movement after a bearing failure.
    pub const FAILURE: SettleProfile = SettleProfile {
        frames: 20,
        move_floor: 5,
        move_cap: 25,
        jitter: 5,
        frame_delay_ms: 50,
        probe_size: 10.0,
        depth_divisor: 8.0,
    };

    /// Pause between frames.
    #[must_use]
    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }

    /// Same profile without pauses between frames.
    #[must_use]
    pub fn without_delay(self) -> Self {
        Self {
            frame_delay_ms: 0,
            ..self
        }
    }

    /// Upper bound of the downward step for a particle `depth` units below the band top.
    ///
    /// # Examples
    /// ```
    /// use soilbed::SettleProfile;
    ///
    /// assert_eq!(SettleProfile::NORMAL.move_factor(0.0), 10);
    /// assert_eq!(SettleProfile::NORMAL.move_factor(20.0), 8);
    /// assert_eq!(SettleProfile::NORMAL.move_factor(96.0), 1);
    /// assert_eq!(SettleProfile::FAILURE.move_factor(96.0), 13);
    /// ```
    #[must_use]
    pub fn move_factor(&self, depth: f64) -> i32 {
        // Truncation towards zero keeps shallow particles at the cap.
        let fade = (depth / self.depth_divisor) as i32;
        self.move_floor.max(self.move_cap - fade)
    }
}

impl Default for SettleProfile {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// Counters for a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    /// Particles whose move was accepted.
    pub accepted: usize,
    /// Particles that stayed put because their probe hit another particle.
    pub blocked: usize,
    /// Sum of accepted downward steps.
    pub vertical_displacement: f64,
}

/// Totals over a whole animation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SettleSummary {
    /// Frames that were run.
    pub frames: usize,
    /// Accepted moves across all frames.
    pub accepted: usize,
    /// Blocked moves across all frames.
    pub blocked: usize,
    /// Sum of accepted downward steps across all frames.
    pub vertical_displacement: f64,
}

impl SettleSummary {
    /// Fold one frame into the totals.
    fn record(&mut self, frame: FrameStats) {
        self.frames += 1;
        self.accepted += frame.accepted;
        self.blocked += frame.blocked;
        self.vertical_displacement += frame.vertical_displacement;
    }

    /// Mean downward travel per particle.
    #[must_use]
    pub fn mean_displacement(&self, particles: usize) -> f64 {
        if particles == 0 {
            0.0
        } else {
            self.vertical_displacement / particles as f64
        }
    }
}

/// Drives the settling animation of one particle field.
#[derive(Clone, Debug)]
pub struct Settler {
    /// Animation tuning.
    profile: SettleProfile,
    /// Top of the soil band, where particles move the most.
    base_y: f64,
    /// Shapes that count as obstacles during collision checks.
    members: HashSet<ShapeId>,
}

impl Settler {
    /// Prepare to animate `field`, whose band starts at `base_y`.
    #[must_use]
    pub fn new(field: &ParticleField, profile: SettleProfile, base_y: f64) -> Self {
        Self {
            profile,
            base_y,
            members: field.shapes().collect(),
        }
    }

    /// Animation tuning.
    #[must_use]
    pub fn profile(&self) -> &SettleProfile {
        &self.profile
    }

    /// Advance every particle of `field` by one frame.
    ///
    /// The surface is the source of truth for positions; the field records the
    /// position of each accepted move.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::UnknownShape`] when a particle's shape is not on `surface`.
    pub fn step<S, R>(
        &self,
        surface: &mut S,
        field: &mut ParticleField,
        rng: &mut R,
    ) -> Result<FrameStats, SurfaceError>
    where
        S: Surface + ?Sized,
        R: Rng + ?Sized,
    {
        let mut stats = FrameStats::default();
        let jitter = self.profile.jitter;
        for index in 0..field.len() {
            let Some(particle) = field.get_mut(index) else {
                break;
            };
            let shape = particle.shape;
            let (Some(top), Some(left)) = (surface.top_y(shape), surface.left_x(shape)) else {
                return Err(SurfaceError::UnknownShape(shape));
            };

            let factor = self.profile.move_factor(top - self.base_y);
            let dx = f64::from(rng.gen_range(-jitter..=jitter));
            let dy = f64::from(rng.gen_range(factor / 2..=factor));

            // The probe always covers the particle's own footprint at the target.
            let target = point(left + dx, top + dy);
            let probe = Rect::from_origin(
                target,
                self.profile.probe_size.max(particle.width),
                self.profile.probe_size.max(particle.height),
            );
            let clear = surface
                .find_overlapping(&probe)
                .into_iter()
                .filter(|other| self.members.contains(other))
                .all(|other| other == shape);

            if clear {
                surface.move_shape(shape, dx, dy)?;
                particle.position = target;
                stats.accepted += 1;
                stats.vertical_displacement += dy;
            } else {
                stats.blocked += 1;
            }
        }
        debug!(
            accepted = stats.accepted,
            blocked = stats.blocked,
            "settling frame"
        );
        Ok(stats)
    }

    /// Run the profile's full frame budget, pausing between frames.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Settler::step`].
    pub fn run<S, R>(
        &self,
        surface: &mut S,
        field: &mut ParticleField,
        rng: &mut R,
    ) -> Result<SettleSummary, SurfaceError>
    where
        S: Surface + ?Sized,
        R: Rng + ?Sized,
    {
        let mut summary = SettleSummary::default();
        let delay = self.profile.frame_delay();
        for _ in 0..self.profile.frames {
            summary.record(self.step(surface, field, rng)?);
            if !delay.is_zero() {
                thread::sleep(delay);
            }
        }
        info!(
            soil = field.soil().code(),
            frames = summary.frames,
            accepted = summary.accepted,
            blocked = summary.blocked,
            "settling finished"
        );
        Ok(summary)
    }
}
