//! Celebration confetti: an explicit timed task bounded by a captured
//! deadline. While live, the frame loop fires two edge bursts per frame;
//! the loop goes quiet on its own once the deadline passes, and there is no
//! cancellation path.

use rand::Rng;

pub const CONFETTI_DURATION: f32 = 3.0;
pub const BURST_PARTICLES: usize = 5;
pub const BURST_SPREAD_DEGREES: f32 = 55.0;

pub const PARTICLE_SPEED_MIN: f32 = 520.0;
pub const PARTICLE_SPEED_MAX: f32 = 880.0;
pub const PARTICLE_GRAVITY: f32 = 1100.0;
/// Fraction of velocity kept per second of flight.
pub const PARTICLE_DRAG: f32 = 0.35;
pub const PARTICLE_LIFETIME: f32 = 2.4;

/// Wall-clock gate for the burst loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfettiTimer {
    ends_at: f64,
}

impl ConfettiTimer {
    pub fn start(now: f64) -> Self {
        Self {
            ends_at: now + CONFETTI_DURATION as f64,
        }
    }

    pub fn is_live(&self, now: f64) -> bool {
        now < self.ends_at
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfettiHue {
    Love,
    White,
}

/// Launch description for one screen-edge burst. Launch angles are in
/// degrees: 90 is straight up, smaller angles lean right, larger lean left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurstSpec {
    /// Origin as a fraction of viewport width.
    pub origin_x: f32,
    /// Origin as a fraction of viewport height.
    pub origin_y: f32,
    pub angle_degrees: f32,
    pub spread_degrees: f32,
    pub particles: usize,
}

/// The two inward-arcing bursts fired each frame: left edge launching
/// up-and-right, right edge launching up-and-left.
pub fn edge_bursts() -> [BurstSpec; 2] {
    [
        BurstSpec {
            origin_x: 0.0,
            origin_y: 0.5,
            angle_degrees: 60.0,
            spread_degrees: BURST_SPREAD_DEGREES,
            particles: BURST_PARTICLES,
        },
        BurstSpec {
            origin_x: 1.0,
            origin_y: 0.5,
            angle_degrees: 120.0,
            spread_degrees: BURST_SPREAD_DEGREES,
            particles: BURST_PARTICLES,
        },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub rotation: f32,
    pub spin: f32,
    pub hue: ConfettiHue,
    pub age: f32,
}

impl Particle {
    pub fn step(&mut self, dt: f32) {
        let keep = PARTICLE_DRAG.powf(dt);
        self.vx *= keep;
        self.vy = self.vy * keep + PARTICLE_GRAVITY * dt;
        self.x += self.vx * dt;
        self.y += self.vy * dt;
        self.rotation += self.spin * dt;
        self.age += dt;
    }

    pub fn expired(&self) -> bool {
        self.age >= PARTICLE_LIFETIME
    }

    /// Full strength through the front half of the lifetime, then a linear
    /// fade to nothing.
    pub fn opacity(&self) -> f32 {
        let t = (self.age / PARTICLE_LIFETIME).clamp(0.0, 1.0);
        if t < 0.5 {
            1.0
        } else {
            1.0 - (t - 0.5) * 2.0
        }
    }
}

pub fn spawn_burst<R: Rng + ?Sized>(
    spec: BurstSpec,
    viewport_width: f32,
    viewport_height: f32,
    rng: &mut R,
) -> Vec<Particle> {
    let half_spread = spec.spread_degrees / 2.0;
    (0..spec.particles)
        .map(|_| {
            let angle = (spec.angle_degrees + rng.random_range(-half_spread..=half_spread))
                .to_radians();
            let speed = rng.random_range(PARTICLE_SPEED_MIN..=PARTICLE_SPEED_MAX);
            let hue = if rng.random_bool(0.5) {
                ConfettiHue::Love
            } else {
                ConfettiHue::White
            };
            Particle {
                x: spec.origin_x * viewport_width,
                y: spec.origin_y * viewport_height,
                // screen y grows downward, so an upward launch is negative
                vx: angle.cos() * speed,
                vy: -angle.sin() * speed,
                rotation: rng.random_range(0.0..std::f32::consts::TAU),
                spin: rng.random_range(-8.0..=8.0),
                hue,
                age: 0.0,
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/confetti_tests.rs"]
mod tests;
