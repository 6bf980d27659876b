use std::f64::consts::FRAC_PI_2;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::params::{ParamSource, CHARGE_UNIT, ELECTRON_MASS};
use crate::surface::{DotId, Surface};

/// Simulated seconds per real second. Electron transit times are on the
/// order of nanoseconds; this stretches them out to human speed.
pub const TIMESCALE: f64 = 0.00000002;
/// Statistical half-life of a particle, in simulated seconds.
pub const HALF_LIFE: f64 = 0.0000001;

/// Real seconds between spawns.
pub const SPAWN_INTERVAL: f64 = 0.05;
/// Hard cap on the live population; spawns are dropped beyond it.
pub const MAX_PARTICLES: usize = 300;
/// Largest real-time slice handed to a single integration step. The
/// forces are evaluated explicitly, so stability needs small steps.
pub const MAX_SUB_STEP: f64 = 0.001;
/// Most wall time a single tick is allowed to catch up on, so a
/// suspended terminal does not resume with a burst of thousands of steps.
pub const MAX_CATCH_UP: f64 = 1.0;
/// Total width of the uniform jitter applied to the emission angle.
const EMIT_JITTER: f64 = 0.1;

/// Affine transform from physical coordinates to view coordinates.
pub const VIEW_SCALE: f64 = 2000.0;
pub const VIEW_OX: f64 = 480.0;
pub const VIEW_OY: f64 = 250.0;
/// The view is a square, 0..=VIEW_MAX on both axes.
pub const VIEW_MAX: f64 = 500.0;

/// Collector plate above the emitter; anything projected into this
/// rectangle is absorbed.
pub const COLLECTOR_HALF_WIDTH: f64 = 30.0;
pub const COLLECTOR_DEPTH: f64 = 20.0;

/// One live electron. Position and velocity are in physical units with
/// the origin at the emission point; `dx`/`dy` are the projected view
/// coordinates, refreshed every step.
struct Particle {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    dx: f64,
    dy: f64,
    dot: DotId,
}

/// Project physical coordinates into view coordinates.
fn project(x: f64, y: f64) -> (f64, f64) {
    (x * VIEW_SCALE + VIEW_OX, y * VIEW_SCALE + VIEW_OY)
}

/// True if a projected position has left the visible region, either by
/// crossing the view bounds or by landing on the collector plate.
fn absorbed(dx: f64, dy: f64) -> bool {
    if dx < 0.0 || dy < 0.0 || dx > VIEW_MAX || dy > VIEW_MAX {
        return true;
    }
    dx > VIEW_OX - COLLECTOR_HALF_WIDTH
        && dx < VIEW_OX + COLLECTOR_HALF_WIDTH
        && dy < VIEW_OY
        && dy > VIEW_OY - COLLECTOR_DEPTH
}

/// Owns the particle arena and the real-time clock state, and advances
/// the whole population through fixed-size sub-steps. Control values
/// come in through `ParamSource` and drawing goes out through `Surface`;
/// the simulator itself never touches the terminal.
pub struct Simulator {
    particles: Vec<Particle>,
    last_timestamp: Option<f64>,
    spawn_accumulator: f64,
    rng: StdRng,
}

impl Simulator {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic construction for tests: jitter and decay draws
    /// come from a fixed seed.
    #[cfg(test)]
    fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            particles: Vec::new(),
            last_timestamp: None,
            spawn_accumulator: 0.0,
            rng,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Advance the simulation to `timestamp` (seconds on a monotonic
    /// clock). The first call has no history and advances nothing; any
    /// later call is clamped to at most `MAX_CATCH_UP` of elapsed time,
    /// then consumed in sub-steps of at most `MAX_SUB_STEP` each.
    pub fn advance(
        &mut self,
        timestamp: f64,
        params: &impl ParamSource,
        surface: &mut impl Surface,
    ) {
        let last = self.last_timestamp.unwrap_or(timestamp);
        let last = last.max(timestamp - MAX_CATCH_UP);
        self.last_timestamp = Some(timestamp);

        let mut remaining = timestamp - last;
        while remaining > 0.0 {
            let dt = remaining.min(MAX_SUB_STEP);
            self.step(dt, params, surface);
            remaining -= dt;
        }
    }

    /// Push every live particle's view position to its dot. Called once
    /// per frame, after all sub-steps for that frame have run.
    pub fn render(&self, surface: &mut impl Surface) {
        for p in &self.particles {
            surface.set_dot_position(p.dot, p.dx, p.dy);
        }
    }

    /// Release every dot and forget all clock state.
    pub fn clear(&mut self, surface: &mut impl Surface) {
        for p in self.particles.drain(..) {
            surface.destroy_dot(p.dot);
        }
        self.last_timestamp = None;
        self.spawn_accumulator = 0.0;
    }

    /// One sub-step of at most `MAX_SUB_STEP` real seconds: spawn if the
    /// accumulator came due, then integrate and cull every particle.
    fn step(&mut self, dt: f64, params: &impl ParamSource, surface: &mut impl Surface) {
        self.spawn_accumulator += dt;
        if self.spawn_accumulator > SPAWN_INTERVAL {
            self.spawn_accumulator -= SPAWN_INTERVAL;
            // At capacity the spawn is dropped outright; no backlog
            // builds up while the population is full.
            if self.particles.len() < MAX_PARTICLES {
                self.spawn(params, surface);
            }
        }

        let sim_dt = dt * TIMESCALE;
        let survival = 0.5f64.powf(sim_dt / HALF_LIFE);
        // Lorentz force per unit velocity for an electron in this field.
        let k = params.field_strength() * -CHARGE_UNIT;

        let mut i = 0;
        while i < self.particles.len() {
            let p = &mut self.particles[i];

            let force_x = -p.vy * k;
            let force_y = p.vx * k;
            let accel_x = force_x / ELECTRON_MASS;
            let accel_y = force_y / ELECTRON_MASS;

            // Position first, with the constant-acceleration correction,
            // then velocity. The order shapes the trajectory at coarse
            // steps and must stay this way.
            p.x += p.vx * sim_dt + 0.5 * accel_x * sim_dt * sim_dt;
            p.y += p.vy * sim_dt + 0.5 * accel_y * sim_dt * sim_dt;
            p.vx += accel_x * sim_dt;
            p.vy += accel_y * sim_dt;

            let (dx, dy) = project(p.x, p.y);
            p.dx = dx;
            p.dy = dy;

            let mut remove = absorbed(dx, dy);
            if self.rng.gen::<f64>() > survival {
                remove = true;
            }

            if remove {
                let p = self.particles.swap_remove(i);
                surface.destroy_dot(p.dot);
            } else {
                i += 1;
            }
        }
    }

    /// Emit one particle at the origin, straight up give or take the
    /// jitter, at the speed the current voltage produces. The speed is
    /// frozen at this moment; later voltage changes only affect later
    /// spawns.
    fn spawn(&mut self, params: &impl ParamSource, surface: &mut impl Surface) {
        let speed = params.velocity_magnitude();
        let angle = FRAC_PI_2 + (self.rng.gen::<f64>() - 0.5) * EMIT_JITTER;
        let (dx, dy) = project(0.0, 0.0);
        self.particles.push(Particle {
            x: 0.0,
            y: 0.0,
            vx: angle.cos() * speed,
            vy: angle.sin() * speed,
            dx,
            dy,
            dot: surface.create_dot(),
        });
    }
}
