//! Per-particle force and integration terms.
//!
//! Each function is one line of the per-frame transform, kept separate so the
//! terms can be tested in isolation.

/// Scales the raw drift range down to a per-frame velocity nudge.
pub const JITTER_SCALE: f32 = 0.04;

/// Multiplier applied to the repel force before it is added to velocity.
pub const REPEL_MULTIPLIER: f32 = 2.6;

/// Fraction of speed kept on the bounced axis.
pub const BOUNCE_RESTITUTION: f32 = 0.9;

/// Velocities are expressed per frame at this rate.
pub const REFERENCE_FPS: f32 = 60.0;

/// Repel force magnitude at distance `d` from the cursor.
///
/// Quadratic falloff: `strength` at zero distance, exactly zero at and beyond
/// `radius`.
#[inline]
pub fn repel_force(d: f32, radius: f32, strength: f32) -> f32 {
    if d >= radius {
        return 0.0;
    }
    let t = 1.0 - d / radius;
    t * t * strength
}

/// Velocity change from the cursor at `(mx, my)` on a particle at `(x, y)`.
///
/// Points away from the cursor. A particle exactly on the cursor gets no push
/// because its offset is zero.
pub fn repel_impulse(x: f32, y: f32, mx: f32, my: f32, radius: f32, strength: f32) -> (f32, f32) {
    let dx = x - mx;
    let dy = y - my;
    let d = (dx * dx + dy * dy).sqrt();

    let f = repel_force(d, radius, strength);
    if f == 0.0 {
        return (0.0, 0.0);
    }

    let norm = if d > 0.0 { d } else { 1.0 };
    (
        dx / norm * f * REPEL_MULTIPLIER,
        dy / norm * f * REPEL_MULTIPLIER,
    )
}

/// Clamp a velocity component to `[-cap, cap]`.
#[inline]
pub fn cap_speed(v: f32, cap: f32) -> f32 {
    v.max(-cap).min(cap)
}

/// Position delta for one step of `dt` seconds.
#[inline]
pub fn displacement(v: f32, dt: f32) -> f32 {
    v * (dt * REFERENCE_FPS)
}

/// Inelastic bounce against `[lo, hi]` on one axis.
///
/// Returns the clamped position and the velocity, inverted and scaled by
/// `BOUNCE_RESTITUTION` if a wall was hit.
#[inline]
pub fn bounce(pos: f32, vel: f32, lo: f32, hi: f32) -> (f32, f32) {
    let (mut p, mut v) = (pos, vel);
    if p < lo {
        p = lo;
        v *= -BOUNCE_RESTITUTION;
    }
    if p > hi {
        p = hi;
        v *= -BOUNCE_RESTITUTION;
    }
    (p, v)
}
