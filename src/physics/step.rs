//! One frame of particle motion.

use rand::Rng;

use super::forces::{JITTER_SCALE, bounce, cap_speed, displacement, repel_impulse};
use crate::config::BannerConfig;
use crate::cursor::Cursor;
use crate::graph::ParticleBatch;
use crate::rng::uniform;
use crate::spatial::SpatialIndex;

/// Advance every particle by `dt` seconds.
///
/// Per particle, in order: jitter, cursor repulsion, damping, speed cap,
/// integration, wall bounce. Particles do not interact with each other.
///
/// Repulsion candidates come from `spatial`, rebuilt here from the pre-step
/// positions. Each particle only reads its own position before integrating,
/// so this matches testing every particle in turn.
pub fn step<R: Rng + ?Sized>(
    batch: &mut ParticleBatch,
    spatial: &mut SpatialIndex,
    config: &BannerConfig,
    width: f32,
    height: f32,
    cursor: &Cursor,
    dt: f32,
    rng: &mut R,
) {
    let n = batch.len();
    let pad = config.edge_padding;

    let mut near_cursor = vec![false; n];
    if cursor.active {
        spatial.rebuild(batch);
        for i in spatial.in_radius(cursor.x, cursor.y, config.repel_radius) {
            near_cursor[i as usize] = true;
        }
    }

    for i in 0..n {
        let (mut x, mut y) = (batch.pos_x[i], batch.pos_y[i]);
        let (mut vx, mut vy) = (batch.vel_x[i], batch.vel_y[i]);

        vx += uniform(rng, -config.drift, config.drift) * JITTER_SCALE;
        vy += uniform(rng, -config.drift, config.drift) * JITTER_SCALE;

        if near_cursor[i] {
            let (ix, iy) = repel_impulse(
                x,
                y,
                cursor.x,
                cursor.y,
                config.repel_radius,
                config.repel_strength,
            );
            vx += ix;
            vy += iy;
        }

        vx = cap_speed(vx * config.damping, config.speed_cap);
        vy = cap_speed(vy * config.damping, config.speed_cap);

        x += displacement(vx, dt);
        y += displacement(vy, dt);

        (x, vx) = bounce(x, vx, pad, width - pad);
        (y, vy) = bounce(y, vy, pad, height - pad);

        batch.set_motion(i, x, y, vx, vy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Particle;
    use crate::rng::seeded;

    fn calm_config() -> BannerConfig {
        BannerConfig {
            drift: 0.0,
            damping: 1.0,
            ..Default::default()
        }
    }

    fn single(x: f32, y: f32, vx: f32, vy: f32) -> ParticleBatch {
        let mut batch = ParticleBatch::new();
        batch.push(Particle { x, y, vx, vy, r: 6.0 });
        batch
    }

    #[test]
    fn test_containment_over_random_runs() {
        let config = BannerConfig::default();
        let (w, h) = (640.0, 180.0);
        let pad = config.edge_padding;

        for seed in 0..25 {
            let mut rng = seeded(seed);
            let mut batch = ParticleBatch::generate(&config, w, h, &mut rng);
            let mut spatial = SpatialIndex::new();
            let mut cursor = Cursor::default();

            for frame in 0..300 {
                if frame % 40 == 0 {
                    let cx = crate::rng::uniform(&mut rng, 0.0, w);
                    let cy = crate::rng::uniform(&mut rng, 0.0, h);
                    cursor.move_to(cx, cy, 0.0, 0.0);
                } else if frame % 97 == 0 {
                    cursor.leave();
                }
                let dt = crate::rng::uniform(&mut rng, 0.0, 0.033);
                step(&mut batch, &mut spatial, &config, w, h, &cursor, dt, &mut rng);

                for p in batch.iter() {
                    assert!(p.x >= pad && p.x <= w - pad, "seed {seed}: x={} escaped", p.x);
                    assert!(p.y >= pad && p.y <= h - pad, "seed {seed}: y={} escaped", p.y);
                    assert!(p.vx.abs() <= config.speed_cap);
                    assert!(p.vy.abs() <= config.speed_cap);
                }
            }
        }
    }

    #[test]
    fn test_inactive_cursor_no_repulsion() {
        // Same seed, with and without a far-away inactive cursor: identical.
        let config = BannerConfig::default();
        let mut a = ParticleBatch::generate(&config, 800.0, 400.0, &mut seeded(5));
        let mut b = a.clone();

        let mut spatial = SpatialIndex::new();
        step(&mut a, &mut spatial, &config, 800.0, 400.0, &Cursor::inactive(), 0.016, &mut seeded(8));

        // A cursor sitting on a particle but marked inactive changes nothing.
        let (px, py) = b.position(0).unwrap();
        let parked = Cursor { x: px, y: py, active: false };
        step(&mut b, &mut spatial, &config, 800.0, 400.0, &parked, 0.016, &mut seeded(8));

        assert_eq!(a.velocities_x(), b.velocities_x());
        assert_eq!(a.velocities_y(), b.velocities_y());
    }

    #[test]
    fn test_active_cursor_pushes_away() {
        let config = calm_config();
        let mut batch = single(400.0, 200.0, 0.0, 0.0);
        let mut cursor = Cursor::default();
        cursor.move_to(380.0, 200.0, 0.0, 0.0);

        step(&mut batch, &mut SpatialIndex::new(), &config, 800.0, 400.0, &cursor, 0.016, &mut seeded(0));

        let p = batch.get(0).unwrap();
        assert!(p.vx > 0.0);
        assert_eq!(p.vy, 0.0);
        assert!(p.x > 400.0);
    }

    #[test]
    fn test_cursor_outside_radius_ignored() {
        let config = calm_config();
        let mut batch = single(400.0, 200.0, 0.25, 0.0);
        let mut cursor = Cursor::default();
        cursor.move_to(400.0 - config.repel_radius - 1.0, 200.0, 0.0, 0.0);

        step(&mut batch, &mut SpatialIndex::new(), &config, 800.0, 400.0, &cursor, 0.016, &mut seeded(0));
        assert_eq!(batch.get(0).unwrap().vx, 0.25);
    }

    #[test]
    fn test_frame_rate_independence() {
        let config = calm_config();
        let cursor = Cursor::inactive();
        let mut spatial = SpatialIndex::new();
        let dt = 0.016;

        let mut once = single(300.0, 200.0, 0.7, -0.4);
        step(&mut once, &mut spatial, &config, 800.0, 400.0, &cursor, 2.0 * dt, &mut seeded(1));

        let mut twice = single(300.0, 200.0, 0.7, -0.4);
        step(&mut twice, &mut spatial, &config, 800.0, 400.0, &cursor, dt, &mut seeded(1));
        step(&mut twice, &mut spatial, &config, 800.0, 400.0, &cursor, dt, &mut seeded(2));

        let (ax, ay) = once.position(0).unwrap();
        let (bx, by) = twice.position(0).unwrap();
        assert!((ax - bx).abs() < 1e-3, "{ax} vs {bx}");
        assert!((ay - by).abs() < 1e-3, "{ay} vs {by}");
    }

    #[test]
    fn test_damping_and_cap() {
        let config = BannerConfig {
            drift: 0.0,
            ..Default::default()
        };
        let mut batch = single(400.0, 200.0, 5.0, 0.5);
        step(&mut batch, &mut SpatialIndex::new(), &config, 800.0, 400.0, &Cursor::inactive(), 0.0, &mut seeded(0));

        let p = batch.get(0).unwrap();
        assert_eq!(p.vx, config.speed_cap);
        assert!((p.vy - 0.5 * config.damping).abs() < 1e-6);
        // dt = 0 leaves the position alone.
        assert_eq!((p.x, p.y), (400.0, 200.0));
    }

    #[test]
    fn test_wall_bounce_in_step() {
        let config = calm_config();
        let mut batch = single(11.0, 200.0, -1.0, 0.0);
        step(&mut batch, &mut SpatialIndex::new(), &config, 800.0, 400.0, &Cursor::inactive(), 0.033, &mut seeded(0));

        let p = batch.get(0).unwrap();
        assert_eq!(p.x, config.edge_padding);
        assert!((p.vx - 0.9).abs() < 1e-6);
    }
}
