// Simple particle struct to keep track of individual position, velocity, size
// and opacity, plus the per-frame motion rules

use crate::config::FieldConfig;
use crate::surface::Extent;
use glm::DVec2;
use rand::Rng;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: DVec2,
    pub vel: DVec2,
    pub radius: f64,
    opacity: f64,
}

impl Particle {
    pub fn new(pos: DVec2, vel: DVec2, radius: f64, opacity: f64) -> Particle {
        Particle {
            pos,
            vel,
            radius,
            opacity,
        }
    }

    /// Random particle somewhere inside `extent`.
    pub fn spawn<R: Rng>(rng: &mut R, extent: Extent, config: &FieldConfig) -> Particle {
        let pos_x = rng.gen::<f64>() * extent.width as f64;
        let pos_y = rng.gen::<f64>() * extent.height as f64;
        let vel_x = (rng.gen::<f64>() - 0.5) * config.speed_spread;
        let vel_y = (rng.gen::<f64>() - 0.5) * config.speed_spread;
        let radius = rng.gen::<f64>() * (config.max_radius - config.min_radius) + config.min_radius;
        let opacity =
            rng.gen::<f64>() * (config.max_opacity - config.min_opacity) + config.min_opacity;
        Particle::new(glm::vec2(pos_x, pos_y), glm::vec2(vel_x, vel_y), radius, opacity)
    }

    // Fixed at creation
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Moves one velocity step and bounces off the walls. The position is
    /// left where it landed, so a particle can sit just outside the extent
    /// until the reversed velocity brings it back.
    pub fn advance(&mut self, extent: Extent) {
        self.pos += self.vel;
        if self.pos.x < 0.0 || self.pos.x > extent.width as f64 {
            self.vel.x = -self.vel.x;
        }
        if self.pos.y < 0.0 || self.pos.y > extent.height as f64 {
            self.vel.y = -self.vel.y;
        }
    }

    pub fn repel_from(&mut self, pointer: DVec2, config: &FieldConfig) {
        self.pos += repulsion(self.pos, pointer, config);
    }
}

/// Push strength in [0, 1] for a particle `distance` away from the pointer.
/// Zero at or beyond the radius, and for a particle sitting on the pointer
/// (no direction to push in).
pub fn repulsion_force(distance: f64, config: &FieldConfig) -> f64 {
    if distance <= 0.0 || distance >= config.repulsion_radius {
        return 0.0;
    }
    (config.repulsion_radius - distance) / config.repulsion_radius
}

/// Displacement applied to a particle at `pos`, pointing away from `pointer`.
pub fn repulsion(pos: DVec2, pointer: DVec2, config: &FieldConfig) -> DVec2 {
    let to_pointer = pointer - pos;
    let distance = glm::length(&to_pointer);
    let force = repulsion_force(distance, config);
    if force == 0.0 {
        return glm::vec2(0.0, 0.0);
    }
    -(to_pointer / distance) * force * config.repulsion_strength
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn extent(width: u32, height: u32) -> Extent {
        Extent { width, height }
    }

    #[test]
    fn spawn_respects_ranges() {
        let config = FieldConfig::default();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let p = Particle::spawn(&mut rng, extent(800, 600), &config);
            assert!(p.pos.x >= 0.0 && p.pos.x < 800.0);
            assert!(p.pos.y >= 0.0 && p.pos.y < 600.0);
            assert!(p.vel.x.abs() <= 0.25 && p.vel.y.abs() <= 0.25);
            assert!(p.radius >= 1.0 && p.radius <= 3.0);
            assert!(p.opacity() >= 0.2 && p.opacity() <= 0.8);
        }
    }

    #[test]
    fn bounce_flips_once_at_right_wall() {
        let mut p = Particle::new(glm::vec2(99.9, 50.0), glm::vec2(0.25, 0.0), 1.0, 0.5);
        p.advance(extent(100, 100));
        assert!(p.pos.x > 100.0, "position is not clamped");
        assert_eq!(p.vel.x, -0.25);

        p.advance(extent(100, 100));
        assert_eq!(p.vel.x, -0.25, "back inside, no second flip");
        assert!(p.pos.x < 100.0);
    }

    #[test]
    fn bounce_at_top_wall_only_touches_y() {
        let mut p = Particle::new(glm::vec2(50.0, 0.1), glm::vec2(0.2, -0.2), 1.0, 0.5);
        p.advance(extent(100, 100));
        assert_eq!(p.vel, glm::vec2(0.2, 0.2));
    }

    #[test]
    fn pointer_at_origin_pushes_along_x() {
        let config = FieldConfig::default();
        let force = repulsion_force(100.0, &config);
        assert!((force - 1.0 / 3.0).abs() < 1e-12);

        let mut p = Particle::new(glm::vec2(100.0, 0.0), glm::vec2(0.0, 0.0), 1.0, 0.5);
        p.repel_from(glm::vec2(0.0, 0.0), &config);
        assert!((p.pos.x - (100.0 + 2.0 / 3.0)).abs() < 1e-9);
        assert_eq!(p.pos.y, 0.0);
    }

    #[test]
    fn force_is_monotonic_and_zero_outside_radius() {
        let config = FieldConfig::default();
        let mut last = f64::INFINITY;
        for d in (1..200).map(f64::from) {
            let f = repulsion_force(d, &config);
            assert!(f <= last);
            last = f;
        }
        assert_eq!(repulsion_force(150.0, &config), 0.0);
        assert_eq!(repulsion_force(150.5, &config), 0.0);
    }

    #[test]
    fn particle_on_pointer_is_left_alone() {
        let config = FieldConfig::default();
        let pos = glm::vec2(42.0, 42.0);
        assert_eq!(repulsion(pos, pos, &config), glm::vec2(0.0, 0.0));
    }
}
