//! The particle collection and the per-frame simulation passes.
//!
//! Connection detection compares every pair of particles, so a frame costs
//! O(n²) in the particle count. At the default density (one particle per
//! 15000 px²) a full-HD viewport holds ~138 particles, which is well within
//! budget; denser fields should lower `link_distance` or switch to a grid.

use crate::color::ColorPair;
use crate::config::FieldConfig;
use crate::error::SurfaceError;
use crate::particle::Particle;
use crate::surface::{Extent, Surface};
use glm::DVec2;
use rand::Rng;

/// Line between two nearby particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub from: DVec2,
    pub to: DVec2,
    pub opacity: f64,
}

pub struct ParticleField {
    config: FieldConfig,
    extent: Extent,
    particles: Vec<Particle>,
}

/// floor(area / density_area)
pub fn particle_count_for(extent: Extent, config: &FieldConfig) -> usize {
    (extent.area() as f64 / config.density_area).floor() as usize
}

impl ParticleField {
    pub fn new(config: FieldConfig) -> ParticleField {
        ParticleField {
            config,
            extent: Extent::default(),
            particles: Vec::new(),
        }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Throws away every particle and seeds a fresh set for `extent`.
    pub fn reseed<R: Rng>(&mut self, extent: Extent, rng: &mut R) {
        let count = particle_count_for(extent, &self.config);
        let mut particles = Vec::with_capacity(count);
        for _ in 0..count {
            particles.push(Particle::spawn(rng, extent, &self.config));
        }
        self.extent = extent;
        self.particles = particles;
    }

    /// Drops every particle, leaving an empty field with no extent.
    pub fn clear(&mut self) {
        self.particles.clear();
        self.extent = Extent::default();
    }

    /// Update phase: motion, wall bounce, then pointer repulsion.
    pub fn update(&mut self, pointer: DVec2) {
        let extent = self.extent;
        for particle in &mut self.particles {
            particle.advance(extent);
            particle.repel_from(pointer, &self.config);
        }
    }

    /// Every unordered pair closer than `link_distance`, each exactly once.
    pub fn links(&self) -> impl Iterator<Item = Link> + '_ {
        let max_distance = self.config.link_distance;
        let max_opacity = self.config.link_max_opacity;
        let particles: &[Particle] = &self.particles;
        particles.iter().enumerate().flat_map(move |(i, p)| {
            particles[i + 1..]
                .iter()
                .enumerate()
                .filter_map(move |(offset, other)| {
                    let distance = glm::distance(&p.pos, &other.pos);
                    if distance < max_distance {
                        Some(Link {
                            a: i,
                            b: i + 1 + offset,
                            from: p.pos,
                            to: other.pos,
                            opacity: (max_distance - distance) / max_distance * max_opacity,
                        })
                    } else {
                        None
                    }
                })
        })
    }

    /// Connection and draw phases. Lines go under the dots.
    pub fn render<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        colors: &ColorPair,
    ) -> Result<(), SurfaceError> {
        for link in self.links() {
            let style = colors.connection.with_alpha(link.opacity);
            surface.stroke_line(link.from, link.to, &style, self.config.link_width)?;
        }
        for particle in &self.particles {
            surface.fill_circle(particle.pos, particle.radius, &colors.main, particle.opacity())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn field_with(positions: &[(f64, f64)]) -> ParticleField {
        let mut field = ParticleField::new(FieldConfig::default());
        field.extent = Extent::new(1000, 1000);
        field.particles = positions
            .iter()
            .map(|&(x, y)| Particle::new(glm::vec2(x, y), glm::vec2(0.0, 0.0), 2.0, 0.5))
            .collect();
        field
    }

    #[derive(Default)]
    struct Tally {
        lines: Vec<String>,
        circles: Vec<f64>,
    }

    impl Surface for Tally {
        fn resize(&mut self, _extent: Extent) {}

        fn clear(&mut self) -> Result<(), SurfaceError> {
            Ok(())
        }

        fn stroke_line(
            &mut self,
            _: DVec2,
            _: DVec2,
            style: &str,
            _: f64,
        ) -> Result<(), SurfaceError> {
            self.lines.push(style.to_owned());
            Ok(())
        }

        fn fill_circle(
            &mut self,
            _: DVec2,
            _: f64,
            _: &str,
            alpha: f64,
        ) -> Result<(), SurfaceError> {
            self.circles.push(alpha);
            Ok(())
        }
    }

    #[test]
    fn count_follows_density_formula() {
        let config = FieldConfig::default();
        assert_eq!(particle_count_for(Extent::new(1500, 1000), &config), 100);
        assert_eq!(particle_count_for(Extent::new(1920, 1080), &config), 138);
        assert_eq!(particle_count_for(Extent::new(100, 100), &config), 0);
        assert_eq!(particle_count_for(Extent::new(0, 5000), &config), 0);
    }

    #[test]
    fn reseed_replaces_everything() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut field = ParticleField::new(FieldConfig::default());
        field.reseed(Extent::new(1500, 1000), &mut rng);
        assert_eq!(field.len(), 100);
        for p in field.particles() {
            assert!(p.pos.x >= 0.0 && p.pos.x < 1500.0);
            assert!(p.pos.y >= 0.0 && p.pos.y < 1000.0);
        }

        let before: Vec<_> = field.particles().to_vec();
        field.reseed(Extent::new(600, 500), &mut rng);
        assert_eq!(field.len(), 20);
        assert_eq!(field.extent(), Extent::new(600, 500));
        assert!(field.particles().iter().all(|p| !before.contains(p)));
    }

    #[test]
    fn update_keeps_opacity() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut field = ParticleField::new(FieldConfig::default());
        field.reseed(Extent::new(900, 500), &mut rng);
        let opacities: Vec<f64> = field.particles().iter().map(|p| p.opacity()).collect();
        for frame in 0..200 {
            field.update(glm::vec2(frame as f64 * 4.0, 250.0));
        }
        let after: Vec<f64> = field.particles().iter().map(|p| p.opacity()).collect();
        assert_eq!(opacities, after);
    }

    #[test]
    fn links_each_close_pair_once() {
        let field = field_with(&[(0.0, 0.0), (60.0, 0.0), (0.0, 100.0), (500.0, 500.0)]);
        let links: Vec<Link> = field.links().collect();

        let pairs: HashSet<(usize, usize)> = links.iter().map(|l| (l.a, l.b)).collect();
        assert_eq!(pairs.len(), links.len(), "no duplicate pairs");
        assert_eq!(pairs, [(0, 1), (0, 2), (1, 2)].iter().copied().collect());
        assert!(links.iter().all(|l| l.a < l.b));

        let first = links.iter().find(|l| (l.a, l.b) == (0, 1)).unwrap();
        assert!((first.opacity - 0.15).abs() < 1e-12);
    }

    #[test]
    fn link_cutoff_is_exclusive() {
        let field = field_with(&[(0.0, 0.0), (120.0, 0.0)]);
        assert_eq!(field.links().count(), 0);
    }

    #[test]
    fn render_draws_lines_then_circles() {
        let field = field_with(&[(10.0, 10.0), (70.0, 10.0), (900.0, 900.0)]);
        let colors = ColorPair::new("#fff", Rgb::new(1, 2, 3));
        let mut tally = Tally::default();
        field.render(&mut tally, &colors).unwrap();
        assert_eq!(tally.lines, vec!["rgba(1, 2, 3, 0.15)".to_owned()]);
        assert_eq!(tally.circles, vec![0.5; 3]);
    }
}
