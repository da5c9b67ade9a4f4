// Tunables for the particle field. Defaults reproduce the look of the
// portfolio backdrop; hosts may override any of them before initializing.

#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    /// Surface area (in px²) that accounts for one particle.
    pub density_area: f64,
    /// Full width of the uniform velocity range, centered on zero.
    pub speed_spread: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    pub min_opacity: f64,
    pub max_opacity: f64,
    /// Pointer distance under which particles get pushed away.
    pub repulsion_radius: f64,
    pub repulsion_strength: f64,
    /// Particle distance under which a connecting line is drawn.
    pub link_distance: f64,
    pub link_max_opacity: f64,
    pub link_width: f64,
    /// Quiet period after the last resize before the field is rebuilt.
    pub resize_debounce_ms: u32,
}

impl FieldConfig {
    pub const DENSITY_AREA: f64 = 15000.0;
    pub const REPULSION_RADIUS: f64 = 150.0;
    pub const LINK_DISTANCE: f64 = 120.0;
    pub const RESIZE_DEBOUNCE_MS: u32 = 250;
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            density_area: Self::DENSITY_AREA,
            speed_spread: 0.5,
            min_radius: 1.0,
            max_radius: 3.0,
            min_opacity: 0.2,
            max_opacity: 0.8,
            repulsion_radius: Self::REPULSION_RADIUS,
            repulsion_strength: 2.0,
            link_distance: Self::LINK_DISTANCE,
            link_max_opacity: 0.3,
            link_width: 0.5,
            resize_debounce_ms: Self::RESIZE_DEBOUNCE_MS,
        }
    }
}
