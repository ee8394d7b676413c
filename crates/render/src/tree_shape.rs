//! Tree geometry derived from the size scalar.

/// Trunk radius per unit of size.
pub const TRUNK_RADIUS_PER_SIZE: f32 = 0.25;
/// Trunk height per unit of size.
pub const TRUNK_HEIGHT_PER_SIZE: f32 = 2.0;
/// Canopy half-width per unit of size.
pub const CANOPY_HALF_WIDTH_PER_SIZE: f32 = 1.2;
/// Canopy top height per unit of size.
pub const CANOPY_TOP_PER_SIZE: f32 = 4.5;

/// Dimensions of a trunk-and-canopy tree, in world units, relative to the trunk base.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeShape {
    /// Trunk cylinder radius.
    pub trunk_radius: f32,
    /// Trunk cylinder height.
    pub trunk_height: f32,
    /// Canopy half-width in X and Z.
    pub canopy_half_width: f32,
    /// Canopy bottom (equal to trunk height).
    pub canopy_bottom: f32,
    /// Canopy top.
    pub canopy_top: f32,
}

impl TreeShape {
    /// Derive every dimension from `size`.
    pub fn from_size(size: f32) -> Self {
        Self {
            trunk_radius: size * TRUNK_RADIUS_PER_SIZE,
            trunk_height: size * TRUNK_HEIGHT_PER_SIZE,
            canopy_half_width: size * CANOPY_HALF_WIDTH_PER_SIZE,
            canopy_bottom: size * TRUNK_HEIGHT_PER_SIZE,
            canopy_top: size * CANOPY_TOP_PER_SIZE,
        }
    }

    /// Total height of the tree.
    pub fn height(&self) -> f32 {
        self.canopy_top
    }
}
