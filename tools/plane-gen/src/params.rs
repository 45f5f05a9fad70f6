//! Plane generation parameters

use crate::error::PlaneError;

/// Default plane extent along both axes
pub const DEFAULT_SIZE: f64 = 100.0;

/// Grid resolution and physical size of a plane
///
/// `n_x`/`n_y` count vertices (not cells) along each axis. The plane spans
/// `[-size_x/2, size_x/2] x [-size_y/2, size_y/2]` in the XY plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneParams {
    pub n_x: u32,
    pub n_y: u32,
    pub size_x: f64,
    pub size_y: f64,
}

impl PlaneParams {
    /// Create parameters with the default 100 x 100 extent
    pub fn new(n_x: u32, n_y: u32) -> Self {
        Self {
            n_x,
            n_y,
            size_x: DEFAULT_SIZE,
            size_y: DEFAULT_SIZE,
        }
    }

    /// Override the physical extent
    pub fn with_size(mut self, size_x: f64, size_y: f64) -> Self {
        self.size_x = size_x;
        self.size_y = size_y;
        self
    }

    /// Total vertex count, `n_x * n_y`
    pub fn vertex_count(&self) -> u64 {
        u64::from(self.n_x) * u64::from(self.n_y)
    }

    /// Total triangle count, two per grid cell
    pub fn triangle_count(&self) -> u64 {
        u64::from(self.n_x.saturating_sub(1)) * u64::from(self.n_y.saturating_sub(1)) * 2
    }

    /// Reject grids that would produce no vertices or overflow u32 indices.
    ///
    /// Single-row or single-column grids are valid and yield zero triangles.
    /// Sizes are not checked.
    pub fn validate(&self) -> Result<(), PlaneError> {
        if self.n_x == 0 || self.n_y == 0 {
            return Err(PlaneError::EmptyGrid {
                n_x: self.n_x,
                n_y: self.n_y,
            });
        }
        if self.vertex_count() > u64::from(u32::MAX) {
            return Err(PlaneError::TooManyVertices {
                n_x: self.n_x,
                n_y: self.n_y,
            });
        }
        Ok(())
    }
}
