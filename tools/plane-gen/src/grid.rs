//! Grid builder
//!
//! Tessellates a rectangle centered at the origin into `n_x * n_y` vertices and
//! `(n_x - 1) * (n_y - 1) * 2` triangles.
//!
//! Vertex `(x, y)` lives at index `x * n_y + y`, so `y` is the fast axis.
//! Positions, UVs and normals share that index space, which lets the OBJ writer
//! reference all three attributes with one index per corner.

use glam::{DVec2, DVec3};
use tracing::debug;

use crate::error::PlaneError;
use crate::params::PlaneParams;

/// Plane mesh as four parallel arrays (f64 format)
///
/// `positions`, `uvs` and `normals` always have the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaneMesh {
    /// Vertex positions, z is always 0.0
    pub positions: Vec<DVec3>,
    /// Texture coordinates in [0, 1] x [0, 1]
    pub uvs: Vec<DVec2>,
    /// Per-vertex normals, constant +Z for a flat plane
    pub normals: Vec<DVec3>,
    /// Triangles as 0-based vertex indices
    pub triangles: Vec<[u32; 3]>,
}

impl PlaneMesh {
    /// Create an empty mesh with room for the given counts
    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            uvs: Vec::with_capacity(vertices),
            normals: Vec::with_capacity(vertices),
            triangles: Vec::with_capacity(triangles),
        }
    }

    /// Add a vertex with position, UV coordinates, and normal, returning its index
    ///
    /// # Panics
    /// If the mesh already holds `u32::MAX + 1` vertices.
    pub fn add_vertex_uv(&mut self, position: DVec3, uv: DVec2, normal: DVec3) -> u32 {
        let index = u32::try_from(self.positions.len()).expect("vertex index exceeds u32 range");
        self.positions.push(position);
        self.uvs.push(uv);
        self.normals.push(normal);
        index
    }

    /// Add a triangle using three vertex indices
    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.triangles.push([i0, i1, i2]);
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get triangle count
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

/// Linearly remap `value` from `[in_min, in_max]` to `[out_min, out_max]`.
///
/// A zero-width input range maps every value to `out_min`. Both endpoints of
/// the input range land exactly on the output endpoints.
pub fn remap(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    let span = in_max - in_min;
    if span == 0.0 {
        return out_min;
    }
    let t = (value - in_min) / span;
    out_min * (1.0 - t) + out_max * t
}

/// Index of grid vertex `(x, y)` in a grid with `n_y` vertices per column
#[inline]
pub fn grid_index(x: u32, y: u32, n_y: u32) -> u32 {
    x * n_y + y
}

/// Generate a flat plane in the XY plane facing +Z
///
/// # Arguments
/// * `params` - Resolution (vertex counts) and physical size
///
/// # Returns
/// Mesh with `n_x * n_y` vertices and two triangles per grid cell. A grid with a
/// single row or column is a valid strip with no triangles.
///
/// # Errors
/// `EmptyGrid` if either resolution is 0, `TooManyVertices` if the vertex count
/// overflows the u32 index range.
pub fn generate_plane(params: &PlaneParams) -> Result<PlaneMesh, PlaneError> {
    params.validate()?;

    let PlaneParams {
        n_x,
        n_y,
        size_x,
        size_y,
    } = *params;

    let mut mesh = PlaneMesh::with_capacity(
        params.vertex_count() as usize,
        params.triangle_count() as usize,
    );

    let last_x = f64::from(n_x - 1);
    let last_y = f64::from(n_y - 1);
    let normal = DVec3::Z;

    for x in 0..n_x {
        for y in 0..n_y {
            let fx = f64::from(x);
            let fy = f64::from(y);

            let position = DVec3::new(
                remap(fx, 0.0, last_x, -size_x * 0.5, size_x * 0.5),
                remap(fy, 0.0, last_y, -size_y * 0.5, size_y * 0.5),
                0.0,
            );
            let uv = DVec2::new(
                remap(fx, 0.0, last_x, 0.0, 1.0),
                remap(fy, 0.0, last_y, 0.0, 1.0),
            );

            let index = mesh.add_vertex_uv(position, uv, normal);
            debug_assert_eq!(index, grid_index(x, y, n_y));
        }
    }

    // Two triangles per cell, split along the i1-i3 diagonal
    for x in 0..n_x - 1 {
        for y in 0..n_y - 1 {
            let i0 = grid_index(x, y, n_y);
            let i1 = grid_index(x + 1, y, n_y);
            let i2 = grid_index(x + 1, y + 1, n_y);
            let i3 = grid_index(x, y + 1, n_y);

            mesh.add_triangle(i0, i1, i3);
            mesh.add_triangle(i1, i2, i3);
        }
    }

    debug!(
        "Generated {}x{} plane ({} x {}): {} vertices, {} triangles",
        n_x,
        n_y,
        size_x,
        size_y,
        mesh.vertex_count(),
        mesh.triangle_count()
    );

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distinct_sorted(values: impl Iterator<Item = f64>) -> Vec<f64> {
        let mut out: Vec<f64> = values.collect();
        out.sort_by(|a, b| a.partial_cmp(b).unwrap());
        out.dedup();
        out
    }

    #[test]
    fn test_remap_endpoints_exact() {
        assert_eq!(remap(0.0, 0.0, 3.0, -50.0, 50.0), -50.0);
        assert_eq!(remap(3.0, 0.0, 3.0, -50.0, 50.0), 50.0);
        assert_eq!(remap(7.0, 0.0, 7.0, -0.3, 0.3), 0.3);
        assert_eq!(remap(1.0, 0.0, 2.0, 0.0, 1.0), 0.5);
    }

    #[test]
    fn test_remap_zero_width_returns_lower_bound() {
        assert_eq!(remap(0.0, 0.0, 0.0, -5.0, 5.0), -5.0);
        assert_eq!(remap(0.0, 0.0, 0.0, 0.0, 1.0), 0.0);
    }

    #[test]
    fn test_grid_index() {
        assert_eq!(grid_index(0, 0, 3), 0);
        assert_eq!(grid_index(0, 2, 3), 2);
        assert_eq!(grid_index(1, 0, 3), 3);
        assert_eq!(grid_index(2, 1, 3), 7);
    }

    #[test]
    fn test_add_vertex_uv_returns_grid_index() {
        let n_y = 3;
        let mut mesh = PlaneMesh::default();
        for x in 0..2 {
            for y in 0..n_y {
                let index = mesh.add_vertex_uv(DVec3::ZERO, DVec2::ZERO, DVec3::Z);
                assert_eq!(index, grid_index(x, y, n_y));
            }
        }
        assert_eq!(mesh.vertex_count(), 6);
    }

    #[test]
    fn test_counts() {
        for (n_x, n_y) in [(2, 2), (3, 5), (8, 2), (10, 10)] {
            let mesh = generate_plane(&PlaneParams::new(n_x, n_y)).unwrap();
            let vertices = (n_x * n_y) as usize;
            assert_eq!(mesh.vertex_count(), vertices);
            assert_eq!(mesh.uvs.len(), vertices);
            assert_eq!(mesh.normals.len(), vertices);
            assert_eq!(
                mesh.triangle_count(),
                ((n_x - 1) * (n_y - 1) * 2) as usize
            );
        }
    }

    #[test]
    fn test_two_by_two_layout() {
        let mesh = generate_plane(&PlaneParams::new(2, 2).with_size(2.0, 2.0)).unwrap();

        assert_eq!(
            mesh.positions,
            vec![
                DVec3::new(-1.0, -1.0, 0.0),
                DVec3::new(-1.0, 1.0, 0.0),
                DVec3::new(1.0, -1.0, 0.0),
                DVec3::new(1.0, 1.0, 0.0),
            ]
        );
        assert_eq!(
            mesh.uvs,
            vec![
                DVec2::new(0.0, 0.0),
                DVec2::new(0.0, 1.0),
                DVec2::new(1.0, 0.0),
                DVec2::new(1.0, 1.0),
            ]
        );
        assert_eq!(mesh.triangles, vec![[0, 2, 1], [2, 3, 1]]);
    }

    #[test]
    fn test_positions_evenly_spaced_with_exact_endpoints() {
        let (n_x, n_y) = (5, 4);
        let (size_x, size_y) = (8.0, 3.0);
        let mesh = generate_plane(&PlaneParams::new(n_x, n_y).with_size(size_x, size_y)).unwrap();

        let xs = distinct_sorted(mesh.positions.iter().map(|p| p.x));
        let ys = distinct_sorted(mesh.positions.iter().map(|p| p.y));
        assert_eq!(xs.len(), n_x as usize);
        assert_eq!(ys.len(), n_y as usize);

        assert_eq!(xs[0], -size_x / 2.0);
        assert_eq!(*xs.last().unwrap(), size_x / 2.0);
        assert_eq!(ys[0], -size_y / 2.0);
        assert_eq!(*ys.last().unwrap(), size_y / 2.0);

        let step_x = size_x / f64::from(n_x - 1);
        for pair in xs.windows(2) {
            assert!((pair[1] - pair[0] - step_x).abs() < 1e-12);
        }
        let step_y = size_y / f64::from(n_y - 1);
        for pair in ys.windows(2) {
            assert!((pair[1] - pair[0] - step_y).abs() < 1e-12);
        }

        assert!(mesh.positions.iter().all(|p| p.z == 0.0));
    }

    #[test]
    fn test_uvs_in_unit_square() {
        let mesh = generate_plane(&PlaneParams::new(7, 3)).unwrap();
        for uv in &mesh.uvs {
            assert!((0.0..=1.0).contains(&uv.x), "u out of range: {uv}");
            assert!((0.0..=1.0).contains(&uv.y), "v out of range: {uv}");
        }
        assert!(mesh.uvs.contains(&DVec2::ZERO));
        assert!(mesh.uvs.contains(&DVec2::ONE));
    }

    #[test]
    fn test_normals_constant_up() {
        let mesh = generate_plane(&PlaneParams::new(4, 6)).unwrap();
        assert!(mesh.normals.iter().all(|n| *n == DVec3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_indices_in_range() {
        let mesh = generate_plane(&PlaneParams::new(6, 9)).unwrap();
        let count = mesh.vertex_count() as u32;
        for tri in &mesh.triangles {
            assert!(tri.iter().all(|&i| i < count), "index out of range: {tri:?}");
        }
    }

    #[test]
    fn test_consistent_winding() {
        // Every triangle faces +Z when projected onto XY
        let mesh = generate_plane(&PlaneParams::new(4, 3).with_size(3.0, 2.0)).unwrap();
        let signs: Vec<bool> = mesh
            .triangles
            .iter()
            .map(|&[a, b, c]| {
                let (a, b, c) = (
                    mesh.positions[a as usize],
                    mesh.positions[b as usize],
                    mesh.positions[c as usize],
                );
                (b - a).cross(c - a).z > 0.0
            })
            .collect();
        assert!(signs.iter().all(|&s| s == signs[0]));
    }

    #[test]
    fn test_strip_has_no_triangles() {
        let column = generate_plane(&PlaneParams::new(1, 5)).unwrap();
        assert_eq!(column.vertex_count(), 5);
        assert_eq!(column.triangle_count(), 0);
        // Collapsed axis sits at the lower bound
        assert!(column.positions.iter().all(|p| p.x == -50.0));
        assert!(column.uvs.iter().all(|uv| uv.x == 0.0));

        let row = generate_plane(&PlaneParams::new(3, 1)).unwrap();
        assert_eq!(row.vertex_count(), 3);
        assert_eq!(row.triangle_count(), 0);

        let single = generate_plane(&PlaneParams::new(1, 1)).unwrap();
        assert_eq!(single.positions, vec![DVec3::new(-50.0, -50.0, 0.0)]);
    }

    #[test]
    fn test_empty_grid_rejected() {
        assert!(matches!(
            generate_plane(&PlaneParams::new(0, 3)),
            Err(PlaneError::EmptyGrid { .. })
        ));
    }
}
