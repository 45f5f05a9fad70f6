//! plane-gen library
//!
//! Builds flat rectangular grid meshes centered at the origin and serializes them
//! as Wavefront OBJ text.
//!
//! # Example
//! ```no_run
//! use plane_gen::{generate_plane, save_obj, PlaneParams};
//!
//! let params = PlaneParams::new(16, 16).with_size(10.0, 10.0);
//! let mesh = generate_plane(&params)?;
//! save_obj("plane.obj".as_ref(), &mesh)?;
//! # Ok::<(), plane_gen::PlaneError>(())
//! ```

pub mod error;
pub mod grid;
pub mod obj;
pub mod params;

pub use error::PlaneError;
pub use grid::{generate_plane, grid_index, remap, PlaneMesh};
pub use obj::{load_obj, parse_obj, save_obj, write_obj};
pub use params::{PlaneParams, DEFAULT_SIZE};
