//! Wavefront OBJ writer and reader
//!
//! Output layout, one section after another:
//!
//! ```text
//! # Vertices
//!
//! v <x> <y> <z>
//!
//! # Texture coordinates
//!
//! vt <u> <v>
//!
//! # Normals
//!
//! vn <x> <y> <z>
//!
//! # Indices
//!
//! f <a>/<a>/<a> <b>/<b>/<b> <c>/<c>/<c>
//!
//! ```
//!
//! Faces reuse the same 1-based index for position, UV and normal. This only works
//! because the three arrays are parallel; a mesh written this way cannot carry UV
//! or normal seams.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use glam::{DVec2, DVec3};
use tracing::info;

use crate::error::PlaneError;
use crate::grid::PlaneMesh;

/// Serialize a mesh as OBJ text.
///
/// Floats use the shortest representation that round-trips, always with a
/// decimal point (`-1.0`, `0.0`, `33.333333333333336`). Magnitudes below `1e-4`
/// or from `1e16` up switch to exponent form without padding or a plus sign
/// (`1e-5`, `1e16`), so such values are not spelled `1e-05` or `1e+16`.
pub fn write_obj<W: Write>(writer: &mut W, mesh: &PlaneMesh) -> std::io::Result<()> {
    writeln!(writer, "# Vertices")?;
    writeln!(writer)?;
    for p in &mesh.positions {
        writeln!(writer, "v {:?} {:?} {:?}", p.x, p.y, p.z)?;
    }
    writeln!(writer)?;

    writeln!(writer, "# Texture coordinates")?;
    writeln!(writer)?;
    for uv in &mesh.uvs {
        writeln!(writer, "vt {:?} {:?}", uv.x, uv.y)?;
    }
    writeln!(writer)?;

    writeln!(writer, "# Normals")?;
    writeln!(writer)?;
    for n in &mesh.normals {
        writeln!(writer, "vn {:?} {:?} {:?}", n.x, n.y, n.z)?;
    }
    writeln!(writer)?;

    writeln!(writer, "# Indices")?;
    writeln!(writer)?;
    for &[i0, i1, i2] in &mesh.triangles {
        // OBJ indices are 1-based
        let (a, b, c) = (u64::from(i0) + 1, u64::from(i1) + 1, u64::from(i2) + 1);
        writeln!(writer, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
    }
    writeln!(writer)?;

    Ok(())
}

/// Write a mesh to `path`, creating or truncating the file.
///
/// The file is not written atomically: a failure partway leaves a truncated file.
pub fn save_obj(path: &Path, mesh: &PlaneMesh) -> Result<(), PlaneError> {
    let file = File::create(path).map_err(|e| PlaneError::io(path, e))?;
    let mut writer = BufWriter::new(file);

    write_obj(&mut writer, mesh).map_err(|e| PlaneError::io(path, e))?;
    writer.flush().map_err(|e| PlaneError::io(path, e))?;

    info!(
        "Wrote {}: {} vertices, {} triangles",
        path.display(),
        mesh.vertex_count(),
        mesh.triangle_count()
    );

    Ok(())
}

/// Read an OBJ file produced by [`write_obj`] back into a mesh
pub fn load_obj(path: &Path) -> Result<PlaneMesh, PlaneError> {
    let file = File::open(path).map_err(|e| PlaneError::io(path, e))?;
    parse_obj(BufReader::new(file)).map_err(|e| match e {
        PlaneError::Io { source, .. } => PlaneError::io(path, source),
        other => other,
    })
}

/// Parse `v`, `vt`, `vn` and `f` statements into a mesh.
///
/// Faces must be triangles whose corners repeat one index (`i/i/i`). Comments and
/// other statements are skipped.
pub fn parse_obj<R: BufRead>(reader: R) -> Result<PlaneMesh, PlaneError> {
    let mut mesh = PlaneMesh::default();
    // (line, triangle) pairs, range-checked once all vertices are known
    let mut faces: Vec<(usize, [u32; 3])> = Vec::new();
    let mut line_no = 0;

    for line in reader.lines() {
        line_no += 1;
        let line = line.map_err(|e| PlaneError::io(Path::new("<reader>"), e))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts[0] {
            "v" => {
                let [x, y, z] = parse_floats::<3>(&parts[1..], line_no)?;
                mesh.positions.push(DVec3::new(x, y, z));
            }
            "vt" => {
                let [u, v] = parse_floats::<2>(&parts[1..], line_no)?;
                mesh.uvs.push(DVec2::new(u, v));
            }
            "vn" => {
                let [x, y, z] = parse_floats::<3>(&parts[1..], line_no)?;
                mesh.normals.push(DVec3::new(x, y, z));
            }
            "f" => {
                if parts.len() != 4 {
                    return Err(PlaneError::parse(
                        line_no,
                        format!("expected 3 face corners, found {}", parts.len() - 1),
                    ));
                }
                let mut tri = [0u32; 3];
                for (slot, corner) in tri.iter_mut().zip(&parts[1..]) {
                    *slot = parse_face_corner(corner, line_no)?;
                }
                faces.push((line_no, tri));
            }
            _ => {}
        }
    }

    let count = mesh.positions.len();
    if mesh.uvs.len() != count || mesh.normals.len() != count {
        return Err(PlaneError::parse(
            line_no,
            format!(
                "attribute counts differ: {} positions, {} uvs, {} normals",
                count,
                mesh.uvs.len(),
                mesh.normals.len()
            ),
        ));
    }

    for (line, tri) in faces {
        if let Some(&bad) = tri.iter().find(|&&i| i as usize >= count) {
            return Err(PlaneError::parse(
                line,
                format!("face index {} out of range ({} vertices)", bad + 1, count),
            ));
        }
        mesh.triangles.push(tri);
    }

    Ok(mesh)
}

fn parse_floats<const N: usize>(fields: &[&str], line: usize) -> Result<[f64; N], PlaneError> {
    if fields.len() != N {
        return Err(PlaneError::parse(
            line,
            format!("expected {} values, found {}", N, fields.len()),
        ));
    }
    let mut out = [0.0; N];
    for (slot, field) in out.iter_mut().zip(fields) {
        *slot = field
            .parse()
            .map_err(|_| PlaneError::parse(line, format!("invalid number '{field}'")))?;
    }
    Ok(out)
}

/// Parse an `i/i/i` corner into a 0-based index
fn parse_face_corner(corner: &str, line: usize) -> Result<u32, PlaneError> {
    let mut refs = corner.split('/');
    let first = refs.next().unwrap_or_default();
    if !refs.clone().all(|r| r == first) || refs.count() != 2 {
        return Err(PlaneError::parse(
            line,
            format!("face corner '{corner}' must repeat one index as i/i/i"),
        ));
    }

    let index: u32 = first
        .parse()
        .map_err(|_| PlaneError::parse(line, format!("invalid face index '{first}'")))?;
    index
        .checked_sub(1)
        .ok_or_else(|| PlaneError::parse(line, "face indices are 1-based"))
}
