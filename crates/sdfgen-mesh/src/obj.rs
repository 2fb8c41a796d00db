//! Wavefront OBJ import.
//!
//! Only geometry is read: `v` positions, `vn` normals and `f` faces.
//! Polygons are fan-triangulated. Normals are taken from the file only when
//! every face vertex references one whose index matches its position index;
//! otherwise smooth normals are recomputed from the winding.

use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use sdfgen_math::{Point3, Vec3};

use crate::error::{MeshError, Result};
use crate::TriangleMesh;

/// Parse an OBJ mesh from a reader.
pub fn parse_obj<R: Read>(reader: R) -> Result<TriangleMesh> {
    let buf_reader = BufReader::new(reader);
    let mut positions: Vec<Point3> = Vec::new();
    let mut file_normals: Vec<Vec3> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();
    let mut normals_match = true;

    for (line_idx, line) in buf_reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        let line_no = line_idx + 1;

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("v") => positions.push(Point3::from(parse_triple(&mut parts, line_no, "vertex")?)),
            Some("vn") => file_normals.push(parse_triple(&mut parts, line_no, "normal")?),
            Some("f") => {
                // Supports: "f 1 2 3", "f 1/1 2/2 3/3", "f 1/1/1 2/2/2 3/3/3", "f 1//1 2//2 3//3"
                let mut face: Vec<u32> = Vec::new();
                for part in parts {
                    let mut fields = part.split('/');
                    let v = resolve_index(fields.next().unwrap_or(part), positions.len(), line_no)?;
                    let vn = match fields.nth(1) {
                        Some(s) if !s.is_empty() => {
                            Some(resolve_index(s, file_normals.len(), line_no)?)
                        }
                        _ => None,
                    };
                    if vn != Some(v) {
                        normals_match = false;
                    }
                    face.push(v);
                }

                if face.len() < 3 {
                    return Err(MeshError::Parse {
                        line: line_no,
                        message: format!("face has {} vertices, need at least 3", face.len()),
                    });
                }
                for i in 1..face.len() - 1 {
                    indices.extend_from_slice(&[face[0], face[i], face[i + 1]]);
                }
            }
            // Texture coordinates, groups, materials and smoothing are ignored
            _ => {}
        }
    }

    if indices.is_empty() {
        return Err(MeshError::EmptyMesh);
    }

    let mut mesh = TriangleMesh {
        positions,
        indices,
        normals: Vec::new(),
    };

    if normals_match && file_normals.len() >= mesh.positions.len() {
        file_normals.truncate(mesh.positions.len());
        mesh.normals = file_normals;
    } else {
        tracing::debug!("OBJ normals missing or not per-vertex, recomputing smooth normals");
        mesh.compute_vertex_normals();
    }

    tracing::debug!(
        vertices = mesh.num_vertices(),
        triangles = mesh.num_triangles(),
        "parsed OBJ mesh"
    );
    Ok(mesh)
}

/// Parse an OBJ mesh from a file path.
pub fn parse_obj_file<P: AsRef<Path>>(path: P) -> Result<TriangleMesh> {
    let file = std::fs::File::open(path)?;
    parse_obj(file)
}

fn parse_triple<'a>(
    parts: &mut impl Iterator<Item = &'a str>,
    line: usize,
    what: &str,
) -> Result<Vec3> {
    let mut next = |axis: &str| -> Result<f32> {
        parts
            .next()
            .ok_or_else(|| MeshError::Parse {
                line,
                message: format!("missing {what} {axis}"),
            })?
            .parse()
            .map_err(|_| MeshError::Parse {
                line,
                message: format!("invalid {what} {axis}"),
            })
    };
    let x = next("x")?;
    let y = next("y")?;
    let z = next("z")?;
    Ok(Vec3::new(x, y, z))
}

/// Convert a 1-based (or negative, relative) OBJ index to a 0-based one.
fn resolve_index(s: &str, count: usize, line: usize) -> Result<u32> {
    let idx: i64 = s.parse().map_err(|_| MeshError::Parse {
        line,
        message: format!("invalid face index: {s}"),
    })?;

    let resolved = if idx > 0 { idx - 1 } else { count as i64 + idx };
    if idx == 0 || resolved < 0 || resolved >= count as i64 {
        return Err(MeshError::VertexOutOfRange {
            line,
            index: idx,
            count,
        });
    }
    Ok(resolved as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const QUAD: &str = "\
# unit quad
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
f 1 2 3 4
";

    #[test]
    fn test_parse_quad_fan() {
        let mesh = parse_obj(QUAD.as_bytes()).unwrap();
        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(mesh.normals.len(), 4);
        assert_relative_eq!(mesh.normals[0].z, 1.0);
    }

    #[test]
    fn test_parse_slash_forms_and_negative_indices() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nf -3/1 -2/1 -1/1\n";
        let mesh = parse_obj(src.as_bytes()).unwrap();
        assert_eq!(mesh.indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_parse_uses_file_normals() {
        let src = "\
v 0 0 0
v 1 0 0
v 0 1 0
vn 0 0 -1
vn 0 0 -1
vn 0 0 -1
f 1//1 2//2 3//3
";
        let mesh = parse_obj(src.as_bytes()).unwrap();
        // File normals are kept even when they disagree with the winding
        assert_relative_eq!(mesh.normals[1].z, -1.0);
    }

    #[test]
    fn test_parse_out_of_range() {
        let src = "v 0 0 0\nv 1 0 0\nf 1 2 3\n";
        let err = parse_obj(src.as_bytes()).unwrap_err();
        assert!(matches!(err, MeshError::VertexOutOfRange { line: 3, index: 3, count: 2 }));
    }

    #[test]
    fn test_parse_invalid_vertex() {
        let err = parse_obj("v 0 zero 0\n".as_bytes()).unwrap_err();
        assert!(matches!(err, MeshError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_parse_empty() {
        let err = parse_obj("v 0 0 0\n".as_bytes()).unwrap_err();
        assert!(matches!(err, MeshError::EmptyMesh));
    }
}
