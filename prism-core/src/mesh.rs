//! Mesh model and the text mesh loader.
//!
//! The format is line oriented: `v x y z` declares a vertex, `f a b c`
//! declares a triangular face by 1-based vertex index, where each index
//! token may carry a `/...` suffix that is ignored. The loader locates the
//! contiguous run of vertex lines and the contiguous run of face lines by
//! first/last line index and parses everything inside those windows. Files
//! that interleave other line kinds inside a run mis-parse by design; see
//! DESIGN.md for why that behavior is kept.

use std::fs;
use std::path::{Path, PathBuf};

use nom::{
    bytes::complete::{take_till, take_till1},
    character::complete::{char, digit1, multispace0, multispace1},
    combinator::{map_res, opt, recognize},
    number::complete::float,
    sequence::{pair, preceded},
    IResult,
};
use thiserror::Error;
use tracing::info;

use crate::geometry::{Triangle, Vec3};

/// An immutable mesh: the declared vertex list plus triangles holding
/// resolved vertex values (indices are resolved at load time).
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vec3>,
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn from_parts(vertices: Vec<Vec3>, triangles: Vec<Triangle>) -> Self {
        Self {
            vertices,
            triangles,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Axis-aligned cube centred on the origin, two triangles per face.
    pub fn cube(size: f32) -> Self {
        let h = size / 2.0;
        let vertices = vec![
            Vec3::new(-h, -h, -h),
            Vec3::new(h, -h, -h),
            Vec3::new(h, h, -h),
            Vec3::new(-h, h, -h),
            Vec3::new(-h, -h, h),
            Vec3::new(h, -h, h),
            Vec3::new(h, h, h),
            Vec3::new(-h, h, h),
        ];
        let faces: [[usize; 3]; 12] = [
            [0, 1, 2],
            [0, 2, 3],
            [4, 6, 5],
            [4, 7, 6],
            [0, 5, 1],
            [0, 4, 5],
            [3, 2, 6],
            [3, 6, 7],
            [0, 3, 7],
            [0, 7, 4],
            [1, 5, 6],
            [1, 6, 2],
        ];
        let triangles = faces
            .iter()
            .map(|f| Triangle::new(vertices[f[0]], vertices[f[1]], vertices[f[2]]))
            .collect();
        Self {
            vertices,
            triangles,
        }
    }

    /// Flat square on the y = 0 plane, useful as a ground surface.
    pub fn plane(size: f32) -> Self {
        let h = size / 2.0;
        let vertices = vec![
            Vec3::new(-h, 0.0, -h),
            Vec3::new(h, 0.0, -h),
            Vec3::new(h, 0.0, h),
            Vec3::new(-h, 0.0, h),
        ];
        let triangles = vec![
            Triangle::new(vertices[0], vertices[1], vertices[2]),
            Triangle::new(vertices[0], vertices[2], vertices[3]),
        ];
        Self {
            vertices,
            triangles,
        }
    }
}

/// Errors terminal to a single load call. No partial mesh is ever returned.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("failed to read mesh file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed {kind} line {line}: {text:?}")]
    Malformed {
        kind: &'static str,
        line: usize,
        text: String,
    },
    #[error("face on line {line} references vertex {index}, but {count} vertices are declared")]
    FaceIndex {
        line: usize,
        index: i64,
        count: usize,
    },
}

/// Loads a mesh from a text file.
pub fn load_mesh<P: AsRef<Path>>(path: P) -> Result<Mesh, MeshError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| MeshError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mesh = parse_mesh(&text)?;
    info!(
        path = %path.display(),
        vertices = mesh.vertices.len(),
        triangles = mesh.triangles.len(),
        "loaded mesh"
    );
    Ok(mesh)
}

/// Tracks the first/last 1-based line index of one line kind. The first
/// sighting opens a window one line wider than itself; subsequent sightings
/// extend it. This reproduces the reference loader exactly.
struct LineWindow {
    first: usize,
    last: usize,
}

impl LineWindow {
    fn new() -> Self {
        Self { first: 1, last: 1 }
    }

    fn record(&mut self, line: usize) {
        if self.first == self.last {
            self.first = line;
            self.last = line + 1;
        } else {
            self.last = line;
        }
    }

    fn contains(&self, line: usize) -> bool {
        self.first <= line && line <= self.last
    }
}

/// Parses mesh text. See the module docs for the window semantics.
pub fn parse_mesh(text: &str) -> Result<Mesh, MeshError> {
    let lines: Vec<&str> = text.lines().collect();

    let mut vertex_window = LineWindow::new();
    let mut face_window = LineWindow::new();
    for (i, line) in lines.iter().enumerate() {
        match line.split_whitespace().next() {
            Some("v") => vertex_window.record(i + 1),
            Some("f") => face_window.record(i + 1),
            _ => {}
        }
    }

    let mut vertices: Vec<Vec3> = Vec::new();
    let mut triangles: Vec<Triangle> = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        let index = i + 1;
        if vertex_window.contains(index) {
            let (_, vertex) =
                vertex_payload(line).map_err(|_| malformed("vertex", index, line))?;
            vertices.push(vertex);
        } else if face_window.contains(index) {
            let (_, (a, b, c)) = face_payload(line).map_err(|_| malformed("face", index, line))?;
            triangles.push(Triangle::new(
                resolve(a, &vertices, index)?,
                resolve(b, &vertices, index)?,
                resolve(c, &vertices, index)?,
            ));
        }
    }

    Ok(Mesh::from_parts(vertices, triangles))
}

fn malformed(kind: &'static str, line: usize, text: &str) -> MeshError {
    MeshError::Malformed {
        kind,
        line,
        text: text.to_string(),
    }
}

fn resolve(index: i64, vertices: &[Vec3], line: usize) -> Result<Vec3, MeshError> {
    if index < 1 || index as usize > vertices.len() {
        return Err(MeshError::FaceIndex {
            line,
            index,
            count: vertices.len(),
        });
    }
    Ok(vertices[index as usize - 1])
}

/// Skips the leading directive token. The reference never re-checks it
/// inside a window, so neither do we.
fn directive_token(input: &str) -> IResult<&str, &str> {
    preceded(multispace0, take_till1(|c: char| c.is_whitespace()))(input)
}

fn vertex_payload(input: &str) -> IResult<&str, Vec3> {
    let (input, _) = directive_token(input)?;
    let (input, x) = preceded(multispace1, float)(input)?;
    let (input, y) = preceded(multispace1, float)(input)?;
    let (input, z) = preceded(multispace1, float)(input)?;
    Ok((input, Vec3::new(x, y, z)))
}

fn face_payload(input: &str) -> IResult<&str, (i64, i64, i64)> {
    let (input, _) = directive_token(input)?;
    let (input, a) = face_index(input)?;
    let (input, b) = face_index(input)?;
    let (input, c) = face_index(input)?;
    Ok((input, (a, b, c)))
}

fn face_index(input: &str) -> IResult<&str, i64> {
    let (input, _) = multispace1(input)?;
    let (input, index) = map_res(recognize(pair(opt(char('-')), digit1)), str::parse)(input)?;
    // Anything after the first '/' in the token carries no meaning here.
    let (input, _) = opt(preceded(
        char('/'),
        take_till(|c: char| c.is_whitespace()),
    ))(input)?;
    Ok((input, index))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = "\
# two triangles sharing an edge
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
v 0.0 1.0 0.0
f 1 2 3
f 1 3 4
";

    #[test]
    fn round_trip_resolves_one_based_indices() {
        let mesh = parse_mesh(SQUARE).unwrap();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.triangles.len(), 2);
        assert_eq!(mesh.triangles[0].v1, mesh.vertices[0]);
        assert_eq!(mesh.triangles[0].v2, mesh.vertices[1]);
        assert_eq!(mesh.triangles[0].v3, mesh.vertices[2]);
        assert_eq!(mesh.triangles[1].v3, mesh.vertices[3]);
    }

    #[test]
    fn face_tokens_keep_only_index_before_slash() {
        let text = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
f 1/4/7 2//3 3/9
";
        let mesh = parse_mesh(text).unwrap();
        assert_eq!(mesh.triangles.len(), 1);
        assert_eq!(mesh.triangles[0].v2, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(mesh.triangles[0].v3, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn lines_outside_the_runs_are_skipped() {
        let text = "\
mtllib scene.mtl
v -1.0 0.0 0.5
v 1.0 0.0 0.5
v 0.0 2.0 0.5
s off
f 1 2 3
";
        let mesh = parse_mesh(text).unwrap();
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.triangles.len(), 1);
    }

    #[test]
    fn malformed_vertex_number_is_terminal() {
        let text = "\
v 0.0 zero 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
f 1 2 3
";
        match parse_mesh(text) {
            Err(MeshError::Malformed { kind, line, .. }) => {
                assert_eq!(kind, "vertex");
                assert_eq!(line, 1);
            }
            other => panic!("expected malformed vertex error, got {other:?}"),
        }
    }

    #[test]
    fn out_of_range_face_index_is_terminal() {
        let text = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
f 1 2 9
";
        match parse_mesh(text) {
            Err(MeshError::FaceIndex { index, count, .. }) => {
                assert_eq!(index, 9);
                assert_eq!(count, 3);
            }
            other => panic!("expected face index error, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_reports_io_error() {
        match load_mesh("definitely/not/here.mesh") {
            Err(MeshError::Io { path, .. }) => {
                assert!(path.ends_with("here.mesh"));
            }
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn cube_has_twelve_triangles() {
        let cube = Mesh::cube(2.0);
        assert_eq!(cube.vertices.len(), 8);
        assert_eq!(cube.triangle_count(), 12);
        for t in &cube.triangles {
            for v in [t.v1, t.v2, t.v3] {
                assert!(v.x.abs() == 1.0 && v.y.abs() == 1.0 && v.z.abs() == 1.0);
            }
        }
    }

    #[test]
    fn plane_lies_flat() {
        let plane = Mesh::plane(20.0);
        assert_eq!(plane.triangle_count(), 2);
        assert!(plane.triangles.iter().all(|t| t.v1.y == 0.0 && t.v2.y == 0.0 && t.v3.y == 0.0));
    }
}
