// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use crate::{
    geometry::vector_3::Vector3,
    mesh::{basic_types::Mesh, error::MeshError},
    numeric::scalar::Scalar,
};

/// Writes live vertices and triangles. Deleted vertices are compacted away,
/// so indices in the file do not match arena indices.
pub fn write_obj<T: Scalar, P: AsRef<Path>>(mesh: &Mesh<T>, path: P) -> Result<(), MeshError> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    write_obj_to(mesh, &mut out)?;
    out.flush()?;
    Ok(())
}

pub fn write_obj_to<T: Scalar, W: Write>(mesh: &Mesh<T>, out: &mut W) -> Result<(), MeshError> {
    let (positions, indices) = mesh.to_indexed();

    for p in &positions {
        writeln!(out, "v {} {} {}", p.x, p.y, p.z)?;
    }
    // OBJ is 1-based
    for tri in indices.chunks_exact(3) {
        writeln!(out, "f {} {} {}", tri[0] + 1, tri[1] + 1, tri[2] + 1)?;
    }
    Ok(())
}

/// Reads a mesh from a Wavefront OBJ file.
pub fn read_obj<T: Scalar, P: AsRef<Path>>(path: P) -> Result<Mesh<T>, MeshError> {
    let file = File::open(path)?;
    parse_obj(BufReader::new(file))
}

/// Only `v x y z` and `f i j k ...` lines are used; polygons are split into a
/// triangle fan. Face tokens may carry `/vt/vn` suffixes and negative
/// (relative) indices; everything else is skipped.
pub fn parse_obj<T: Scalar, R: BufRead>(reader: R) -> Result<Mesh<T>, MeshError> {
    let mut positions: Vec<Vector3<T>> = Vec::new();
    let mut indices: Vec<usize> = Vec::new();

    for (n, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = n + 1;
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("v") => {
                let mut coords = [0.0f64; 3];
                for c in coords.iter_mut() {
                    let token = parts
                        .next()
                        .ok_or_else(|| parse_err(line_no, "vertex needs three coordinates"))?;
                    *c = token
                        .parse()
                        .map_err(|_| parse_err(line_no, &format!("bad coordinate '{}'", token)))?;
                }
                positions.push(Vector3::from_f64(coords));
            }
            Some("f") => {
                let corners = parts
                    .map(|token| resolve_index(token, positions.len(), line_no))
                    .collect::<Result<Vec<usize>, _>>()?;
                if corners.len() < 3 {
                    return Err(parse_err(
                        line_no,
                        &format!("face needs at least 3 corners, got {}", corners.len()),
                    ));
                }
                // polygons are fanned around their first corner
                for pair in corners[1..].windows(2) {
                    indices.extend_from_slice(&[corners[0], pair[0], pair[1]]);
                }
            }
            _ => {}
        }
    }

    log::debug!(
        "parsed OBJ: {} vertices, {} triangles",
        positions.len(),
        indices.len() / 3
    );
    Mesh::from_indexed(&positions, &indices)
}

fn resolve_index(token: &str, vertex_count: usize, line: usize) -> Result<usize, MeshError> {
    let head = token.split('/').next().unwrap_or(token);
    let raw: i64 = head
        .parse()
        .map_err(|_| parse_err(line, &format!("bad face index '{}'", token)))?;

    let resolved = match raw {
        0 => None,
        r if r > 0 => Some(r as usize - 1),
        r => vertex_count.checked_sub(r.unsigned_abs() as usize),
    };
    resolved.ok_or_else(|| parse_err(line, &format!("face index {} does not name a vertex", raw)))
}

fn parse_err(line: usize, message: &str) -> MeshError {
    MeshError::ObjParse {
        line,
        message: message.to_string(),
    }
}
