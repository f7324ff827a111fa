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

use crate::{
    geometry::vector_3::Vector3,
    impl_mesh,
    mesh::{error::MeshError, triangle::Triangle, vertex::Vertex},
};

impl_mesh! {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
        }
    }

    /// Builds the graph from a position list and a flat triangle index list.
    pub fn from_indexed(positions: &[Vector3<T>], indices: &[usize]) -> Result<Self, MeshError> {
        if indices.len() % 3 != 0 {
            return Err(MeshError::IndexCountNotMultipleOfThree(indices.len()));
        }

        let mut mesh = Self::new();
        mesh.vertices.reserve(positions.len());
        mesh.triangles.reserve(indices.len() / 3);

        for p in positions {
            mesh.add_vertex(*p);
        }
        for tri in indices.chunks_exact(3) {
            mesh.add_triangle(tri[0], tri[1], tri[2])?;
        }

        log::debug!(
            "built mesh graph: {} vertices, {} triangles",
            mesh.vertices.len(),
            mesh.triangles.len()
        );
        Ok(mesh)
    }

    pub fn add_vertex(&mut self, position: Vector3<T>) -> usize {
        let idx = self.vertices.len();
        self.vertices.push(Vertex::new(idx, position));
        idx
    }

    /// Adds a triangle and links its corners as mutual neighbors.
    pub fn add_triangle(&mut self, v0: usize, v1: usize, v2: usize) -> Result<usize, MeshError> {
        let count = self.vertices.len();
        for index in [v0, v1, v2] {
            if index >= count {
                return Err(MeshError::VertexOutOfRange { index, count });
            }
        }
        if v0 == v1 || v1 == v2 || v2 == v0 {
            return Err(MeshError::DegenerateTriangle(v0, v1, v2));
        }

        let t = self.triangles.len();
        self.triangles.push(Triangle::new([v0, v1, v2]));

        for v in [v0, v1, v2] {
            self.vertices[v].add_face(t);
        }
        self.link_corners(t);
        self.refresh_normal(t);

        Ok(t)
    }

    /// Live vertex count.
    pub fn vertex_count(&self) -> usize {
        self.vertices.iter().filter(|v| !v.deleted).count()
    }

    /// Live triangle count.
    pub fn triangle_count(&self) -> usize {
        self.triangles.iter().filter(|t| !t.removed).count()
    }

    pub fn is_border(&self, v: usize) -> bool {
        self.vertices[v].is_border(&self.triangles)
    }

    /// Severs every neighbor relation of `v` in both directions and marks it
    /// deleted. Face lists are not touched. Returns `false` if `v` was already
    /// deleted.
    pub fn remove_vert(&mut self, v: usize) -> bool {
        if self.vertices[v].deleted {
            return false;
        }
        let neighbors = std::mem::take(&mut self.vertices[v].neighbors);
        for n in neighbors {
            let list = &mut self.vertices[n].neighbors;
            if let Some(i) = list.iter().position(|&x| x == v) {
                list.remove(i);
            }
        }
        self.vertices[v].deleted = true;
        true
    }

    /// Marks `t` removed, detaches it from its corners and drops neighbor
    /// links that no other triangle supports. Returns `false` if `t` was
    /// already removed.
    pub fn delete_triangle(&mut self, t: usize) -> bool {
        if self.triangles[t].removed {
            return false;
        }
        self.triangles[t].removed = true;

        let corners = self.triangles[t].vertices;
        for v in corners {
            self.vertices[v].remove_face(t);
        }
        let pairs: Vec<(usize, usize)> = self.triangles[t].corner_pairs().collect();
        for (a, b) in pairs {
            self.vertices[a].remove_if_non_neighbor(b, &self.triangles);
        }
        true
    }

    /// Rewires the `old` corner of `t` to `new`, moving `t` between face lists
    /// and repairing neighbor sets on both sides.
    pub fn replace_vertex(&mut self, t: usize, old: usize, new: usize) -> bool {
        let Some(slot) = self.triangles[t].vertices.iter().position(|&x| x == old) else {
            return false;
        };
        debug_assert!(!self.triangles[t].has_vertex(new), "replace_vertex would fold triangle {}", t);
        self.triangles[t].vertices[slot] = new;

        self.vertices[old].remove_face(t);
        self.vertices[new].add_face(t);

        let corners = self.triangles[t].vertices;
        for x in corners {
            self.vertices[old].remove_if_non_neighbor(x, &self.triangles);
            self.vertices[x].remove_if_non_neighbor(old, &self.triangles);
        }
        self.link_corners(t);
        self.refresh_normal(t);
        true
    }

    /// Compacts live vertices and triangles into fresh position and index
    /// buffers.
    pub fn to_indexed(&self) -> (Vec<Vector3<T>>, Vec<usize>) {
        let mut remap = vec![usize::MAX; self.vertices.len()];
        let mut positions = Vec::with_capacity(self.vertex_count());
        for (i, v) in self.vertices.iter().enumerate() {
            if v.deleted {
                continue;
            }
            remap[i] = positions.len();
            positions.push(v.position);
        }

        let mut indices = Vec::with_capacity(self.triangle_count() * 3);
        for tri in &self.triangles {
            if tri.removed || tri.vertices.iter().any(|&v| self.vertices[v].deleted) {
                continue;
            }
            indices.extend(tri.vertices.iter().map(|&v| remap[v]));
        }
        (positions, indices)
    }

    /// True when the neighbor list of `v` is exactly the set of other corners
    /// of its incident triangles, with no duplicates.
    pub fn neighbors_consistent(&self, v: usize) -> bool {
        let vert = &self.vertices[v];
        let mut expected: Vec<usize> = vert
            .faces
            .iter()
            .flat_map(|&f| self.triangles[f].vertices)
            .filter(|&x| x != v)
            .collect();
        expected.sort_unstable();
        expected.dedup();

        let mut actual = vert.neighbors.clone();
        actual.sort_unstable();
        let len = actual.len();
        actual.dedup();

        len == actual.len() && actual == expected
    }

    /// Checks every live vertex and triangle: neighbor sets match face
    /// membership and no live triangle touches a deleted vertex.
    pub fn is_consistent(&self) -> bool {
        let verts_ok = (0..self.vertices.len())
            .filter(|&v| !self.vertices[v].deleted)
            .all(|v| self.neighbors_consistent(v));
        let tris_ok = self
            .triangles
            .iter()
            .filter(|t| !t.removed)
            .all(|t| t.vertices.iter().all(|&v| !self.vertices[v].deleted));
        verts_ok && tris_ok
    }

    fn link_corners(&mut self, t: usize) {
        let pairs: Vec<(usize, usize)> = self.triangles[t].corner_pairs().collect();
        for (a, b) in pairs {
            self.vertices[a].add_neighbor(b);
        }
    }

    fn refresh_normal(&mut self, t: usize) {
        let [a, b, c] = self.triangles[t].vertices;
        let corners = [
            &self.vertices[a].position,
            &self.vertices[b].position,
            &self.vertices[c].position,
        ];
        self.triangles[t].compute_normal(corners);
    }
}
