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

use crate::{geometry::vector_3::Vector3, mesh::triangle::Triangle, numeric::scalar::Scalar};

#[derive(Debug, Clone)]
pub struct Vertex<T: Scalar> {
    pub position: Vector3<T>,
    pub id: usize,
    /// Locked ("selected") vertices are never collapsed.
    pub locked: bool,
    pub cost: T,
    pub collapse: Option<usize>,
    pub deleted: bool,
    pub faces: Vec<usize>,     // incident triangles
    pub neighbors: Vec<usize>, // vertices sharing at least one triangle
}

impl<T: Scalar> Vertex<T> {
    pub fn new(id: usize, position: Vector3<T>) -> Self {
        Self {
            position,
            id,
            locked: false,
            cost: T::zero(),
            collapse: None,
            deleted: false,
            faces: Vec::new(),
            neighbors: Vec::new(),
        }
    }

    /// Registers `t` as incident. Neighbors are left alone.
    pub fn add_face(&mut self, t: usize) {
        self.faces.push(t);
    }

    /// Returns `false` if `t` was not incident.
    pub fn remove_face(&mut self, t: usize) -> bool {
        match self.faces.iter().position(|&f| f == t) {
            Some(i) => {
                self.faces.remove(i);
                true
            }
            None => false,
        }
    }

    /// Returns `true` only if `v` was not already a neighbor.
    pub fn add_neighbor(&mut self, v: usize) -> bool {
        if self.neighbors.contains(&v) {
            return false;
        }
        self.neighbors.push(v);
        true
    }

    /// Drops `v` from the neighbor list unless one of the remaining incident
    /// triangles still contains it. Returns whether `v` was removed.
    pub fn remove_if_non_neighbor(&mut self, v: usize, triangles: &[Triangle<T>]) -> bool {
        let Some(i) = self.neighbors.iter().position(|&n| n == v) else {
            return false;
        };
        if self.faces.iter().any(|&f| triangles[f].has_vertex(v)) {
            return false;
        }
        self.neighbors.remove(i);
        true
    }

    /// A vertex is on the border when one of its edges is covered by exactly
    /// one incident triangle.
    pub fn is_border(&self, triangles: &[Triangle<T>]) -> bool {
        for &n in &self.neighbors {
            let shared = self
                .faces
                .iter()
                .filter(|&&f| triangles[f].has_vertex(n))
                .count();
            if shared == 1 {
                return true;
            }
        }
        false
    }

    pub fn is_isolated(&self) -> bool {
        self.neighbors.is_empty()
    }
}
