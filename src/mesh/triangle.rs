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
    geometry::{util::triangle_normal, vector_3::Vector3},
    numeric::scalar::Scalar,
};

#[derive(Debug, Clone)]
pub struct Triangle<T: Scalar> {
    pub vertices: [usize; 3],
    pub normal: Vector3<T>,
    pub removed: bool,
}

impl<T: Scalar> Triangle<T> {
    pub fn new(vertices: [usize; 3]) -> Self {
        Self {
            vertices,
            normal: Vector3::zero(),
            removed: false,
        }
    }

    #[inline]
    pub fn has_vertex(&self, v: usize) -> bool {
        self.vertices.contains(&v)
    }

    /// Recomputes the unit normal from the given corner positions.
    pub fn compute_normal(&mut self, positions: [&Vector3<T>; 3]) {
        self.normal = triangle_normal(positions[0], positions[1], positions[2]);
    }

    /// Corner pairs `(i, j)` with `i != j`, used when repairing neighbor sets.
    pub(crate) fn corner_pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..3).flat_map(move |i| {
            (0..3)
                .filter(move |&j| j != i)
                .map(move |j| (self.vertices[i], self.vertices[j]))
        })
    }
}
