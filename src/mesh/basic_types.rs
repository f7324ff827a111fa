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
    mesh::{triangle::Triangle, vertex::Vertex},
    numeric::scalar::Scalar,
};

/// Index-based vertex/triangle graph. Nothing is ever removed from either
/// array; deletion only sets `Vertex::deleted` / `Triangle::removed`.
#[derive(Debug, Clone, Default)]
pub struct Mesh<T: Scalar> {
    pub vertices: Vec<Vertex<T>>,
    pub triangles: Vec<Triangle<T>>,
}

#[derive(Debug, Clone)]
pub struct DecimateOpts<T> {
    /// Stop once this many live vertices remain.
    pub target_vertices: usize,
    /// Lock every border vertex before collapsing so open outlines survive.
    pub lock_border: bool,
    /// Stop before any collapse whose cost exceeds this value.
    pub max_cost: Option<T>,
}

impl<T: Scalar> Default for DecimateOpts<T> {
    fn default() -> Self {
        Self {
            target_vertices: 0,
            lock_border: false,
            max_cost: None,
        }
    }
}

impl<T: Scalar> DecimateOpts<T> {
    pub fn with_target_vertices(count: usize) -> Self {
        Self {
            target_vertices: count,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimateStats {
    pub original_vertices: usize,
    pub original_triangles: usize,
    pub final_vertices: usize,
    pub final_triangles: usize,
    pub collapses: usize,
}
