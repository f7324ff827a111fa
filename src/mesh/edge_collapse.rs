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

//! Greedy vertex-collapse decimation.
//!
//! Each live vertex carries the cheapest neighbor to collapse into and the
//! cost of doing so. The cost of moving `u` onto `v` is the edge length
//! scaled by a curvature term: for every face around `u`, the smallest
//! normal deviation `(1 - n_f . n_s) / 2` against the faces shared by `u`
//! and `v`, maximised over the faces of `u`. Flat regions therefore go first
//! and creases go last.

use std::{cmp::Ordering, collections::BinaryHeap};

use crate::{
    impl_mesh,
    mesh::basic_types::{DecimateOpts, DecimateStats},
    numeric::scalar::Scalar,
};

/// Min-heap entry; `stamp` rejects entries that were superseded by a later
/// cost update of the same vertex.
#[derive(Debug, Clone, Copy)]
struct Candidate<T> {
    cost: T,
    vertex: usize,
    stamp: u64,
}

impl<T: Scalar> PartialEq for Candidate<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T: Scalar> Eq for Candidate<T> {}

impl<T: Scalar> PartialOrd for Candidate<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Scalar> Ord for Candidate<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // reversed: BinaryHeap is a max-heap
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl_mesh! {
    /// Cost of collapsing `u` onto `v`.
    pub fn edge_collapse_cost(&self, u: usize, v: usize) -> T {
        let edge_length = self.vertices[u].position.distance_to(&self.vertices[v].position);

        let sides: Vec<usize> = self.vertices[u]
            .faces
            .iter()
            .copied()
            .filter(|&f| self.triangles[f].has_vertex(v))
            .collect();

        let mut curvature = T::zero();
        for &f in &self.vertices[u].faces {
            let nf = self.triangles[f].normal;
            let mut min_curv = T::one();
            for &s in &sides {
                let dot = nf.dot(&self.triangles[s].normal);
                min_curv = min_curv.min((T::one() - dot) * T::half());
            }
            curvature = curvature.max(min_curv);
        }

        edge_length * curvature
    }

    /// Picks the cheapest neighbor of `v` as its collapse target. Locked
    /// vertices get an infinite cost; isolated ones a small negative cost so
    /// they are cleared first.
    pub fn compute_cost_at_vertex(&mut self, v: usize) {
        if self.vertices[v].locked {
            self.vertices[v].collapse = None;
            self.vertices[v].cost = T::infinity();
            return;
        }
        if self.vertices[v].is_isolated() {
            self.vertices[v].collapse = None;
            self.vertices[v].cost = T::from_f64_lossy(-0.01);
            return;
        }

        let mut best_cost = T::infinity();
        let mut best = None;
        for i in 0..self.vertices[v].neighbors.len() {
            let n = self.vertices[v].neighbors[i];
            let c = self.edge_collapse_cost(v, n);
            if best.is_none() || c < best_cost {
                best = Some(n);
                best_cost = c;
            }
        }
        self.vertices[v].collapse = best;
        self.vertices[v].cost = best_cost;
    }

    /// Collapses `u` onto `v`: faces on the edge are deleted, the rest of
    /// `u`'s faces are rewired to `v`, then `u` is removed. With no target,
    /// `u` and all of its faces are simply dropped.
    ///
    /// A rewired face whose corners match a face already on `v` is deleted
    /// too, so folding a closed region never leaves back-to-back duplicates.
    ///
    /// Returns the former neighbors of `u`; their costs have already been
    /// recomputed.
    pub fn collapse(&mut self, u: usize, v: Option<usize>) -> Vec<usize> {
        if self.vertices[u].deleted {
            return Vec::new();
        }
        let neighbors = self.vertices[u].neighbors.clone();

        match v {
            Some(v) if v != u && !self.vertices[v].deleted => {
                let on_edge: Vec<usize> = self.vertices[u]
                    .faces
                    .iter()
                    .copied()
                    .filter(|&f| self.triangles[f].has_vertex(v))
                    .collect();
                for t in on_edge {
                    self.delete_triangle(t);
                }

                let moving = self.vertices[u].faces.clone();
                for t in moving {
                    self.replace_vertex(t, u, v);
                    // a closed fan folds onto faces `v` already has
                    if self.has_twin_face(t, v) {
                        self.delete_triangle(t);
                    }
                }
                self.vertices[u].collapse = Some(v);
            }
            _ => {
                let faces = self.vertices[u].faces.clone();
                for t in faces {
                    self.delete_triangle(t);
                }
                self.vertices[u].collapse = None;
            }
        }

        self.remove_vert(u);

        for &n in &neighbors {
            if !self.vertices[n].deleted {
                self.compute_cost_at_vertex(n);
            }
        }
        neighbors
    }

    fn has_twin_face(&self, t: usize, v: usize) -> bool {
        let mut corners = self.triangles[t].vertices;
        corners.sort_unstable();
        self.vertices[v].faces.iter().any(|&f| {
            let mut other = self.triangles[f].vertices;
            other.sort_unstable();
            f != t && !self.triangles[f].removed && other == corners
        })
    }

    /// Collapses the cheapest vertex until `opts.target_vertices` live
    /// vertices remain, nothing collapsible is left, or the next cost would
    /// exceed `opts.max_cost`.
    pub fn decimate(&mut self, opts: &DecimateOpts<T>) -> DecimateStats {
        let original_vertices = self.vertex_count();
        let original_triangles = self.triangle_count();
        log::debug!(
            "decimating {} vertices / {} triangles down to {} vertices",
            original_vertices,
            original_triangles,
            opts.target_vertices
        );

        // border locks only hold for this run; caller locks are left alone
        let border_locked: Vec<usize> = if opts.lock_border {
            (0..self.vertices.len())
                .filter(|&v| {
                    let vert = &self.vertices[v];
                    !vert.deleted && !vert.locked && self.is_border(v)
                })
                .collect()
        } else {
            Vec::new()
        };
        if opts.lock_border {
            log::debug!("locking {} border vertices", border_locked.len());
        }
        for &v in &border_locked {
            self.vertices[v].locked = true;
        }

        let mut stamps = vec![0u64; self.vertices.len()];
        let mut heap = BinaryHeap::with_capacity(self.vertices.len());
        for v in 0..self.vertices.len() {
            if self.vertices[v].deleted {
                continue;
            }
            self.compute_cost_at_vertex(v);
            if self.vertices[v].cost.is_finite() {
                heap.push(Candidate { cost: self.vertices[v].cost, vertex: v, stamp: 0 });
            }
        }

        let mut live = original_vertices;
        let mut collapses = 0;

        while live > opts.target_vertices {
            let Some(c) = heap.pop() else { break };
            let u = c.vertex;
            if self.vertices[u].deleted || c.stamp != stamps[u] {
                continue;
            }

            // target vanished since the cost was computed
            if self.vertices[u].collapse.is_some_and(|t| self.vertices[t].deleted) {
                self.compute_cost_at_vertex(u);
                stamps[u] += 1;
                if self.vertices[u].cost.is_finite() {
                    heap.push(Candidate { cost: self.vertices[u].cost, vertex: u, stamp: stamps[u] });
                }
                continue;
            }

            if let Some(max) = opts.max_cost {
                if c.cost > max {
                    log::debug!("stopping at cost {} (limit {})", c.cost, max);
                    break;
                }
            }

            let target = self.vertices[u].collapse;
            log::trace!("collapse {} -> {:?} (cost {})", u, target, c.cost);
            let touched = self.collapse(u, target);
            live -= 1;
            collapses += 1;

            for n in touched {
                if self.vertices[n].deleted {
                    continue;
                }
                stamps[n] += 1;
                if self.vertices[n].cost.is_finite() {
                    heap.push(Candidate { cost: self.vertices[n].cost, vertex: n, stamp: stamps[n] });
                }
            }
        }

        for v in border_locked {
            self.vertices[v].locked = false;
            if !self.vertices[v].deleted {
                self.compute_cost_at_vertex(v);
            }
        }

        debug_assert!(self.is_consistent(), "decimation broke neighbor/face consistency");

        let stats = DecimateStats {
            original_vertices,
            original_triangles,
            final_vertices: live,
            final_triangles: self.triangle_count(),
            collapses,
        };
        log::debug!(
            "decimation finished: {} collapses, {} vertices / {} triangles left",
            stats.collapses,
            stats.final_vertices,
            stats.final_triangles
        );
        stats
    }
}
