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

//! Area and centroid helpers for triangle and quad patches.
//!
//! Quads are always split along the `a`-`c` diagonal, so callers must pass
//! the corners in a winding consistent with that split. Nothing here applies
//! a tolerance.

use crate::{geometry::vector_3::Vector3, numeric::scalar::Scalar};

/// `0.5 * |(b - a) x (c - a)|`. Collinear or coincident corners give 0.
pub fn triangle_area<T: Scalar>(a: &Vector3<T>, b: &Vector3<T>, c: &Vector3<T>) -> T {
    let ab = *b - *a;
    let ac = *c - *a;
    ab.cross(&ac).norm() * T::half()
}

pub fn triangle_centroid<T: Scalar>(a: &Vector3<T>, b: &Vector3<T>, c: &Vector3<T>) -> Vector3<T> {
    (*a + *b + *c) * T::third()
}

/// Unit normal following the `a -> b -> c` winding; zero for degenerate input.
pub fn triangle_normal<T: Scalar>(a: &Vector3<T>, b: &Vector3<T>, c: &Vector3<T>) -> Vector3<T> {
    let ab = *b - *a;
    let ac = *c - *a;
    ab.cross(&ac).normalized()
}

pub fn quad_area<T: Scalar>(
    a: &Vector3<T>,
    b: &Vector3<T>,
    c: &Vector3<T>,
    d: &Vector3<T>,
) -> T {
    triangle_area(a, b, c) + triangle_area(a, c, d)
}

/// Plain average of the four corners. Only matches the area centroid for
/// parallelograms.
pub fn quad_centroid<T: Scalar>(
    a: &Vector3<T>,
    b: &Vector3<T>,
    c: &Vector3<T>,
    d: &Vector3<T>,
) -> Vector3<T> {
    (*a + *b + *c + *d) * T::quarter()
}

/// Area-weighted average of the centroids of `(a, b, c)` and `(a, c, d)`.
///
/// A quad with zero total area yields NaN components; degenerate patches are
/// expected to be filtered out before this is called.
pub fn surface_weighted_center<T: Scalar>(
    a: &Vector3<T>,
    b: &Vector3<T>,
    c: &Vector3<T>,
    d: &Vector3<T>,
) -> Vector3<T> {
    let area0 = triangle_area(a, b, c);
    let area1 = triangle_area(a, c, d);
    let c0 = triangle_centroid(a, b, c);
    let c1 = triangle_centroid(a, c, d);
    (c0 * area0 + c1 * area1) / (area0 + area1)
}
