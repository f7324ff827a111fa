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

use buoymesh::{
    geometry::Vector3,
    mesh::{Mesh, MeshError, Vertex},
};
use rand::{Rng, SeedableRng, rngs::StdRng};

type TestMesh = Mesh<f64>;

fn p(x: f64, y: f64, z: f64) -> Vector3<f64> {
    Vector3::new(x, y, z)
}

fn create_square_mesh() -> TestMesh {
    let mut mesh = TestMesh::new();
    let a = mesh.add_vertex(p(0.0, 0.0, 0.0));
    let b = mesh.add_vertex(p(1.0, 0.0, 0.0));
    let c = mesh.add_vertex(p(1.0, 1.0, 0.0));
    let d = mesh.add_vertex(p(0.0, 1.0, 0.0));
    mesh.add_triangle(a, b, c).unwrap();
    mesh.add_triangle(a, c, d).unwrap();
    mesh
}

fn create_test_tetrahedron() -> TestMesh {
    let positions = [
        p(0.0, 0.0, 0.0),
        p(1.0, 0.0, 0.0),
        p(0.0, 1.0, 0.0),
        p(0.0, 0.0, 1.0),
    ];
    let indices = [0, 2, 1, 0, 1, 3, 1, 2, 3, 0, 3, 2];
    TestMesh::from_indexed(&positions, &indices).unwrap()
}

/// `n x n` vertices, two triangles per cell, diagonal from (x,y) to (x+1,y+1).
fn grid_triangles(n: usize) -> Vec<[usize; 3]> {
    let id = |x: usize, y: usize| y * n + x;
    let mut tris = Vec::new();
    for y in 0..n - 1 {
        for x in 0..n - 1 {
            tris.push([id(x, y), id(x + 1, y), id(x + 1, y + 1)]);
            tris.push([id(x, y), id(x + 1, y + 1), id(x, y + 1)]);
        }
    }
    tris
}

fn create_grid_mesh(n: usize) -> TestMesh {
    let mut mesh = TestMesh::new();
    for y in 0..n {
        for x in 0..n {
            mesh.add_vertex(p(x as f64, y as f64, 0.0));
        }
    }
    for [a, b, c] in grid_triangles(n) {
        mesh.add_triangle(a, b, c).unwrap();
    }
    mesh
}

fn sorted(mut v: Vec<usize>) -> Vec<usize> {
    v.sort_unstable();
    v
}

#[test]
fn test_add_neighbor_twice_keeps_one_entry() {
    let mut v = Vertex::<f64>::new(0, Vector3::zero());
    assert!(v.add_neighbor(7));
    assert!(!v.add_neighbor(7));
    assert_eq!(v.neighbors, vec![7]);

    assert!(v.add_neighbor(3));
    assert!(!v.add_neighbor(7));
    assert_eq!(v.neighbors.iter().filter(|&&n| n == 7).count(), 1);
}

#[test]
fn test_face_add_remove_leaves_neighbors_alone() {
    let mut v = Vertex::<f64>::new(0, Vector3::zero());
    v.add_neighbor(1);
    v.add_face(4);
    assert_eq!(v.faces, vec![4]);

    assert!(v.remove_face(4));
    assert!(!v.remove_face(4));
    assert!(!v.remove_face(99));
    assert!(v.faces.is_empty());
    assert_eq!(v.neighbors, vec![1]);
}

#[test]
fn test_square_creation() {
    let mesh = create_square_mesh();
    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.triangle_count(), 2);

    // diagonal endpoints see everyone, the other two see three vertices
    assert_eq!(sorted(mesh.vertices[0].neighbors.clone()), vec![1, 2, 3]);
    assert_eq!(sorted(mesh.vertices[2].neighbors.clone()), vec![0, 1, 3]);
    assert_eq!(sorted(mesh.vertices[1].neighbors.clone()), vec![0, 2]);
    assert_eq!(sorted(mesh.vertices[3].neighbors.clone()), vec![0, 2]);
    assert_eq!(mesh.vertices[0].faces, vec![0, 1]);
    assert!(mesh.is_consistent());
}

#[test]
fn test_vertex_ids_match_indices() {
    let mesh = create_grid_mesh(4);
    for (i, v) in mesh.vertices.iter().enumerate() {
        assert_eq!(v.id, i);
        assert!(!v.deleted);
        assert!(!v.locked);
        assert!(v.collapse.is_none());
    }
}

#[test]
fn test_remove_if_non_neighbor_keeps_shared_edge() {
    let mut mesh = create_square_mesh();

    // 0-2 is covered by both triangles
    mesh.vertices[0].remove_face(0);
    assert!(!mesh.vertices[0].remove_if_non_neighbor(2, &mesh.triangles));
    assert!(mesh.vertices[0].neighbors.contains(&2));

    // 0-1 was only covered by triangle 0
    assert!(mesh.vertices[0].remove_if_non_neighbor(1, &mesh.triangles));
    assert!(!mesh.vertices[0].neighbors.contains(&1));

    // not a neighbor anymore: no-op
    assert!(!mesh.vertices[0].remove_if_non_neighbor(1, &mesh.triangles));
    assert!(!mesh.vertices[0].remove_if_non_neighbor(42, &mesh.triangles));
}

#[test]
fn test_quad_fan_teardown_empties_neighbors() {
    let mut mesh = create_square_mesh();
    let (a, b, c, d) = (0, 1, 2, 3);

    for (t, corners) in [(0, [a, b, c]), (1, [a, c, d])] {
        for v in corners {
            assert!(mesh.vertices[v].remove_face(t));
        }
    }

    let edges = [(a, b), (b, c), (c, a), (a, c), (c, d), (d, a)];
    for (x, y) in edges {
        mesh.vertices[x].remove_if_non_neighbor(y, &mesh.triangles);
        mesh.vertices[y].remove_if_non_neighbor(x, &mesh.triangles);
    }

    for v in &mesh.vertices {
        assert!(v.neighbors.is_empty(), "vertex {} kept {:?}", v.id, v.neighbors);
        assert!(v.faces.is_empty());
    }
}

#[test]
fn test_is_border_square() {
    let mesh = create_square_mesh();
    for v in 0..4 {
        assert!(mesh.is_border(v));
    }
}

#[test]
fn test_is_border_closed_tetrahedron() {
    let mesh = create_test_tetrahedron();
    assert!(mesh.is_consistent());
    for v in 0..4 {
        assert!(!mesh.is_border(v));
        assert_eq!(mesh.vertices[v].neighbors.len(), 3);
        assert_eq!(mesh.vertices[v].faces.len(), 3);
    }
}

#[test]
fn test_is_border_grid() {
    let mesh = create_grid_mesh(4);
    for y in 0..4 {
        for x in 0..4 {
            let on_rim = x == 0 || y == 0 || x == 3 || y == 3;
            assert_eq!(mesh.is_border(y * 4 + x), on_rim, "vertex ({}, {})", x, y);
        }
    }
}

#[test]
fn test_is_border_matches_edge_count_on_random_patches() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..40 {
        let n = 5;
        let mut mesh = TestMesh::new();
        for y in 0..n {
            for x in 0..n {
                mesh.add_vertex(p(x as f64, y as f64, rng.random_range(-0.5..0.5)));
            }
        }
        for [a, b, c] in grid_triangles(n) {
            if rng.random_bool(0.6) {
                mesh.add_triangle(a, b, c).unwrap();
            }
        }
        assert!(mesh.is_consistent());

        for v in 0..mesh.vertices.len() {
            let vert = &mesh.vertices[v];
            let expected = vert.neighbors.iter().any(|&nb| {
                vert.faces
                    .iter()
                    .filter(|&&f| mesh.triangles[f].vertices.contains(&nb))
                    .count()
                    == 1
            });
            assert_eq!(mesh.is_border(v), expected);
        }
    }
}

#[test]
fn test_remove_vert_severs_both_sides() {
    let mut mesh = create_square_mesh();
    // callers detach faces first
    mesh.delete_triangle(0);
    mesh.delete_triangle(1);
    mesh.vertices[1].add_neighbor(0);
    mesh.vertices[0].add_neighbor(1);
    mesh.vertices[0].add_neighbor(3);
    mesh.vertices[3].add_neighbor(0);

    assert!(mesh.remove_vert(0));
    assert!(mesh.vertices[0].deleted);
    assert!(mesh.vertices[0].neighbors.is_empty());
    assert!(!mesh.vertices[1].neighbors.contains(&0));
    assert!(!mesh.vertices[3].neighbors.contains(&0));
}

#[test]
fn test_remove_vert_is_idempotent() {
    let mut mesh = create_square_mesh();
    let faces = mesh.vertices[1].faces.clone();
    for t in faces {
        mesh.delete_triangle(t);
    }

    assert!(mesh.remove_vert(1));
    let snapshot: Vec<Vec<usize>> = mesh.vertices.iter().map(|v| v.neighbors.clone()).collect();

    assert!(!mesh.remove_vert(1));
    assert!(mesh.vertices[1].deleted);
    assert!(mesh.vertices[1].neighbors.is_empty());
    let after: Vec<Vec<usize>> = mesh.vertices.iter().map(|v| v.neighbors.clone()).collect();
    assert_eq!(snapshot, after);
}

#[test]
fn test_remove_vert_leaves_faces() {
    let mut mesh = create_square_mesh();
    assert!(mesh.remove_vert(3));
    assert_eq!(mesh.vertices[3].faces, vec![1]);
}

#[test]
fn test_delete_triangle() {
    let mut mesh = create_square_mesh();
    assert!(mesh.delete_triangle(0));
    assert!(!mesh.delete_triangle(0));

    assert_eq!(mesh.triangle_count(), 1);
    assert!(mesh.vertices[1].faces.is_empty());
    assert!(mesh.vertices[1].neighbors.is_empty());
    // diagonal still carried by triangle 1
    assert_eq!(sorted(mesh.vertices[0].neighbors.clone()), vec![2, 3]);
    assert!(mesh.is_consistent());
}

#[test]
fn test_replace_vertex() {
    let mut mesh = create_grid_mesh(3);
    let t = mesh.vertices[4].faces[0];
    let spare = mesh.add_vertex(p(1.0, 1.0, 1.0));

    assert!(mesh.replace_vertex(t, 4, spare));
    assert!(mesh.triangles[t].has_vertex(spare));
    assert!(!mesh.triangles[t].has_vertex(4));
    assert!(!mesh.vertices[4].faces.contains(&t));
    assert_eq!(mesh.vertices[spare].faces, vec![t]);
    assert!(mesh.is_consistent());

    // the corner is gone now
    assert!(!mesh.replace_vertex(t, 4, spare));
}

#[test]
fn test_triangle_normals_computed_on_insert() {
    let mesh = create_square_mesh();
    for t in &mesh.triangles {
        assert!((t.normal.z - 1.0).abs() < 1e-12);
    }
}

#[test]
fn test_add_triangle_rejects_bad_input() {
    let mut mesh = create_square_mesh();
    assert!(matches!(
        mesh.add_triangle(0, 1, 9),
        Err(MeshError::VertexOutOfRange { index: 9, count: 4 })
    ));
    assert!(matches!(
        mesh.add_triangle(0, 1, 1),
        Err(MeshError::DegenerateTriangle(0, 1, 1))
    ));
    assert_eq!(mesh.triangles.len(), 2);
}

#[test]
fn test_from_indexed_rejects_ragged_indices() {
    let positions = [p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0)];
    let err = TestMesh::from_indexed(&positions, &[0, 1]).unwrap_err();
    assert!(matches!(err, MeshError::IndexCountNotMultipleOfThree(2)));
}

#[test]
fn test_to_indexed_skips_deleted() {
    let mut mesh = create_square_mesh();
    mesh.delete_triangle(0);
    mesh.remove_vert(1);

    let (positions, indices) = mesh.to_indexed();
    assert_eq!(positions.len(), 3);
    assert_eq!(indices, vec![0, 1, 2]);
    assert_eq!(positions[2], p(0.0, 1.0, 0.0));
}
