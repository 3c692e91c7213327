//! Mesh topology queries.
//!
//! Builds adjacency data structures from the triangle index buffer,
//! enabling the constraint-generation queries the cloth builder needs
//! (undirected edge list, interior edges with wing vertices).
//!
//! Edge discovery is deterministic: edges are recorded in first-encounter
//! order while iterating triangles in index order. Constraint registration
//! order is observable under Gauss–Seidel projection, so topology iteration
//! order must not depend on hash-map internals.

use std::collections::HashMap;

use crate::mesh::TriangleMesh;
use tulle_types::{TulleError, TulleResult};

/// Precomputed topology information for a triangle mesh.
///
/// Built once when a mesh is loaded. Provides the adjacency used by:
/// - Distance constraint generation (one per undirected edge)
/// - Bending constraint generation (interior edges with wing vertices)
#[derive(Debug, Clone)]
pub struct Topology {
    /// For each vertex, the list of triangles that contain it.
    pub vertex_triangles: Vec<Vec<u32>>,

    /// Unique edges as `(v_min, v_max)` pairs, in first-encounter order.
    pub edges: Vec<[u32; 2]>,

    /// For each edge, the one or two adjacent triangles.
    /// Boundary edges have exactly 1 adjacent triangle.
    pub edge_triangles: Vec<Vec<u32>>,

    /// Interior edges (shared by exactly 2 triangles), in the order their
    /// second triangle was encountered. These are the edges where bending
    /// constraints are applied.
    pub interior_edges: Vec<InteriorEdge>,
}

/// An interior (non-boundary) edge with its two adjacent triangles.
///
/// Used for bending constraint generation: the dihedral angle between
/// tri_a and tri_b across this edge defines the bending measure. The
/// constraint particle order is (v0, v1, wing_a, wing_b).
#[derive(Debug, Clone, Copy)]
pub struct InteriorEdge {
    /// Index of vertex A of the shared edge.
    pub v0: u32,
    /// Index of vertex B of the shared edge.
    pub v1: u32,
    /// The "wing" vertex of triangle A (not on the edge).
    pub wing_a: u32,
    /// The "wing" vertex of triangle B (not on the edge).
    pub wing_b: u32,
    /// Index of adjacent triangle A (encountered first).
    pub tri_a: u32,
    /// Index of adjacent triangle B.
    pub tri_b: u32,
}

impl Topology {
    /// Build topology from a triangle mesh.
    ///
    /// Fails with [`TulleError::InvalidMesh`] if any edge is shared by more
    /// than two triangles (non-manifold input).
    pub fn build(mesh: &TriangleMesh) -> TulleResult<Self> {
        let vertex_count = mesh.vertex_count();
        let tri_count = mesh.triangle_count();

        // Vertex → triangle adjacency
        let mut vertex_triangles: Vec<Vec<u32>> = vec![Vec::new(); vertex_count];
        for t in 0..tri_count {
            let [a, b, c] = mesh.triangle(t);
            vertex_triangles[a as usize].push(t as u32);
            vertex_triangles[b as usize].push(t as u32);
            vertex_triangles[c as usize].push(t as u32);
        }

        // Edge discovery. The map canonicalizes edge direction and points
        // into the order-preserving edge vectors.
        let mut edge_index: HashMap<(u32, u32), usize> = HashMap::new();
        let mut edges: Vec<[u32; 2]> = Vec::new();
        let mut edge_triangles: Vec<Vec<u32>> = Vec::new();
        let mut interior_edges: Vec<InteriorEdge> = Vec::new();

        for t in 0..tri_count {
            let [a, b, c] = mesh.triangle(t);
            for (v0, v1) in [(a, b), (b, c), (c, a)] {
                let key = if v0 < v1 { (v0, v1) } else { (v1, v0) };
                let idx = *edge_index.entry(key).or_insert_with(|| {
                    edges.push([key.0, key.1]);
                    edge_triangles.push(Vec::new());
                    edges.len() - 1
                });

                edge_triangles[idx].push(t as u32);
                match edge_triangles[idx].len() {
                    1 => {}
                    2 => {
                        let tri_a = edge_triangles[idx][0];
                        let tri_b = edge_triangles[idx][1];
                        interior_edges.push(InteriorEdge {
                            v0: key.0,
                            v1: key.1,
                            wing_a: find_wing_vertex(mesh, tri_a, key.0, key.1),
                            wing_b: find_wing_vertex(mesh, tri_b, key.0, key.1),
                            tri_a,
                            tri_b,
                        });
                    }
                    _ => {
                        return Err(TulleError::InvalidMesh(format!(
                            "Non-manifold edge ({}, {}) shared by more than two triangles",
                            key.0, key.1
                        )));
                    }
                }
            }
        }

        Ok(Self {
            vertex_triangles,
            edges,
            edge_triangles,
            interior_edges,
        })
    }

    /// Returns the number of boundary edges (edges with only 1 adjacent
    /// triangle).
    pub fn boundary_edge_count(&self) -> usize {
        self.edge_triangles
            .iter()
            .filter(|tris| tris.len() == 1)
            .count()
    }

    /// Returns true if the mesh is closed (no boundary edges).
    pub fn is_closed(&self) -> bool {
        self.boundary_edge_count() == 0
    }
}

/// Find the vertex in triangle `tri` that is not v0 or v1 (the "wing"
/// vertex).
fn find_wing_vertex(mesh: &TriangleMesh, tri: u32, v0: u32, v1: u32) -> u32 {
    let [a, b, c] = mesh.triangle(tri as usize);
    if a != v0 && a != v1 {
        a
    } else if b != v0 && b != v1 {
        b
    } else {
        c
    }
}
