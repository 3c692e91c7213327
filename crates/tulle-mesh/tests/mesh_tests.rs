//! Integration tests for tulle-mesh.

use approx::assert_relative_eq;
use tulle_math::{DAffine3, DVec3};
use tulle_mesh::generators::quad_grid;
use tulle_mesh::topology::Topology;
use tulle_mesh::TriangleMesh;

// ─── TriangleMesh Tests ───────────────────────────────────────

#[test]
fn quad_grid_counts() {
    let mesh = quad_grid(4, 3, 2.0, 1.5);
    assert_eq!(mesh.vertex_count(), 5 * 4);
    assert_eq!(mesh.triangle_count(), 4 * 3 * 2);
    mesh.validate().unwrap();
}

#[test]
fn quad_grid_spans_centered_extent() {
    let mesh = quad_grid(2, 2, 2.0, 2.0);
    // Corner vertices sit at (±1, ±1, 0)
    assert_relative_eq!(mesh.position(0).x, -1.0);
    assert_relative_eq!(mesh.position(0).y, 1.0);
    let last = mesh.vertex_count() - 1;
    assert_relative_eq!(mesh.position(last).x, 1.0);
    assert_relative_eq!(mesh.position(last).y, -1.0);
}

#[test]
fn apply_transform_translates_vertices() {
    let mut mesh = quad_grid(1, 1, 1.0, 1.0);
    let transform = DAffine3::from_translation(DVec3::new(0.0, 2.0, 1.0));
    mesh.apply_transform(&transform);
    assert_relative_eq!(mesh.position(0).y, 2.5);
    assert_relative_eq!(mesh.position(0).z, 1.0);
}

#[test]
fn validate_rejects_out_of_range_index() {
    let mut mesh = quad_grid(1, 1, 1.0, 1.0);
    mesh.indices[0] = 99;
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_rejects_repeated_vertex() {
    let mut mesh = quad_grid(1, 1, 1.0, 1.0);
    mesh.indices[1] = mesh.indices[0];
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_rejects_zero_area_triangle() {
    // Distinct indices, coincident positions: degenerate geometry is a
    // topology error at load, not a lazy constraint-construction error
    let mut mesh = quad_grid(2, 2, 1.0, 1.0);
    let p = mesh.position(0);
    mesh.set_position(1, p);
    mesh.set_position(3, p);
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_rejects_collinear_triangle() {
    let mut mesh = TriangleMesh::with_capacity(3, 1);
    mesh.push_vertex(DVec3::ZERO);
    mesh.push_vertex(DVec3::X);
    mesh.push_vertex(DVec3::new(2.0, 0.0, 0.0));
    mesh.push_triangle(0, 1, 2);
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_rejects_inconsistent_soa() {
    let mut mesh = quad_grid(1, 1, 1.0, 1.0);
    mesh.pos_y.pop();
    assert!(mesh.validate().is_err());
}

// ─── Topology Tests ───────────────────────────────────────────

#[test]
fn topology_edge_counts_for_grid() {
    // A c×r quad grid has (c+1)·r vertical + c·(r+1) horizontal + c·r
    // diagonal edges.
    let mesh = quad_grid(2, 2, 1.0, 1.0);
    let topo = Topology::build(&mesh).unwrap();
    assert_eq!(topo.edges.len(), 3 * 2 + 2 * 3 + 4);
}

#[test]
fn topology_interior_edges_for_single_quad() {
    // Two triangles share exactly one (diagonal) edge.
    let mesh = quad_grid(1, 1, 1.0, 1.0);
    let topo = Topology::build(&mesh).unwrap();
    assert_eq!(topo.interior_edges.len(), 1);
    let ie = topo.interior_edges[0];
    // Wings are the two corners not on the diagonal
    assert_ne!(ie.wing_a, ie.wing_b);
    assert_ne!(ie.tri_a, ie.tri_b);
}

#[test]
fn topology_boundary_detection() {
    let mesh = quad_grid(2, 2, 1.0, 1.0);
    let topo = Topology::build(&mesh).unwrap();
    assert!(!topo.is_closed());
    // Outer ring: 2 edges per side × 4 sides
    assert_eq!(topo.boundary_edge_count(), 8);
}

#[test]
fn topology_rejects_non_manifold_edge() {
    // Three triangles sharing edge (0, 1)
    let mut mesh = TriangleMesh::with_capacity(5, 3);
    mesh.push_vertex(DVec3::ZERO);
    mesh.push_vertex(DVec3::X);
    mesh.push_vertex(DVec3::Y);
    mesh.push_vertex(DVec3::Z);
    mesh.push_vertex(DVec3::new(0.0, -1.0, 0.0));
    mesh.push_triangle(0, 1, 2);
    mesh.push_triangle(0, 1, 3);
    mesh.push_triangle(0, 1, 4);
    assert!(Topology::build(&mesh).is_err());
}

#[test]
fn topology_deterministic_edge_order() {
    let mesh = quad_grid(3, 3, 1.0, 1.0);
    let a = Topology::build(&mesh).unwrap();
    let b = Topology::build(&mesh).unwrap();
    assert_eq!(a.edges, b.edges);
    let wings_a: Vec<(u32, u32)> = a.interior_edges.iter().map(|e| (e.wing_a, e.wing_b)).collect();
    let wings_b: Vec<(u32, u32)> = b.interior_edges.iter().map(|e| (e.wing_a, e.wing_b)).collect();
    assert_eq!(wings_a, wings_b);
}

#[test]
fn topology_vertex_triangle_fan() {
    let mesh = quad_grid(2, 2, 1.0, 1.0);
    let topo = Topology::build(&mesh).unwrap();
    // The center vertex of a 2×2 grid touches 6 triangles
    assert_eq!(topo.vertex_triangles[4].len(), 6);
}
