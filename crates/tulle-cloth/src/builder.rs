//! Cloth mesh builder.
//!
//! Consumes a triangle mesh and populates a [`World`] with one particle
//! per vertex plus a deduplicated constraint set chosen by the in-plane
//! and out-of-plane strategies:
//!
//! - In-plane *EdgeDistance*: one distance constraint per undirected edge.
//! - In-plane *ContinuumTriangle*: one strain constraint per triangle.
//! - Out-of-plane *Dihedral* / *IsometricBending*: one bending constraint
//!   per interior edge, particles ordered (edge v0, edge v1, wing a,
//!   wing b) deterministically by triangle iteration order.
//!
//! Rest lengths, angles, and shape matrices are measured after the
//! configured transform has been applied.

use serde::{Deserialize, Serialize};
use tulle_math::{DAffine3, DVec3};
use tulle_mesh::generators::quad_grid;
use tulle_mesh::{Topology, TriangleMesh};
use tulle_solver::constraint::{
    BendingKernel, ConstraintKernel, DistanceKernel, IsometricBendingKernel,
    TriangleStrainKernel,
};
use tulle_solver::{Constraint, World};
use tulle_types::constants::{DEFAULT_POISSON_RATIO, DEFAULT_YOUNG_MODULUS};
use tulle_types::{Scalar, TulleError, TulleResult};

/// In-plane (stretch resistance) constraint strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InPlaneStrategy {
    /// One distance constraint per undirected mesh edge.
    EdgeDistance,
    /// One continuum-mechanics strain constraint per triangle.
    ContinuumTriangle,
}

/// Out-of-plane (bending resistance) constraint strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutOfPlaneStrategy {
    /// No bending resistance.
    None,
    /// Dihedral-angle constraint per interior edge.
    Dihedral,
    /// Isometric (cotangent-Laplacian) bending per interior edge.
    IsometricBending,
}

/// Cloth construction options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClothOptions {
    /// Grid resolution for [`ClothPatch::build_grid`]: quads per side (≥ 2).
    pub resolution: u32,
    /// Side length of the generated square patch (meters).
    pub size: Scalar,
    /// PBD stiffness for in-plane constraints, in (0, 1].
    pub in_plane_stiffness: Scalar,
    /// XPBD compliance for in-plane constraints, ≥ 0.
    pub in_plane_compliance: Scalar,
    /// PBD stiffness for out-of-plane constraints, in (0, 1].
    pub out_of_plane_stiffness: Scalar,
    /// XPBD compliance for out-of-plane constraints, ≥ 0.
    pub out_of_plane_compliance: Scalar,
    /// Rigid transform applied to the mesh before rest values are
    /// measured.
    pub transform: DAffine3,
    /// Stretch resistance strategy.
    pub in_plane_strategy: InPlaneStrategy,
    /// Bending resistance strategy.
    pub out_of_plane_strategy: OutOfPlaneStrategy,
    /// Total cloth mass, divided uniformly over the vertices.
    /// `None` means 1.0 per vertex.
    pub total_mass: Option<Scalar>,
    /// Young's modulus for the ContinuumTriangle strategy (Pa).
    pub young_modulus: Scalar,
    /// Poisson's ratio for the ContinuumTriangle strategy.
    pub poisson_ratio: Scalar,
}

impl Default for ClothOptions {
    fn default() -> Self {
        Self {
            resolution: 50,
            size: 2.0,
            in_plane_stiffness: 1.0,
            in_plane_compliance: 5.0e-2,
            out_of_plane_stiffness: 0.1,
            out_of_plane_compliance: 5.0e4,
            transform: DAffine3::IDENTITY,
            in_plane_strategy: InPlaneStrategy::EdgeDistance,
            out_of_plane_strategy: OutOfPlaneStrategy::IsometricBending,
            total_mass: None,
            young_modulus: DEFAULT_YOUNG_MODULUS,
            poisson_ratio: DEFAULT_POISSON_RATIO,
        }
    }
}

impl ClothOptions {
    /// Validates the options.
    pub fn validate(&self) -> TulleResult<()> {
        if self.resolution < 2 {
            return Err(TulleError::InvalidConfig(format!(
                "Cloth resolution must be at least 2, got {}",
                self.resolution
            )));
        }
        for (name, stiffness) in [
            ("in-plane", self.in_plane_stiffness),
            ("out-of-plane", self.out_of_plane_stiffness),
        ] {
            if !(stiffness > 0.0 && stiffness <= 1.0) {
                return Err(TulleError::InvalidConfig(format!(
                    "Cloth {name} stiffness must lie in (0, 1], got {stiffness}"
                )));
            }
        }
        for (name, compliance) in [
            ("in-plane", self.in_plane_compliance),
            ("out-of-plane", self.out_of_plane_compliance),
        ] {
            if !(compliance >= 0.0) {
                return Err(TulleError::InvalidConfig(format!(
                    "Cloth {name} compliance must be non-negative, got {compliance}"
                )));
            }
        }
        if let Some(mass) = self.total_mass {
            if !(mass > 0.0) {
                return Err(TulleError::InvalidConfig(format!(
                    "Cloth total mass must be positive, got {mass}"
                )));
            }
        }
        Ok(())
    }
}

/// A cloth instance registered in a [`World`].
///
/// Records the mapping from cloth vertices/triangles to world particle
/// indices; aerodynamics and exporters address the cloth through this.
#[derive(Debug, Clone)]
pub struct ClothPatch {
    /// World particle index per cloth vertex, in vertex order.
    pub particles: Vec<usize>,
    /// Triangles as triples of world particle indices.
    pub triangles: Vec<[usize; 3]>,
    /// Triangle indices local to the cloth mesh (for export).
    pub mesh_indices: Vec<u32>,
}

impl ClothPatch {
    /// Generates a square quad-grid patch and builds it into `world`.
    pub fn build_grid(world: &mut World, options: &ClothOptions) -> TulleResult<Self> {
        let n = options.resolution as usize;
        let mesh = quad_grid(n, n, options.size, options.size);
        Self::build_into(world, &mesh, options)
    }

    /// Builds particles and constraints for `mesh` into `world`.
    pub fn build_into(
        world: &mut World,
        mesh: &TriangleMesh,
        options: &ClothOptions,
    ) -> TulleResult<Self> {
        options.validate()?;
        mesh.validate()?;

        let mut mesh = mesh.clone();
        mesh.apply_transform(&options.transform);
        let topology = Topology::build(&mesh)?;

        let vertex_count = mesh.vertex_count();
        let vertex_mass = match options.total_mass {
            Some(total) => total / vertex_count as Scalar,
            None => 1.0,
        };

        // One particle per vertex
        let mut particles = Vec::with_capacity(vertex_count);
        for i in 0..vertex_count {
            particles.push(world.particles.add(mesh.position(i), DVec3::ZERO, vertex_mass)?);
        }

        let triangles: Vec<[usize; 3]> = (0..mesh.triangle_count())
            .map(|t| {
                let [a, b, c] = mesh.triangle(t);
                [
                    particles[a as usize],
                    particles[b as usize],
                    particles[c as usize],
                ]
            })
            .collect();

        let patch = Self {
            particles,
            triangles,
            mesh_indices: mesh.indices.clone(),
        };

        patch.add_in_plane_constraints(world, &topology, options)?;
        patch.add_out_of_plane_constraints(world, &topology, options)?;

        Ok(patch)
    }

    fn add_in_plane_constraints(
        &self,
        world: &mut World,
        topology: &Topology,
        options: &ClothOptions,
    ) -> TulleResult<()> {
        match options.in_plane_strategy {
            InPlaneStrategy::EdgeDistance => {
                for &[a, b] in &topology.edges {
                    let kernel = DistanceKernel::from_rest(
                        &world.particles,
                        self.particles[a as usize],
                        self.particles[b as usize],
                    );
                    world.add_constraint(Constraint::new(
                        ConstraintKernel::Distance(kernel),
                        options.in_plane_stiffness,
                        options.in_plane_compliance,
                    )?);
                }
            }
            InPlaneStrategy::ContinuumTriangle => {
                for tri in &self.triangles {
                    let kernel = TriangleStrainKernel::from_rest(
                        &world.particles,
                        *tri,
                        options.young_modulus,
                        options.poisson_ratio,
                    )?;
                    world.add_constraint(Constraint::new(
                        ConstraintKernel::TriangleStrain(kernel),
                        options.in_plane_stiffness,
                        options.in_plane_compliance,
                    )?);
                }
            }
        }
        Ok(())
    }

    fn add_out_of_plane_constraints(
        &self,
        world: &mut World,
        topology: &Topology,
        options: &ClothOptions,
    ) -> TulleResult<()> {
        if options.out_of_plane_strategy == OutOfPlaneStrategy::None {
            return Ok(());
        }

        for edge in &topology.interior_edges {
            let indices = [
                self.particles[edge.v0 as usize],
                self.particles[edge.v1 as usize],
                self.particles[edge.wing_a as usize],
                self.particles[edge.wing_b as usize],
            ];
            let kernel = match options.out_of_plane_strategy {
                OutOfPlaneStrategy::Dihedral => {
                    let kernel = BendingKernel::from_rest(&world.particles, indices);
                    if kernel.rest_angle.is_nan() {
                        return Err(TulleError::InvalidMesh(format!(
                            "Degenerate triangle pair at bending edge ({}, {})",
                            edge.v0, edge.v1
                        )));
                    }
                    ConstraintKernel::Bending(kernel)
                }
                OutOfPlaneStrategy::IsometricBending => ConstraintKernel::IsometricBending(
                    IsometricBendingKernel::from_rest(&world.particles, indices)?,
                ),
                OutOfPlaneStrategy::None => unreachable!(),
            };
            world.add_constraint(Constraint::new(
                kernel,
                options.out_of_plane_stiffness,
                options.out_of_plane_compliance,
            )?);
        }
        Ok(())
    }
}
