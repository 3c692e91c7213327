//! Procedural cloth scenarios.
//!
//! Each scenario is a [`Scene`] implementation: a square cloth patch
//! pinned at its top corners, under gravity and aerodynamic drag, with
//! scenario-specific colliders regenerated as transient constraints
//! every substep.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tulle_cloth::{apply_aerodynamic_forces, AeroParams, ClothOptions, ClothPatch};
use tulle_math::{DAffine3, DVec3};
use tulle_solver::constraint::{CollisionKernel, ConstraintKernel, FixedPointKernel};
use tulle_solver::{Constraint, Scene, World};
use tulle_types::constants::GRAVITY;
use tulle_types::{Scalar, TulleError, TulleResult};

/// Radius around the cloth's top corners within which particles are
/// pinned.
const PIN_RADIUS: Scalar = 0.1;

/// Per-second velocity decay factor.
const VELOCITY_DECAY: Scalar = 0.95;

/// Magnitude of the random initial velocity perturbation, which breaks
/// the perfect symmetry of the flat rest state.
const INITIAL_JITTER: Scalar = 1.0e-3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioKind {
    /// Cloth pinned at two corners, swinging freely.
    Hanging,
    /// Cloth dropping onto a sphere that then slides away.
    SphereDrape,
}

impl ScenarioKind {
    pub fn parse(name: &str) -> TulleResult<Self> {
        match name {
            "hanging" => Ok(Self::Hanging),
            "sphere_drape" => Ok(Self::SphereDrape),
            other => Err(TulleError::InvalidConfig(format!(
                "Unknown scenario '{other}'. Available: hanging, sphere_drape"
            ))),
        }
    }
}

/// A sphere collider that starts under the cloth and slides along +Z
/// after a delay.
struct MovingSphere {
    radius: Scalar,
    /// Extra clearance added when generating contact planes.
    tolerance: Scalar,
}

impl MovingSphere {
    fn center(&self, time: Scalar) -> DVec3 {
        DVec3::new(0.0, 1.0, (time - 1.8).max(0.0))
    }
}

pub struct ClothScenario {
    options: ClothOptions,
    sphere: Option<MovingSphere>,
    aero: AeroParams,
    patch: Option<ClothPatch>,
}

impl ClothScenario {
    pub fn new(kind: ScenarioKind, resolution: u32) -> Self {
        let options = ClothOptions {
            resolution,
            transform: DAffine3::from_translation(DVec3::new(0.0, 2.0, 0.0)),
            ..ClothOptions::default()
        };
        let sphere = match kind {
            ScenarioKind::Hanging => None,
            ScenarioKind::SphereDrape => Some(MovingSphere {
                radius: 0.52,
                tolerance: 0.05,
            }),
        };
        Self {
            options,
            sphere,
            aero: AeroParams::default(),
            patch: None,
        }
    }

    /// The patch built during [`Scene::initialize`].
    pub fn patch(&self) -> Option<&ClothPatch> {
        self.patch.as_ref()
    }
}

impl Scene for ClothScenario {
    fn initialize(&mut self, world: &mut World) -> TulleResult<()> {
        let patch = ClothPatch::build_grid(world, &self.options)?;

        // Anchor particles near the transformed top corners with stiff
        // fixed-point constraints
        let half = self.options.size / 2.0;
        let corners = [
            self.options
                .transform
                .transform_point3(DVec3::new(-half, half, 0.0)),
            self.options
                .transform
                .transform_point3(DVec3::new(half, half, 0.0)),
        ];
        for &i in &patch.particles {
            let x = world.particles.position(i);
            if corners.iter().any(|&c| (x - c).length() < PIN_RADIUS) {
                let kernel = ConstraintKernel::FixedPoint(FixedPointKernel::new(i, x));
                world.add_constraint(Constraint::new(kernel, 1.0, 0.0)?);
            }
        }

        // Symmetry-breaking jitter, fixed seed for reproducible runs
        let mut rng = StdRng::seed_from_u64(0x70771e);
        for &i in &patch.particles {
            let jitter = DVec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            ) * INITIAL_JITTER;
            world.particles.set_velocity(i, jitter);
        }

        self.patch = Some(patch);
        Ok(())
    }

    fn set_external_forces(&mut self, world: &mut World) {
        let gravity = DVec3::new(0.0, -GRAVITY, 0.0);
        for i in 0..world.particles.len() {
            if world.particles.get(i).is_pinned() {
                continue;
            }
            let f = world.particles.get(i).mass() * gravity;
            world.particles.add_force(i, f);
        }
        if let Some(patch) = &self.patch {
            apply_aerodynamic_forces(patch, world, &self.aero);
        }
    }

    fn generate_collision_constraints(&mut self, world: &mut World) {
        let Some(sphere) = &self.sphere else {
            return;
        };
        let center = sphere.center(world.time());
        let cutoff = sphere.radius + sphere.tolerance;

        for i in 0..world.particles.len() {
            let x = world.particles.position(i);
            let diff = x - center;
            let dist = diff.length();
            if dist >= cutoff || dist <= 0.0 {
                continue;
            }
            // Tangent plane of the sphere toward the particle
            let normal = diff / dist;
            let offset = normal.dot(center) + sphere.radius;
            let kernel =
                ConstraintKernel::EnvironmentalCollision(CollisionKernel::new(i, normal, offset));
            match Constraint::new(kernel, 1.0, 0.0) {
                Ok(constraint) => world.add_transient_constraint(constraint),
                Err(e) => tracing::warn!("skipping collision constraint: {e}"),
            }
        }
    }

    fn update_velocities(&mut self, world: &mut World) {
        let factor = (VELOCITY_DECAY.ln() * world.dt()).exp();
        world.particles.damp_velocities(factor);
    }
}
