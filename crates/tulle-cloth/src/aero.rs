//! Aerodynamic drag and lift over triangle elements.
//!
//! Per triangle, with v_rel the triangle's mean velocity relative to the
//! wind, n̂ the unit face normal, and A the current (deformed) area:
//!
//!   F = −½ ρ ‖v_rel‖ (C_d (v_rel·n̂) n̂ + C_l v_tan) · A
//!
//! where v_tan = v_rel − (v_rel·n̂) n̂. Both terms are invariant to the
//! sign of n̂, so triangle winding does not matter. The force is split
//! equally over the triangle's three vertices.

use tulle_math::DVec3;
use tulle_solver::World;
use tulle_types::constants::{
    AIR_DENSITY, DEFAULT_DRAG_COEFFICIENT, DEFAULT_LIFT_COEFFICIENT, NORMAL_EPSILON,
    PROJECTION_EPSILON,
};
use tulle_types::Scalar;

use crate::builder::ClothPatch;

/// Aerodynamic medium parameters.
#[derive(Debug, Clone, Copy)]
pub struct AeroParams {
    /// Air density ρ (kg/m³).
    pub density: Scalar,
    /// Drag coefficient C_d.
    pub drag_coefficient: Scalar,
    /// Lift coefficient C_l.
    pub lift_coefficient: Scalar,
    /// Ambient wind velocity (m/s).
    pub wind: DVec3,
}

impl Default for AeroParams {
    fn default() -> Self {
        Self {
            density: AIR_DENSITY,
            drag_coefficient: DEFAULT_DRAG_COEFFICIENT,
            lift_coefficient: DEFAULT_LIFT_COEFFICIENT,
            wind: DVec3::ZERO,
        }
    }
}

/// Accumulates drag and lift forces on the patch's particles.
///
/// Reads authoritative positions and velocities; call from a scene's
/// external-force hook. Degenerate triangles and near-zero relative
/// velocities contribute nothing.
pub fn apply_aerodynamic_forces(patch: &ClothPatch, world: &mut World, params: &AeroParams) {
    for &[i0, i1, i2] in &patch.triangles {
        let x0 = world.particles.position(i0);
        let u = world.particles.position(i1) - x0;
        let v = world.particles.position(i2) - x0;

        let normal = u.cross(v);
        let normal_len = normal.length();
        if normal_len * normal_len < NORMAL_EPSILON {
            continue;
        }
        let n_hat = normal / normal_len;
        let area = 0.5 * normal_len;

        let v_mean = (world.particles.velocity(i0)
            + world.particles.velocity(i1)
            + world.particles.velocity(i2))
            / 3.0;
        let v_rel = v_mean - params.wind;
        let speed = v_rel.length();
        if speed < PROJECTION_EPSILON {
            continue;
        }

        let v_normal = v_rel.dot(n_hat);
        let v_tan = v_rel - v_normal * n_hat;

        let force = -0.5
            * params.density
            * speed
            * area
            * (params.drag_coefficient * v_normal * n_hat + params.lift_coefficient * v_tan);

        let share = force / 3.0;
        world.particles.add_force(i0, share);
        world.particles.add_force(i1, share);
        world.particles.add_force(i2, share);
    }
}
