//! The time-stepping engine.
//!
//! [`Engine`] drives one frame at a time via [`proceed_frame`]
//! (`Engine::proceed_frame`); a frame is an integer number of fixed
//! physics substeps. Scene-specific behavior (scene population, external
//! forces, collision constraint generation, velocity post-processing)
//! plugs in behind the [`Scene`] trait.

use tulle_types::TulleResult;

use crate::config::EngineConfig;
use crate::particle::ParticleSet;
use crate::projection::project_constraint;
use crate::world::World;

/// Scene hooks the engine calls during every substep.
///
/// The engine calls these methods in order:
///
/// ```text
/// scene.initialize(world)?;                     // once, at construction
/// loop per substep {
///     scene.set_external_forces(world);
///     scene.generate_collision_constraints(world);
///     // ... constraint projection ...
///     scene.update_velocities(world);
/// }
/// ```
pub trait Scene {
    /// Populates particles and persistent constraints. Called once.
    fn initialize(&mut self, world: &mut World) -> TulleResult<()>;

    /// Writes each particle's accumulated force. The engine zeroes all
    /// forces first, so this hook only ever accumulates.
    fn set_external_forces(&mut self, world: &mut World);

    /// Populates transient constraints for this substep. The engine
    /// guarantees the transient list is empty when this runs and clears
    /// it again at the end of the substep.
    fn generate_collision_constraints(&mut self, world: &mut World) {
        let _ = world;
    }

    /// Velocity post-processing (damping) after position commit.
    fn update_velocities(&mut self, world: &mut World) {
        let _ = world;
    }
}

/// The abstract time-stepping core.
///
/// Owns the [`World`] and an immutable [`EngineConfig`]; advances
/// simulation time one frame per [`proceed_frame`](Self::proceed_frame)
/// call.
pub struct Engine<S: Scene> {
    config: EngineConfig,
    world: World,
    scene: S,
    substeps_per_frame: u32,
    frame: u64,
}

impl<S: Scene> Engine<S> {
    /// Validates the configuration, initializes the scene, and returns
    /// the engine.
    pub fn new(config: EngineConfig, mut scene: S) -> TulleResult<Self> {
        config.validate()?;
        let substeps_per_frame = config.substeps_per_frame();

        let mut world = World::new(config.dt_physics);
        scene.initialize(&mut world)?;

        Ok(Self {
            config,
            world,
            scene,
            substeps_per_frame,
            frame: 0,
        })
    }

    /// Advances simulation time by one frame.
    pub fn proceed_frame(&mut self) {
        for _ in 0..self.substeps_per_frame {
            self.substep();
        }
        self.frame += 1;
    }

    /// One fixed physics substep.
    fn substep(&mut self) {
        let dt = self.config.dt_physics;
        let algorithm = self.config.algorithm;

        // 1. External forces
        self.world.particles.clear_forces();
        self.scene.set_external_forces(&mut self.world);

        // 2–3. Semi-implicit velocity integration, position prediction
        self.world.particles.integrate_forces(dt);
        self.world.particles.predict(dt);

        // 4. Transient collision constraints, rebuilt from scratch
        self.world.transient_constraints.clear();
        self.scene.generate_collision_constraints(&mut self.world);

        // 5. Fresh Lagrange accumulators
        for constraint in self
            .world
            .constraints
            .iter_mut()
            .chain(self.world.transient_constraints.iter_mut())
        {
            constraint.reset_lambda();
        }

        // 6. Gauss–Seidel projection: persistent first, then transient,
        // each in registration order
        let World {
            particles,
            constraints,
            transient_constraints,
            ..
        } = &mut self.world;
        for _ in 0..self.config.constraint_iterations {
            for constraint in constraints.iter_mut() {
                project_constraint(constraint, particles, algorithm, dt);
            }
            for constraint in transient_constraints.iter_mut() {
                project_constraint(constraint, particles, algorithm, dt);
            }
        }

        // 7. Velocity recovery, position commit
        self.world.particles.finalize_step(dt);

        // 8. Velocity post-processing
        self.scene.update_velocities(&mut self.world);

        // 9. Transient constraints must not outlive the substep
        self.world.transient_constraints.clear();

        self.world.advance_time();
    }

    /// Read access to the world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Read access to the particle list.
    pub fn particles(&self) -> &ParticleSet {
        &self.world.particles
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current simulated physics time (seconds).
    pub fn current_time(&self) -> f64 {
        self.world.time()
    }

    /// Number of completed frames.
    pub fn frame_index(&self) -> u64 {
        self.frame
    }

    /// Mutable access to the scene (e.g. to toggle wind between frames).
    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }
}
