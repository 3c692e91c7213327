//! CLI command implementations.

use tulle_solver::{Algorithm, Engine, EngineConfig};
use tulle_types::{TulleError, TulleResult};

use crate::export::JsonFrameExporter;
use crate::scenario::{ClothScenario, ScenarioKind};

/// Run a scenario and export the animation.
pub fn simulate(
    scenario_name: &str,
    frames: u32,
    resolution: u32,
    algorithm: Algorithm,
    output_path: &str,
) -> TulleResult<()> {
    let kind = ScenarioKind::parse(scenario_name)?;
    let config = EngineConfig {
        algorithm,
        ..EngineConfig::default()
    };

    tracing::info!(
        scenario = scenario_name,
        frames,
        resolution,
        ?algorithm,
        "starting simulation"
    );

    let mut engine = Engine::new(config, ClothScenario::new(kind, resolution))?;
    let patch = engine
        .scene_mut()
        .patch()
        .cloned()
        .ok_or_else(|| TulleError::InvalidConfig("Scenario built no cloth patch".into()))?;

    println!(
        "Simulating '{scenario_name}': {} particles, {} triangles, {frames} frames",
        patch.particles.len(),
        patch.triangles.len(),
    );

    let mut exporter = JsonFrameExporter::new(output_path, &patch);
    exporter.submit_frame(0, &patch, engine.world());

    let start = std::time::Instant::now();
    for _ in 0..frames {
        engine.proceed_frame();
        exporter.submit_frame(engine.frame_index(), &patch, engine.world());
    }
    let elapsed = start.elapsed();

    println!(
        "Done: {} frames in {:.3}s ({:.2}ms/frame)",
        frames,
        elapsed.as_secs_f64(),
        elapsed.as_secs_f64() * 1000.0 / frames.max(1) as f64,
    );
    println!(
        "Final kinetic energy: {:.6e}",
        engine.particles().kinetic_energy()
    );

    let captured = exporter.frame_count();
    exporter.finalize()?;
    println!("Wrote {captured} frames to {output_path}");
    Ok(())
}

/// Validate a mesh file.
pub fn validate(path: &str) -> TulleResult<()> {
    let content = std::fs::read_to_string(path)?;
    let mesh: tulle_mesh::TriangleMesh = serde_json::from_str(&content)
        .map_err(|e| TulleError::Serialization(format!("Failed to parse mesh: {e}")))?;

    match mesh.validate() {
        Ok(()) => {
            println!(
                "Mesh is valid ({} verts, {} tris).",
                mesh.vertex_count(),
                mesh.triangle_count()
            );
            Ok(())
        }
        Err(e) => {
            println!("Mesh validation failed: {e}");
            Err(e)
        }
    }
}
