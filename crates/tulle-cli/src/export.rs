//! JSON frame exporter — writes per-frame positions for visual
//! inspection.
//!
//! Captures vertex positions each frame and serializes the whole
//! animation to one JSON file on `finalize()`.

use serde::Serialize;
use tulle_cloth::ClothPatch;
use tulle_solver::World;
use tulle_types::{TulleError, TulleResult};

/// A single frame of captured positions.
#[derive(Serialize)]
struct FrameData {
    frame: u64,
    /// Interleaved [x0, y0, z0, x1, y1, z1, ...]
    positions: Vec<f32>,
}

/// Complete animation data for JSON export.
#[derive(Serialize)]
struct AnimationData {
    vertex_count: usize,
    triangle_count: usize,
    indices: Vec<u32>,
    frames: Vec<FrameData>,
}

/// Accumulates frames and writes them as one JSON document.
pub struct JsonFrameExporter {
    output_path: String,
    vertex_count: usize,
    indices: Vec<u32>,
    frames: Vec<FrameData>,
}

impl JsonFrameExporter {
    pub fn new(output_path: &str, patch: &ClothPatch) -> Self {
        Self {
            output_path: output_path.to_string(),
            vertex_count: patch.particles.len(),
            indices: patch.mesh_indices.clone(),
            frames: Vec::new(),
        }
    }

    /// Captures the patch's current authoritative positions.
    pub fn submit_frame(&mut self, frame: u64, patch: &ClothPatch, world: &World) {
        let mut positions = Vec::with_capacity(patch.particles.len() * 3);
        for &i in &patch.particles {
            let x = world.particles.position(i);
            positions.push(x.x as f32);
            positions.push(x.y as f32);
            positions.push(x.z as f32);
        }
        self.frames.push(FrameData { frame, positions });
    }

    /// Writes the accumulated animation to disk.
    pub fn finalize(&mut self) -> TulleResult<()> {
        let data = AnimationData {
            vertex_count: self.vertex_count,
            triangle_count: self.indices.len() / 3,
            indices: self.indices.clone(),
            frames: std::mem::take(&mut self.frames),
        };
        let json = serde_json::to_string(&data)
            .map_err(|e| TulleError::Serialization(format!("JSON serialization failed: {e}")))?;
        std::fs::write(&self.output_path, json)?;
        Ok(())
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}
