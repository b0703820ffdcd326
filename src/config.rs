use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Flow-space offset from a node's top-left corner to its anchor point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorOffset {
    pub x: f32,
    pub y: f32,
}

impl Default for AnchorOffset {
    fn default() -> Self {
        // Center of the default 150x60 node body
        Self { x: 75.0, y: 30.0 }
    }
}

/// Tuning knobs for the knife and interjection gestures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Segments per wire when snapshotting paths for a knife gesture
    pub edge_samples: usize,
    /// Segments per wire when measuring pointer distance
    pub hit_samples: usize,
    /// Maximum flow-space distance between a dragged node's anchor and a wire
    pub interject_distance: f32,
    /// Minimum horizontal control point offset of a wire's bezier
    pub bezier_min_offset: f32,
    /// Where a dragged node's anchor sits relative to its top-left corner
    pub node_anchor_offset: AnchorOffset,
    /// Interval used when frames are driven by a timer
    pub frame_interval_ms: u64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            edge_samples: 24,
            hit_samples: 20,
            interject_distance: 40.0,
            bezier_min_offset: 50.0,
            node_anchor_offset: AnchorOffset::default(),
            frame_interval_ms: 16,
        }
    }
}

impl InteractionConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

/// Load the interaction config from a JSON file, or defaults when no path is given.
///
/// Missing fields keep their default values.
pub fn load_config(path: Option<&Path>) -> Result<InteractionConfig, Error> {
    let Some(path) = path else {
        return Ok(InteractionConfig::default());
    };

    let contents = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.display().to_string(),
        source,
    })?;
    let config: InteractionConfig = serde_json::from_str(&contents)?;
    log::debug!("loaded interaction config from {}", path.display());
    Ok(config)
}
