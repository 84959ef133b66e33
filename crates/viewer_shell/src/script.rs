use anyhow::{Context, Result};
use glam::DVec3;
use serde::Deserialize;
use std::{fs::File, io::BufReader, path::Path};
use view_sync::{Aabb, ObjectId, PickTarget, ViewerEvent};

/// Recorded viewer input: window size, pickable scene boxes and the events to replay.
#[derive(Debug, Deserialize)]
pub struct Script {
    #[serde(default = "default_window")]
    pub window: [f64; 2],
    #[serde(default)]
    pub objects: Vec<SceneObject>,
    pub events: Vec<ViewerEvent>,
}

#[derive(Debug, Deserialize)]
pub struct SceneObject {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

fn default_window() -> [f64; 2] {
    [1280.0, 720.0]
}

impl Script {
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open script {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("invalid script {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("invalid script")
    }

    pub fn window(&self) -> (f64, f64) {
        (self.window[0], self.window[1])
    }

    /// Scene boxes become pick targets; ids start at 1 in file order.
    pub fn scene(&self) -> Vec<PickTarget> {
        self.objects
            .iter()
            .zip(1u32..)
            .map(|(object, id)| {
                PickTarget::new(
                    ObjectId(id),
                    Aabb::new(DVec3::from_array(object.min), DVec3::from_array(object.max)),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_script() {
        let script = Script::parse(r#"{ "events": [] }"#).unwrap();
        assert_eq!(script.window(), (1280.0, 720.0));
        assert!(script.scene().is_empty());
    }

    #[test]
    fn objects_get_sequential_ids() {
        let script = Script::parse(
            r#"{
                "window": [800, 600],
                "objects": [
                    { "min": [-0.5, -0.5, -0.5], "max": [0.5, 0.5, 0.5] },
                    { "min": [2, 0, 0], "max": [1, 1, 1] }
                ],
                "events": [ { "kind": "pointer_move", "x": 10, "y": 20 } ]
            }"#,
        )
        .unwrap();

        let scene = script.scene();
        assert_eq!(scene.len(), 2);
        assert_eq!(scene[0].id, ObjectId(1));
        assert_eq!(scene[1].id, ObjectId(2));
        assert_eq!(scene[1].bounds.min, DVec3::new(1.0, 0.0, 0.0));
        assert_eq!(script.events.len(), 1);
    }

    #[test]
    fn unknown_event_kind_is_rejected() {
        assert!(Script::parse(r#"{ "events": [ { "kind": "teleport" } ] }"#).is_err());
    }
}
