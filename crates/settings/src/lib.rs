use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::BufReader,
    path::PathBuf,
};
use thiserror::Error;

const QUALIFIER: &str = "com";
const ORGANIZATION: &str = "cubeview";
const APPLICATION: &str = "cubeview";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("unable to resolve platform config directory")]
    MissingProjectDirs,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub camera: CameraSettings,
    pub overlay: OverlaySettings,
    pub pointer: PointerSettings,
}

impl UserSettings {
    /// Reject values the viewer cannot work with (zero distances, empty widgets, ...).
    pub fn validate(&self) -> Result<(), SettingsError> {
        let camera = &self.camera;
        positive("camera.fov_degrees", camera.fov_degrees)?;
        positive("camera.near", camera.near)?;
        positive("camera.min_distance", camera.min_distance)?;
        positive("camera.rotate_speed", camera.rotate_speed)?;
        positive("camera.max_distance", camera.max_distance)?;
        positive("camera.zoom_sensitivity", camera.zoom_sensitivity)?;
        let [x, y, z] = camera.initial_position;
        if !(x.is_finite() && y.is_finite() && z.is_finite()) {
            return Err(SettingsError::Invalid {
                field: "camera.initial_position",
                reason: "must be finite",
            });
        }
        if x * x + y * y + z * z == 0.0 {
            return Err(SettingsError::Invalid {
                field: "camera.initial_position",
                reason: "must not be the orbit target (origin)",
            });
        }
        if camera.far <= camera.near {
            return Err(SettingsError::Invalid {
                field: "camera.far",
                reason: "must be greater than camera.near",
            });
        }
        if camera.max_distance < camera.min_distance {
            return Err(SettingsError::Invalid {
                field: "camera.max_distance",
                reason: "must not be smaller than camera.min_distance",
            });
        }

        let overlay = &self.overlay;
        positive("overlay.camera_distance", overlay.camera_distance)?;
        positive("overlay.fov_degrees", overlay.fov_degrees)?;
        positive("overlay.rotate_speed", overlay.rotate_speed)?;
        positive("overlay.widget_size", overlay.widget_size)?;
        positive("overlay.cube_size", overlay.cube_size)?;
        if overlay.margin < 0.0 {
            return Err(SettingsError::Invalid {
                field: "overlay.margin",
                reason: "must not be negative",
            });
        }

        positive(
            "pointer.click_drag_threshold_px",
            self.pointer.click_drag_threshold_px,
        )
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), SettingsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::Invalid {
            field,
            reason: "must be a positive number",
        })
    }
}

/// Main scene camera and its orbit controls
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub fov_degrees: f64,
    pub near: f64,
    pub far: f64,
    /// Starting eye position; the camera always looks at the world origin
    pub initial_position: [f64; 3],
    pub rotate_speed: f64,
    pub zoom_sensitivity: f64,
    pub invert_zoom: bool,
    pub min_distance: f64,
    pub max_distance: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov_degrees: 50.0,
            near: 0.1,
            far: 1000.0,
            initial_position: [2.0, 2.0, 6.0],
            rotate_speed: 1.0,
            zoom_sensitivity: 0.15,
            invert_zoom: false,
            min_distance: 0.2,
            max_distance: 500.0,
        }
    }
}

/// Orientation cube widget drawn in a corner of the main viewport
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlaySettings {
    /// Fixed distance from the overlay camera to the cube center
    pub camera_distance: f64,
    pub fov_degrees: f64,
    pub rotate_speed: f64,
    /// Edge length of the square overlay viewport in pixels
    pub widget_size: f64,
    /// Gap between the overlay viewport and the window corner in pixels
    pub margin: f64,
    /// Edge length of the cube in world units
    pub cube_size: f64,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            camera_distance: 3.2,
            fov_degrees: 50.0,
            rotate_speed: 0.15,
            widget_size: 150.0,
            margin: 10.0,
            cube_size: 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerSettings {
    /// Pointer travel (pixels) below which a press/release pair counts as a click
    pub click_drag_threshold_px: f64,
}

impl Default for PointerSettings {
    fn default() -> Self {
        Self {
            click_drag_threshold_px: 10.0,
        }
    }
}

pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new() -> Result<Self, SettingsError> {
        let dirs = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .ok_or(SettingsError::MissingProjectDirs)?;
        let config_dir = dirs.config_dir();
        fs::create_dir_all(config_dir)?;
        let path = config_dir.join(SETTINGS_FILE);
        Ok(Self { path })
    }

    /// Use an explicit settings file instead of the platform config directory.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Result<UserSettings, SettingsError> {
        if !self.path.exists() {
            return Ok(UserSettings::default());
        }
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let settings: UserSettings = serde_json::from_reader(reader)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save(&self, settings: &UserSettings) -> Result<(), SettingsError> {
        settings.validate()?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(&self.path)?;
        serde_json::to_writer_pretty(file, settings)?;
        Ok(())
    }

}
