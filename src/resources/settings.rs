//! Scheduler settings resource.
//!
//! Loaded from an INI file. Missing keys keep their defaults, so an empty or
//! partial file is valid.
//!
//! # Configuration File Format
//!
//! ```ini
//! [animation]
//! delay_ms = 100
//! boundary = lookahead
//! time_scale = 1.0
//!
//! [demo]
//! duration_ms = 5000
//! target_fps = 60
//! library = assets/animations/witch.json
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::num::NonZeroU64;
use std::path::PathBuf;

use crate::animation::scheduler::BoundaryMode;
use crate::animation::timer::TickDelay;
use crate::error::SettingsError;

const DEFAULT_DELAY: TickDelay = match NonZeroU64::new(100) {
    Some(ms) => TickDelay::new(ms),
    None => panic!("default delay must be positive"),
};
const DEFAULT_TIME_SCALE: f32 = 1.0;
const DEFAULT_DURATION_MS: u64 = 5000;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_LIBRARY_PATH: &str = "./assets/animations/witch.json";
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

#[derive(Resource, Debug, Clone)]
pub struct SchedulerSettings {
    /// Delay used when a play request does not name one.
    pub delay: TickDelay,
    /// Boundary mode for newly created animators.
    pub boundary: BoundaryMode,
    pub time_scale: f32,
    /// How long the demo runs, in simulated milliseconds.
    pub duration_ms: u64,
    pub target_fps: u32,
    pub library_path: PathBuf,
    pub config_path: PathBuf,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl SchedulerSettings {
    pub fn new() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            boundary: BoundaryMode::default(),
            time_scale: DEFAULT_TIME_SCALE,
            duration_ms: DEFAULT_DURATION_MS,
            target_fps: DEFAULT_TARGET_FPS,
            library_path: PathBuf::from(DEFAULT_LIBRARY_PATH),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load settings from `config_path`.
    pub fn load_from_file(&mut self) -> Result<(), SettingsError> {
        let mut config = Ini::new();
        config.load(&self.config_path).map_err(SettingsError::Load)?;
        self.apply(&config)?;
        info!(
            "Loaded settings: delay={}ms, boundary={:?}, time_scale={}, duration={}ms, fps={}",
            self.delay.as_millis(),
            self.boundary,
            self.time_scale,
            self.duration_ms,
            self.target_fps
        );
        Ok(())
    }

    /// Load settings from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), SettingsError> {
        let mut config = Ini::new();
        config.read(text.to_string()).map_err(SettingsError::Load)?;
        self.apply(&config)
    }

    fn apply(&mut self, config: &Ini) -> Result<(), SettingsError> {
        // [animation] section
        if let Some(raw) = config.get("animation", "delay_ms") {
            self.delay = raw
                .trim()
                .parse::<u64>()
                .ok()
                .and_then(|ms| TickDelay::from_millis(ms).ok())
                .ok_or(SettingsError::Invalid {
                    section: "animation",
                    key: "delay_ms",
                    value: raw.clone(),
                })?;
        }
        if let Some(raw) = config.get("animation", "boundary") {
            self.boundary = parse_boundary(&raw).ok_or(SettingsError::Invalid {
                section: "animation",
                key: "boundary",
                value: raw.clone(),
            })?;
        }
        if let Some(raw) = config.get("animation", "time_scale") {
            self.time_scale = raw
                .trim()
                .parse::<f32>()
                .ok()
                .filter(|scale| scale.is_finite() && *scale >= 0.0)
                .ok_or(SettingsError::Invalid {
                    section: "animation",
                    key: "time_scale",
                    value: raw.clone(),
                })?;
        }

        // [demo] section
        if let Some(raw) = config.get("demo", "duration_ms") {
            self.duration_ms = raw.trim().parse().map_err(|_| SettingsError::Invalid {
                section: "demo",
                key: "duration_ms",
                value: raw.clone(),
            })?;
        }
        if let Some(raw) = config.get("demo", "target_fps") {
            self.target_fps = raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|fps| *fps > 0)
                .ok_or(SettingsError::Invalid {
                    section: "demo",
                    key: "target_fps",
                    value: raw.clone(),
                })?;
        }
        if let Some(raw) = config.get("demo", "library") {
            self.library_path = PathBuf::from(raw.trim());
        }
        Ok(())
    }

    /// Save settings to `config_path`, creating the file if needed.
    pub fn save_to_file(&self) -> Result<(), SettingsError> {
        let mut config = Ini::new();

        // [animation] section
        config.set("animation", "delay_ms", Some(self.delay.as_millis().to_string()));
        config.set("animation", "boundary", Some(boundary_name(self.boundary).to_string()));
        config.set("animation", "time_scale", Some(self.time_scale.to_string()));

        // [demo] section
        config.set("demo", "duration_ms", Some(self.duration_ms.to_string()));
        config.set("demo", "target_fps", Some(self.target_fps.to_string()));
        config.set("demo", "library", Some(self.library_path.display().to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| SettingsError::Save(e.to_string()))?;

        info!("Saved settings to {:?}", self.config_path);
        Ok(())
    }

    /// Milliseconds between demo frames.
    pub fn frame_interval_ms(&self) -> u64 {
        (1000 / u64::from(self.target_fps.max(1))).max(1)
    }
}

fn parse_boundary(raw: &str) -> Option<BoundaryMode> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "lookahead" => Some(BoundaryMode::Lookahead),
        "last_frame" | "lastframe" => Some(BoundaryMode::LastFrame),
        _ => None,
    }
}

fn boundary_name(boundary: BoundaryMode) -> &'static str {
    match boundary {
        BoundaryMode::Lookahead => "lookahead",
        BoundaryMode::LastFrame => "last_frame",
    }
}
