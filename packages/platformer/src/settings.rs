
use crate::movement::{
    Tuning,
    DEFAULT_GRAVITY,
    DEFAULT_JUMP_SPEED,
};
use std::{
    path::Path,
    fs::File,
    io::{
        BufReader,
        BufWriter,
    },
};
use serde::{Serialize, Deserialize};
use anyhow::*;


pub const SETTINGS_FILE_NAME: &'static str = "settings.json";


/// Game settings. Missing fields take their default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Name of the board to start on.
    pub start_board: String,
    pub gravity: f32,
    pub jump_speed: f32,
    pub fps: u32,
    /// Number of frames to run in headless mode before stopping.
    pub headless_frames: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            start_board: "climb".to_owned(),
            gravity: DEFAULT_GRAVITY,
            jump_speed: DEFAULT_JUMP_SPEED,
            fps: 60,
            headless_frames: 12,
        }
    }
}

impl Settings {
    pub fn read(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::try_read(path).unwrap_or_else(|e| {
            debug!(path = %path.display(), %e, "using default settings");
            Settings::default()
        })
    }

    pub fn try_read(path: impl AsRef<Path>) -> Result<Self> {
        Ok(serde_json::from_reader(BufReader::new(File::open(path)?))?)
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        serde_json::to_writer_pretty(BufWriter::new(File::create(path)?), self)?;
        Ok(())
    }

    /// Initial tuning, clamped into range.
    pub fn tuning(&self) -> Tuning {
        Tuning::new(self.gravity, self.jump_speed)
    }
}


#[cfg(test)]
fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("platformer-{}-{}", std::process::id(), name))
}

#[test]
fn test_settings_write_read() {
    let path = temp_path(SETTINGS_FILE_NAME);
    let settings = Settings {
        start_board: "vault".to_owned(),
        gravity: 1200.0,
        headless_frames: 30,
        ..Settings::default()
    };
    settings.write(&path).unwrap();
    assert_eq!(Settings::try_read(&path).unwrap(), settings);
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_settings_fallbacks() {
    assert_eq!(Settings::read(temp_path("does-not-exist.json")), Settings::default());

    let partial: Settings = serde_json::from_str(r#"{ "jump_speed": 5000 }"#).unwrap();
    assert_eq!(partial.fps, 60);
    assert_eq!(partial.tuning().jump_speed, crate::movement::MAX_JUMP_SPEED);

    let path = temp_path("garbage.json");
    std::fs::write(&path, "not json").unwrap();
    assert!(Settings::try_read(&path).is_err());
    assert_eq!(Settings::read(&path), Settings::default());
    std::fs::remove_file(&path).unwrap();
}
