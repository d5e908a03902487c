use super::error::SaveError;
use super::types::SaveDocument;
use crate::core::constants::SAVE_FILE_NAME;
use directories::ProjectDirs;
use log::info;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Reads and writes the single JSON save file.
pub struct SaveManager {
    save_path: PathBuf,
}

impl SaveManager {
    /// Creates a SaveManager pointing at the platform config directory,
    /// resolved with the `directories` crate.
    pub fn new() -> io::Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "enemy-clicker").ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine config directory",
            )
        })?;

        let config_dir = project_dirs.config_dir();
        fs::create_dir_all(config_dir)?;

        Ok(Self {
            save_path: config_dir.join(SAVE_FILE_NAME),
        })
    }

    /// Uses an explicit save file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            save_path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.save_path
    }

    /// Whether a saved game is available to continue.
    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }

    /// Writes the document, replacing any previous save.
    ///
    /// The JSON goes to a sibling temp file first and is then renamed over
    /// the save, so a crash mid-write leaves the old save intact.
    pub fn save(&self, document: &SaveDocument) -> Result<(), SaveError> {
        let json = document.to_json()?;

        if let Some(parent) = self.save_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.save_path.with_extension("json.tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.save_path)?;

        info!("game saved to {}", self.save_path.display());
        Ok(())
    }

    /// Reads and parses the document.
    ///
    /// Returns `MissingSaveFile` when there is no save, `CorruptSaveData`
    /// when the JSON is malformed or has unknown/missing keys.
    pub fn load(&self) -> Result<SaveDocument, SaveError> {
        let json = fs::read_to_string(&self.save_path)?;
        let document = SaveDocument::from_json(&json)?;
        info!("game loaded from {}", self.save_path.display());
        Ok(document)
    }

    pub fn delete(&self) -> Result<(), SaveError> {
        fs::remove_file(&self.save_path)?;
        Ok(())
    }
}
