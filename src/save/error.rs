use std::fmt;
use std::io;

/// Why a save could not be written or read back.
#[derive(Debug)]
pub enum SaveError {
    /// No save file exists; there is simply nothing to continue.
    MissingSaveFile,
    /// The document exists but is malformed or fails validation.
    CorruptSaveData(String),
    Io(io::Error),
}

impl SaveError {
    pub fn corrupt(message: impl Into<String>) -> Self {
        SaveError::CorruptSaveData(message.into())
    }
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::MissingSaveFile => write!(f, "no saved game found"),
            SaveError::CorruptSaveData(reason) => write!(f, "corrupt save data: {}", reason),
            SaveError::Io(e) => write!(f, "save file I/O error: {}", e),
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for SaveError {
    fn from(e: io::Error) -> Self {
        if e.kind() == io::ErrorKind::NotFound {
            SaveError::MissingSaveFile
        } else {
            SaveError::Io(e)
        }
    }
}

impl From<serde_json::Error> for SaveError {
    fn from(e: serde_json::Error) -> Self {
        SaveError::CorruptSaveData(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_missing() {
        let err: SaveError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, SaveError::MissingSaveFile));

        let err: SaveError = io::Error::new(io::ErrorKind::PermissionDenied, "nope").into();
        assert!(matches!(err, SaveError::Io(_)));
    }

    #[test]
    fn test_json_error_maps_to_corrupt() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: SaveError = json_err.into();
        assert!(matches!(err, SaveError::CorruptSaveData(_)));
        assert!(err.to_string().starts_with("corrupt save data"));
    }
}
