//! File-backed simulator state provider

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use super::{GameFlags, GameStateProvider};

/// Provider that re-reads a JSON flags file on every probe
///
/// The file is the binary's stand-in for the simulator's ambient state
/// object: an external process keeps it updated with
/// `{"ground_contact": bool, "simulator_paused": bool}`. A missing or
/// malformed file means the capability is unavailable, never an error.
#[derive(Debug, Clone)]
pub struct FileGameState {
    path: PathBuf,
}

impl FileGameState {
    /// Create a provider backed by the given flags file
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl GameStateProvider for FileGameState {
    fn probe(&self) -> Option<GameFlags> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(_) => return None,
        };

        match serde_json::from_str(&text) {
            Ok(flags) => Some(flags),
            Err(e) => {
                debug!("Ignoring malformed flags file {}: {}", self.path.display(), e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FileGameState::new(dir.path().join("absent.json"));
        assert!(provider.probe().is_none());
    }

    #[test]
    fn malformed_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flags.json");
        let mut file = fs::File::create(&path).unwrap();
        write!(file, "not json").unwrap();

        let provider = FileGameState::new(path);
        assert!(provider.probe().is_none());
    }

    #[test]
    fn reads_current_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flags.json");
        fs::write(&path, r#"{"ground_contact": true, "simulator_paused": false}"#).unwrap();

        let provider = FileGameState::new(path.clone());
        let flags = provider.probe().unwrap();
        assert!(flags.ground_contact);
        assert!(!flags.simulator_paused);

        // omitted fields default to false
        fs::write(&path, "{}").unwrap();
        let flags = provider.probe().unwrap();
        assert!(!flags.ground_contact);
        assert!(!flags.simulator_paused);
    }
}
