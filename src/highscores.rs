//! High score persistence
//!
//! A single integer stored as a bare decimal string in a text file. Any I/O
//! or parse failure reads as zero and is never surfaced to the player.

use std::path::{Path, PathBuf};

use crate::consts::SNAKE_HIGHSCORE_FILE;

/// Handle to a high-score file on disk
#[derive(Debug, Clone)]
pub struct HighScoreFile {
    path: PathBuf,
}

impl Default for HighScoreFile {
    fn default() -> Self {
        Self::new(SNAKE_HIGHSCORE_FILE)
    }
}

impl HighScoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored score (0 when missing or corrupt)
    pub fn load(&self) -> u32 {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => match text.trim().parse() {
                Ok(score) => score,
                Err(_) => {
                    log::debug!("Ignoring corrupt high score in {}", self.path.display());
                    0
                }
            },
            Err(e) => {
                log::debug!("No high score at {}: {}", self.path.display(), e);
                0
            }
        }
    }

    /// Overwrite the stored score. Failures are logged and otherwise ignored.
    pub fn save(&self, score: u32) {
        match std::fs::write(&self.path, score.to_string()) {
            Ok(()) => log::info!("High score {} saved", score),
            Err(e) => log::warn!("Could not save high score to {}: {}", self.path.display(), e),
        }
    }

    /// Save `score` only if it beats `previous`. Returns true when saved.
    pub fn save_if_beaten(&self, score: u32, previous: u32) -> bool {
        if score > previous {
            self.save(score);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let file = HighScoreFile::new(dir.path().join("hs.txt"));
        file.save(1230);
        assert_eq!(file.load(), 1230);
        assert_eq!(std::fs::read_to_string(file.path()).unwrap(), "1230");
    }

    #[test]
    fn test_missing_file_is_zero() {
        let dir = tempfile::tempdir().unwrap();
        let file = HighScoreFile::new(dir.path().join("missing.txt"));
        assert_eq!(file.load(), 0);
    }

    #[test]
    fn test_corrupt_file_is_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hs.txt");
        std::fs::write(&path, "lots").unwrap();
        assert_eq!(HighScoreFile::new(path).load(), 0);
    }

    #[test]
    fn test_surrounding_whitespace_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hs.txt");
        std::fs::write(&path, " 77\n").unwrap();
        assert_eq!(HighScoreFile::new(path).load(), 77);
    }

    #[test]
    fn test_save_if_beaten_overwrites_only_higher() {
        let dir = tempfile::tempdir().unwrap();
        let file = HighScoreFile::new(dir.path().join("hs.txt"));
        file.save(100);
        assert!(!file.save_if_beaten(90, 100));
        assert_eq!(file.load(), 100);
        assert!(file.save_if_beaten(150, 100));
        assert_eq!(file.load(), 150);
    }

    #[test]
    fn test_unwritable_path_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be written as a file
        let file = HighScoreFile::new(dir.path());
        file.save(5);
        assert_eq!(file.load(), 0);
    }
}
