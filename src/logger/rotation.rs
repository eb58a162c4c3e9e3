//! Size-based rotation for the log file
//!
//! Rotated files are numbered: `app.log.1` is the most recent, up to
//! `app.log.{max_files}`. Each rotation shifts the existing files one slot
//! up and drops whatever falls off the end. With compression on, rotated
//! files carry a `.gz` suffix.

use std::fs;
use std::path::{Path, PathBuf};

use crate::logger::compression::{gzip_file, gzip_path};
use crate::logger::config::RotationConfig;
use crate::logger::error::LoggerError;

/// Decides when to rotate and performs the rotation
pub struct RotationManager {
    config: RotationConfig,
}

impl RotationManager {
    pub fn new(config: RotationConfig) -> Self {
        Self { config }
    }

    /// Rotation is due once the active file reaches `max_size`
    pub fn should_rotate(&self, current_size: u64) -> bool {
        current_size >= self.config.max_size
    }

    /// Path of the rotated file in slot `index` (1-based)
    pub fn rotated_path(&self, base: &Path, index: usize) -> PathBuf {
        let mut name = base.file_name().unwrap_or_default().to_os_string();
        name.push(format!(".{index}"));
        let path = base.with_file_name(name);
        if self.config.compress {
            gzip_path(&path)
        } else {
            path
        }
    }

    /// Moves the active file into slot 1 after shifting older files.
    ///
    /// The active file is gone afterwards; the writer reopens it.
    pub fn rotate(&self, base: &Path) -> Result<(), LoggerError> {
        let max = self.config.max_files;

        let oldest = self.rotated_path(base, max);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }

        for index in (1..max).rev() {
            let from = self.rotated_path(base, index);
            if from.exists() {
                fs::rename(&from, self.rotated_path(base, index + 1))?;
            }
        }

        if !base.exists() {
            return Ok(());
        }

        let mut name = base.file_name().unwrap_or_default().to_os_string();
        name.push(".1");
        let first = base.with_file_name(name);
        fs::rename(base, &first).map_err(|e| {
            LoggerError::rotation(format!("Failed to rotate {}: {}", base.display(), e))
        })?;

        if self.config.compress {
            gzip_file(&first)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::tempdir;

    fn manager(max_files: usize, compress: bool) -> RotationManager {
        RotationManager::new(RotationConfig {
            max_size: 1024,
            max_files,
            compress,
        })
    }

    #[test]
    fn test_should_rotate_by_size() {
        let manager = manager(5, false);
        assert!(!manager.should_rotate(0));
        assert!(!manager.should_rotate(1023));
        assert!(manager.should_rotate(1024));
        assert!(manager.should_rotate(4096));
    }

    #[test]
    fn test_rotate_shifts_numbered_files() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("app.log");
        let manager = manager(3, false);

        for round in 1..=4 {
            fs::write(&base, format!("round {round}")).unwrap();
            manager.rotate(&base).unwrap();
        }

        assert!(!base.exists());
        assert_eq!(fs::read_to_string(dir.path().join("app.log.1")).unwrap(), "round 4");
        assert_eq!(fs::read_to_string(dir.path().join("app.log.2")).unwrap(), "round 3");
        assert_eq!(fs::read_to_string(dir.path().join("app.log.3")).unwrap(), "round 2");
        assert!(!dir.path().join("app.log.4").exists());
    }

    #[test]
    fn test_rotate_with_compression() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("app.log");
        let manager = manager(2, true);

        fs::write(&base, "first").unwrap();
        manager.rotate(&base).unwrap();
        fs::write(&base, "second").unwrap();
        manager.rotate(&base).unwrap();

        assert!(dir.path().join("app.log.1.gz").exists());
        assert!(dir.path().join("app.log.2.gz").exists());
        assert!(!dir.path().join("app.log.1").exists());
    }

    #[test]
    fn test_rotate_without_active_file() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("app.log");
        assert!(manager(2, false).rotate(&base).is_ok());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn rotated_file_count_never_exceeds_max(max_files in 1usize..6, rounds in 1usize..10) {
            let dir = tempdir().unwrap();
            let base = dir.path().join("app.log");
            let manager = manager(max_files, false);

            for round in 0..rounds {
                fs::write(&base, round.to_string()).unwrap();
                manager.rotate(&base).unwrap();
            }

            let rotated = fs::read_dir(dir.path())
                .unwrap()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_name().to_string_lossy().starts_with("app.log."))
                .count();
            prop_assert_eq!(rotated, rounds.min(max_files));
        }
    }
}
