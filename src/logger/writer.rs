//! Rotating file writer plugged into `tracing-subscriber`

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing_subscriber::fmt::MakeWriter;

use crate::logger::config::FileConfig;
use crate::logger::error::LoggerError;
use crate::logger::rotation::RotationManager;

/// File writer with size-based rotation.
///
/// When the file cannot be written, the writer switches to stderr for the
/// rest of the process so log lines are never silently lost.
#[derive(Clone)]
pub struct RotatingFileWriter {
    state: Arc<Mutex<WriterState>>,
    path: PathBuf,
}

struct WriterState {
    file: BufWriter<File>,
    current_size: u64,
    rotation: RotationManager,
    fallback: bool,
}

impl RotatingFileWriter {
    pub fn new(config: &FileConfig) -> Result<Self, LoggerError> {
        if let Some(parent) = config.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = open_log_file(&config.path, config.append)?;
        let current_size = if config.append {
            std::fs::metadata(&config.path).map(|m| m.len()).unwrap_or(0)
        } else {
            0
        };

        Ok(Self {
            state: Arc::new(Mutex::new(WriterState {
                file,
                current_size,
                rotation: RotationManager::new(config.rotation.clone()),
                fallback: false,
            })),
            path: config.path.clone(),
        })
    }

    #[cfg(test)]
    fn is_in_fallback_mode(&self) -> bool {
        self.state.lock().map(|s| s.fallback).unwrap_or(false)
    }
}

impl<'a> MakeWriter<'a> for RotatingFileWriter {
    type Writer = RotatingWriterGuard;

    fn make_writer(&'a self) -> Self::Writer {
        RotatingWriterGuard {
            state: Arc::clone(&self.state),
            path: self.path.clone(),
        }
    }
}

/// Per-event handle; rotation is checked before every write
pub struct RotatingWriterGuard {
    state: Arc<Mutex<WriterState>>,
    path: PathBuf,
}

impl RotatingWriterGuard {
    fn lock(&self) -> io::Result<MutexGuard<'_, WriterState>> {
        self.state
            .lock()
            .map_err(|_| io::Error::other("Failed to acquire writer lock"))
    }

    fn rotate(&self, state: &mut WriterState) -> io::Result<()> {
        state.file.flush()?;
        state
            .rotation
            .rotate(&self.path)
            .map_err(|e| io::Error::other(e.to_string()))?;
        state.file = open_log_file(&self.path, false)?;
        state.current_size = 0;
        Ok(())
    }

    fn fall_back(state: &mut WriterState, buf: &[u8], error: &io::Error) -> io::Result<usize> {
        state.fallback = true;
        eprintln!("[logger] File write failed, falling back to stderr: {error}");
        io::stderr().write(buf)
    }
}

impl Write for RotatingWriterGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.lock()?;

        if state.fallback {
            return io::stderr().write(buf);
        }

        if state.rotation.should_rotate(state.current_size)
            && let Err(e) = self.rotate(&mut state)
        {
            return Self::fall_back(&mut state, buf, &e);
        }

        match state.file.write(buf) {
            Ok(written) => {
                state.current_size += written as u64;
                Ok(written)
            }
            Err(e) => Self::fall_back(&mut state, buf, &e),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut state = self.lock()?;
        if state.fallback {
            return io::stderr().flush();
        }
        state.file.flush()
    }
}

impl Drop for RotatingWriterGuard {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            let _ = state.file.flush();
        }
    }
}

fn open_log_file(path: &Path, append: bool) -> io::Result<BufWriter<File>> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(path)?;

    Ok(BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::config::RotationConfig;
    use std::fs;
    use tempfile::tempdir;

    fn file_config(path: PathBuf, append: bool, max_size: u64) -> FileConfig {
        FileConfig {
            enabled: true,
            path,
            append,
            rotation: RotationConfig {
                max_size,
                max_files: 3,
                compress: false,
            },
            ..FileConfig::default()
        }
    }

    #[test]
    fn test_creates_missing_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/deeper/app.log");
        let writer = RotatingFileWriter::new(&file_config(path.clone(), true, 1024)).unwrap();

        writer.make_writer().write_all(b"hello\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n");
    }

    #[test]
    fn test_append_mode_keeps_existing_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.log");
        fs::write(&path, "old\n").unwrap();

        let writer = RotatingFileWriter::new(&file_config(path.clone(), true, 1024)).unwrap();
        writer.make_writer().write_all(b"new\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "old\nnew\n");
    }

    #[test]
    fn test_truncate_mode_discards_existing_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.log");
        fs::write(&path, "old\n").unwrap();

        let writer = RotatingFileWriter::new(&file_config(path.clone(), false, 1024)).unwrap();
        writer.make_writer().write_all(b"new\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
    }

    #[test]
    fn test_rotates_when_size_reached() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.log");
        let writer = RotatingFileWriter::new(&file_config(path.clone(), false, 10)).unwrap();

        writer.make_writer().write_all(b"0123456789").unwrap();
        writer.make_writer().write_all(b"next").unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("app.log.1")).unwrap(), "0123456789");
        assert_eq!(fs::read_to_string(&path).unwrap(), "next");
        assert!(!writer.is_in_fallback_mode());
    }
}
