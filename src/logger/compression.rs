//! Gzip compression of rotated log files

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;

use crate::logger::error::LoggerError;

/// Path of the compressed counterpart: `app.log.1` becomes `app.log.1.gz`.
pub fn gzip_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".gz");
    path.with_file_name(name)
}

/// Compresses `path` into `<path>.gz` and removes the original.
pub fn gzip_file(path: &Path) -> Result<PathBuf, LoggerError> {
    let target = gzip_path(path);

    let compress = || -> io::Result<()> {
        let mut input = BufReader::new(File::open(path)?);
        let mut encoder = GzEncoder::new(BufWriter::new(File::create(&target)?), Compression::default());
        io::copy(&mut input, &mut encoder)?;
        encoder.finish()?;
        Ok(())
    };
    compress().map_err(|e| {
        LoggerError::compression(format!("Failed to compress {}: {}", path.display(), e))
    })?;

    fs::remove_file(path)?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use proptest::prelude::*;
    use std::io::Read;
    use tempfile::tempdir;

    #[test]
    fn test_gzip_path_appends_extension() {
        assert_eq!(
            gzip_path(Path::new("logs/app.log.2")),
            PathBuf::from("logs/app.log.2.gz")
        );
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let result = gzip_file(&dir.path().join("absent.log"));
        assert!(matches!(result, Err(LoggerError::Compression { .. })));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn compressed_file_replaces_original(content in "[a-zA-Z0-9 \n]{1,1000}") {
            let dir = tempdir().unwrap();
            let path = dir.path().join("app.log.1");
            fs::write(&path, &content).unwrap();

            let target = gzip_file(&path).unwrap();
            prop_assert!(!path.exists());
            prop_assert_eq!(&target, &dir.path().join("app.log.1.gz"));

            let mut decoded = String::new();
            GzDecoder::new(File::open(&target).unwrap())
                .read_to_string(&mut decoded)
                .unwrap();
            prop_assert_eq!(decoded, content);
        }
    }
}
