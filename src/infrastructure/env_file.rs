//! Persistent `KEY=value` flags in a dotenv-style file.
//!
//! Writers take an exclusive advisory lock (`flock` on Unix, `LockFileEx` on
//! Windows) for the whole read-modify-write cycle so that concurrent setup
//! commands cannot interleave and lose updates. Readers take a shared lock.

use crate::error::EnvFileError;
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Handle to a flag file on disk.
#[derive(Debug, Clone)]
pub struct EnvFile {
    path: PathBuf,
}

impl EnvFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sets `key` to `value`, creating the file if needed.
    ///
    /// The first existing `KEY=` line is replaced in place; otherwise the
    /// flag is appended. All other lines are preserved in order.
    ///
    /// # Errors
    ///
    /// Returns [`EnvFileError::InvalidKey`] / [`EnvFileError::InvalidValue`]
    /// for input that cannot be stored as one line, and the I/O variants when
    /// the file cannot be opened, locked, read or written.
    pub fn set_flag(&self, key: &str, value: &str) -> Result<(), EnvFileError> {
        validate_key(key)?;
        if value.contains(['\n', '\r']) {
            return Err(EnvFileError::InvalidValue {
                key: key.to_string(),
            });
        }

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)
            .map_err(|source| EnvFileError::Open {
                path: self.path.clone(),
                source,
            })?;

        FileExt::lock_exclusive(&file).map_err(|source| EnvFileError::Lock {
            path: self.path.clone(),
            source,
        })?;

        let result = self.rewrite_locked(&mut file, key, value);
        self.release(&file);
        result
    }

    /// Returns the value of the first `KEY=` line, if any.
    ///
    /// A missing file is treated as empty.
    ///
    /// # Errors
    ///
    /// Returns an [`EnvFileError`] if the file exists but cannot be read.
    pub fn get_flag(&self, key: &str) -> Result<Option<String>, EnvFileError> {
        validate_key(key)?;

        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(EnvFileError::Open {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        FileExt::lock_shared(&file).map_err(|source| EnvFileError::Lock {
            path: self.path.clone(),
            source,
        })?;

        let mut contents = String::new();
        let read = file.read_to_string(&mut contents);
        self.release(&file);
        read.map_err(|source| self.io_error(source))?;

        let prefix = format!("{key}=");
        Ok(contents
            .lines()
            .find_map(|line| line.strip_prefix(&prefix))
            .map(str::to_string))
    }

    fn rewrite_locked(&self, file: &mut File, key: &str, value: &str) -> Result<(), EnvFileError> {
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|source| self.io_error(source))?;

        let updated = upsert_line(&contents, key, value);

        file.seek(SeekFrom::Start(0))
            .map_err(|source| self.io_error(source))?;
        file.set_len(0).map_err(|source| self.io_error(source))?;
        file.write_all(updated.as_bytes())
            .map_err(|source| self.io_error(source))?;
        file.flush().map_err(|source| self.io_error(source))
    }

    fn release(&self, file: &File) {
        if let Err(e) = FileExt::unlock(file) {
            tracing::debug!(path = %self.path.display(), error = %e, "Failed to release env file lock");
        }
    }

    fn io_error(&self, source: std::io::Error) -> EnvFileError {
        EnvFileError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

/// Sets a flag and reports success as a boolean.
///
/// Failures are logged at error level instead of being returned, for callers
/// (such as interactive setup steps) that only need to know whether the flag
/// was persisted.
pub fn set_env_flag(path: impl AsRef<Path>, key: &str, value: &str) -> bool {
    let env_file = EnvFile::new(path.as_ref());

    match env_file.set_flag(key, value) {
        Ok(()) => {
            tracing::debug!(path = %env_file.path().display(), key, "Env flag updated");
            true
        }
        Err(e) => {
            tracing::error!(key, error = %e, "Failed to set env flag {}: {}", key, e);
            false
        }
    }
}

fn validate_key(key: &str) -> Result<(), EnvFileError> {
    if key.is_empty() || key.contains('=') || key.chars().any(char::is_whitespace) {
        return Err(EnvFileError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// Replaces the first `key=` line or appends one, always ending with a newline.
fn upsert_line(contents: &str, key: &str, value: &str) -> String {
    let prefix = format!("{key}=");
    let entry = format!("{key}={value}");

    let mut lines: Vec<&str> = contents.lines().collect();
    match lines.iter().position(|line| line.starts_with(&prefix)) {
        Some(index) => lines[index] = &entry,
        None => lines.push(&entry),
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
