//! Single-slot backup of the target database.
//!
//! Before an import the existing database file is preserved as
//! `<database>.bak`. Only one backup is kept; an older `.bak` is replaced.

use crate::config::BackupMode;
use crate::constants::BACKUP_SUFFIX;
use crate::error::{ImportError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Path of the backup slot for `database`
pub fn backup_path(database: &Path) -> PathBuf {
    let mut path = database.as_os_str().to_owned();
    path.push(BACKUP_SUFFIX);
    PathBuf::from(path)
}

/// Back up `database` according to `mode`
///
/// Returns the backup path when a backup was written, `None` when there
/// was nothing to back up or backups are disabled.
pub fn backup_database(database: &Path, mode: BackupMode) -> Result<Option<PathBuf>> {
    if !database.is_file() {
        debug!("No existing database at {}", database.display());
        return Ok(None);
    }

    let backup = backup_path(database);
    let io_error = |source| ImportError::Backup {
        path: database.to_path_buf(),
        source,
    };

    match mode {
        BackupMode::Move => {
            if backup.exists() {
                fs::remove_file(&backup).map_err(io_error)?;
            }
            fs::rename(database, &backup).map_err(io_error)?;
        }
        BackupMode::Copy => {
            fs::copy(database, &backup).map_err(io_error)?;
        }
        BackupMode::None => {
            debug!("Database backup disabled");
            return Ok(None);
        }
    }

    info!(
        "Backed up {} to {} ({:?})",
        database.display(),
        backup.display(),
        mode
    );
    Ok(Some(backup))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_backup_path_appends_suffix() {
        assert_eq!(
            backup_path(Path::new("/data/hydro.sqlite")),
            PathBuf::from("/data/hydro.sqlite.bak")
        );
    }

    #[test]
    fn test_missing_database_is_not_backed_up() {
        let temp_dir = TempDir::new().unwrap();
        let database = temp_dir.path().join("hydro.sqlite");

        assert_eq!(backup_database(&database, BackupMode::Move).unwrap(), None);
        assert!(!backup_path(&database).exists());
    }

    #[test]
    fn test_move_replaces_previous_backup() {
        let temp_dir = TempDir::new().unwrap();
        let database = temp_dir.path().join("hydro.sqlite");
        fs::write(&database, b"current").unwrap();
        fs::write(backup_path(&database), b"older").unwrap();

        let backup = backup_database(&database, BackupMode::Move)
            .unwrap()
            .unwrap();

        assert!(!database.exists());
        assert_eq!(fs::read(&backup).unwrap(), b"current");
    }

    #[test]
    fn test_copy_keeps_database() {
        let temp_dir = TempDir::new().unwrap();
        let database = temp_dir.path().join("hydro.sqlite");
        fs::write(&database, b"current").unwrap();
        fs::write(backup_path(&database), b"older").unwrap();

        let backup = backup_database(&database, BackupMode::Copy)
            .unwrap()
            .unwrap();

        assert_eq!(fs::read(&database).unwrap(), b"current");
        assert_eq!(fs::read(&backup).unwrap(), b"current");
    }

    #[test]
    fn test_backup_disabled() {
        let temp_dir = TempDir::new().unwrap();
        let database = temp_dir.path().join("hydro.sqlite");
        fs::write(&database, b"current").unwrap();

        assert_eq!(backup_database(&database, BackupMode::None).unwrap(), None);
        assert!(database.exists());
        assert!(!backup_path(&database).exists());
    }
}
