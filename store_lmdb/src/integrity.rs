//! LMDB database integrity checks.
//!
//! Run on startup to detect corruption early, before the node begins
//! serving calls.

use std::path::Path;

use heed::Env;

use crate::environment::DATABASES;
use crate::LmdbError;

/// Summary of an integrity check run.
#[derive(Debug, Default)]
pub struct IntegrityReport {
    pub databases_checked: u32,
    pub total_entries: u64,
    pub errors: Vec<String>,
}

impl IntegrityReport {
    /// Returns `true` if no errors were detected.
    pub fn is_healthy(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Open each expected database and count its entries.
///
/// Read failures are recorded in the report rather than causing a hard
/// error; only failing to start a read transaction is fatal.
pub fn check_integrity(env: &Env) -> Result<IntegrityReport, LmdbError> {
    let mut report = IntegrityReport::default();
    let rtxn = env.read_txn()?;

    for &db_name in DATABASES {
        match env.open_database::<heed::types::Bytes, heed::types::Bytes>(&rtxn, Some(db_name)) {
            Ok(Some(db)) => {
                report.databases_checked += 1;
                match db.len(&rtxn) {
                    Ok(count) => report.total_entries += count,
                    Err(e) => report
                        .errors
                        .push(format!("failed to read database '{}': {}", db_name, e)),
                }
            }
            Ok(None) => report
                .errors
                .push(format!("database '{}' is missing", db_name)),
            Err(e) => report
                .errors
                .push(format!("failed to open database '{}': {}", db_name, e)),
        }
    }

    Ok(report)
}

/// Check if the LMDB data directory looks valid before opening.
///
/// Returns `Ok(())` for a fresh (nonexistent) directory. Returns an error
/// if the directory exists but `data.mdb` is missing, which suggests
/// corruption or misconfiguration.
pub fn check_data_dir(path: &Path) -> Result<(), String> {
    if !path.exists() {
        return Ok(());
    }
    let data_file = path.join("data.mdb");
    if !data_file.exists() {
        return Err(format!(
            "LMDB directory exists but data.mdb is missing at {}",
            path.display()
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_data_dir_fresh_path() {
        let dir = tempfile::tempdir().unwrap();
        assert!(check_data_dir(&dir.path().join("nope")).is_ok());
    }

    #[test]
    fn check_data_dir_rejects_empty_existing_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(check_data_dir(dir.path()).is_err());
    }

    #[test]
    fn unhealthy_report() {
        let report = IntegrityReport {
            databases_checked: 5,
            total_entries: 100,
            errors: vec!["corruption detected".to_string()],
        };
        assert!(!report.is_healthy());
    }
}
