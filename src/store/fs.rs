//! Filesystem-backed artifact store.
//!
//! # Layout
//! ```text
//! <snapshots_dir>/<device>/<name containing YYYY-MM-DD_HHMM>
//! <reports_dir>/<device>/<device>_deviation_<YYYY-MM-DD_HHMM>.json
//! ```
//!
//! Reports are written to `.<id>.tmp` and renamed into place, so a reader
//! never sees a partially written report.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::store::types::{report_id, ArtifactStore, StoreError, StoredReport};

const REPORT_MARKER: &str = "_deviation_";

/// Artifact store over two directory trees.
#[derive(Debug, Clone)]
pub struct FsStore {
    snapshots_dir: PathBuf,
    reports_dir: PathBuf,
}

impl FsStore {
    pub fn new(snapshots_dir: impl Into<PathBuf>, reports_dir: impl Into<PathBuf>) -> Self {
        Self {
            snapshots_dir: snapshots_dir.into(),
            reports_dir: reports_dir.into(),
        }
    }

    pub fn snapshots_dir(&self) -> &Path {
        &self.snapshots_dir
    }

    pub fn reports_dir(&self) -> &Path {
        &self.reports_dir
    }

    fn device_reports(&self, device: &str) -> PathBuf {
        self.reports_dir.join(device)
    }
}

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Sorted file names in `dir` accepted by `keep`; a missing directory is empty.
fn list_files(dir: &Path, keep: impl Fn(&str) -> bool) -> Result<Vec<String>, StoreError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(io_err(dir)(e)),
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(io_err(dir))?;
        if !entry.file_type().map_err(io_err(dir))?.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if keep(name) {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}

/// Write `report` as pretty JSON and sync it to disk.
fn write_json(path: &Path, id: &str, report: &StoredReport) -> Result<(), StoreError> {
    let file = File::create(path).map_err(io_err(path))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, report).map_err(|source| StoreError::Corrupt {
        id: id.to_string(),
        source,
    })?;
    writer.flush().map_err(io_err(path))?;

    let file = writer.into_inner().map_err(|e| io_err(path)(e.into_error()))?;
    file.sync_all().map_err(io_err(path))
}

impl ArtifactStore for FsStore {
    fn snapshot_ids(&self, device: &str) -> Result<Vec<String>, StoreError> {
        list_files(&self.snapshots_dir.join(device), |name| !name.starts_with('.'))
    }

    fn load_snapshot(&self, device: &str, id: &str) -> Result<Vec<String>, StoreError> {
        let path = self.snapshots_dir.join(device).join(id);
        let text = fs::read_to_string(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound {
                device: device.to_string(),
                kind: "snapshot",
                id: id.to_string(),
            },
            _ => StoreError::Io { path: path.clone(), source },
        })?;
        Ok(text.lines().map(str::to_string).collect())
    }

    fn report_ids(&self, device: &str) -> Result<Vec<String>, StoreError> {
        list_files(&self.device_reports(device), |name| {
            name.contains(REPORT_MARKER) && name.ends_with(".json")
        })
    }

    fn load_report(&self, device: &str, id: &str) -> Result<StoredReport, StoreError> {
        let path = self.device_reports(device).join(id);
        let file = File::open(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound {
                device: device.to_string(),
                kind: "report",
                id: id.to_string(),
            },
            _ => StoreError::Io { path: path.clone(), source },
        })?;

        serde_json::from_reader(BufReader::new(file)).map_err(|source| StoreError::Corrupt {
            id: id.to_string(),
            source,
        })
    }

    fn save_report(&self, report: &StoredReport) -> Result<String, StoreError> {
        let dir = self.device_reports(&report.device);
        fs::create_dir_all(&dir).map_err(io_err(&dir))?;

        let id = report_id(&report.device, &report.generated_at);
        let path = dir.join(&id);
        let tmp_path = dir.join(format!(".{id}.tmp"));

        let write_result = write_json(&tmp_path, &id, report);
        if let Err(e) = write_result {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }

        fs::rename(&tmp_path, &path).map_err(|source| {
            let _ = fs::remove_file(&tmp_path);
            StoreError::Io {
                path: path.clone(),
                source,
            }
        })?;

        tracing::debug!(path = %path.display(), "Report written");
        Ok(id)
    }

    fn discard_reports(&self, device: &str) -> Result<usize, StoreError> {
        let dir = self.device_reports(device);
        let ids = self.report_ids(device)?;
        for id in &ids {
            let path = dir.join(id);
            fs::remove_file(&path).map_err(io_err(&path))?;
        }
        Ok(ids.len())
    }
}
