//! Append-only CSV record logs with fixed headers.
//!
//! Each log is a flat file whose first row is a fixed header; every event
//! appends exactly one row. Appends flush and fsync before returning so a
//! reported success is durable. `read_last` re-reads the whole file; cost
//! grows with total history size, which is acceptable at this system's
//! throughput and is isolated behind this type so a bounded buffer could
//! replace it without touching callers.

use std::fs::OpenOptions;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use eyre::WrapErr;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Report, Result, StoreError};

/// A row type bound to a fixed header row.
pub trait Record: Serialize + DeserializeOwned {
    const HEADERS: &'static [&'static str];
}

/// One telemetry sample from the field sensor.
#[derive(Debug, Clone, PartialEq, Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SensorReading {
    pub temperature: f32,
    pub humidity: f32,
    pub moisture: i32,
}

impl Record for SensorReading {
    const HEADERS: &'static [&'static str] = &["Temperature", "Humidity", "Moisture"];
}

/// One contact-form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl Record for ContactMessage {
    const HEADERS: &'static [&'static str] = &["Name", "Email", "Message"];
}

/// Append-only log of `T` rows at a fixed path.
#[derive(Debug)]
pub struct CsvStore<T> {
    path: PathBuf,
    _rec: PhantomData<T>,
}

impl<T: Record> CsvStore<T> {
    /// Open the log at `path`, creating it with the header row when
    /// absent. An existing log is never truncated or rewritten.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            let file = OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .map_err(|e| Report::new(StoreError::Io(e.to_string())))
                .wrap_err_with(|| format!("create log {}", path.display()))?;
            let mut wtr = csv::Writer::from_writer(file);
            wtr.write_record(T::HEADERS)
                .map_err(|e| Report::new(StoreError::Io(e.to_string())))
                .wrap_err("write header row")?;
            wtr.flush()
                .map_err(|e| Report::new(StoreError::Io(e.to_string())))
                .wrap_err("flush header row")?;
            let file = wtr
                .into_inner()
                .map_err(|e| Report::new(StoreError::Io(e.to_string())))?;
            file.sync_all()
                .map_err(|e| Report::new(StoreError::Io(e.to_string())))
                .wrap_err("sync new log")?;
            tracing::info!(path = %path.display(), "created log with header row");
        }
        Ok(Self {
            path,
            _rec: PhantomData,
        })
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one row, flushing and fsyncing before returning.
    pub fn append(&self, row: &T) -> Result<()> {
        let file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| Report::new(StoreError::Io(e.to_string())))
            .wrap_err_with(|| format!("open log {} for append", self.path.display()))?;
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        wtr.serialize(row)
            .map_err(|e| Report::new(StoreError::Io(e.to_string())))
            .wrap_err("serialize row")?;
        wtr.flush()
            .map_err(|e| Report::new(StoreError::Io(e.to_string())))
            .wrap_err("flush row")?;
        let file = wtr
            .into_inner()
            .map_err(|e| Report::new(StoreError::Io(e.to_string())))?;
        file.sync_all()
            .map_err(|e| Report::new(StoreError::Io(e.to_string())))
            .wrap_err("sync log")?;
        tracing::debug!(path = %self.path.display(), "appended row");
        Ok(())
    }

    /// Re-read the whole log and return the last `n` rows in original
    /// chronological order, header excluded.
    pub fn read_last(&self, n: usize) -> Result<Vec<T>> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)
            .map_err(|e| Report::new(StoreError::Io(e.to_string())))
            .wrap_err_with(|| format!("open log {}", self.path.display()))?;

        let headers = rdr
            .headers()
            .map_err(|e| Report::new(StoreError::Io(e.to_string())))
            .wrap_err("read log headers")?
            .clone();
        let actual: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
        if actual != T::HEADERS {
            return Err(Report::new(StoreError::HeaderMismatch {
                expected: T::HEADERS.join(","),
                actual: actual.join(","),
            }));
        }

        let mut rows = Vec::new();
        for (idx, rec) in rdr.deserialize::<T>().enumerate() {
            match rec {
                Ok(row) => rows.push(row),
                Err(e) => {
                    // Rows are numbered relative to the file, header included.
                    return Err(Report::new(StoreError::MalformedRow {
                        row: idx + 2,
                        message: e.to_string(),
                    }));
                }
            }
        }

        let skip = rows.len().saturating_sub(n);
        Ok(rows.split_off(skip))
    }
}
