use std::fs::File;
use std::io;
use std::path::Path;

use serde::Serialize;

use crate::telemetry::{CraneTelemetry, LoadStatus};
use crate::types::*;

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

/// One CSV row: a snapshot flattened to plain numbers in internal units
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelemetryRecord {
    pub elapsed_s: f64,
    pub rotation_angle_deg: f64,
    pub rotation_speed_deg_s: f64,
    pub rotation_speed_limit_deg_s: f64,
    pub trolley_position: f64,
    pub trolley_distance_m: f64,
    pub hook_depth: f64,
    pub hook_drop_m: f64,
    pub load_kg: f64,
    pub load_force_kn: f64,
    pub cargo_attached: bool,
    pub load_status: LoadStatus,
}

impl TelemetryRecord {
    pub fn from_snapshot(elapsed: Time, snapshot: &CraneTelemetry) -> Self {
        Self {
            elapsed_s: elapsed.get::<second>(),
            rotation_angle_deg: snapshot.rotation_angle.get::<degree>(),
            rotation_speed_deg_s: snapshot.rotation_speed.get::<degree_per_second>(),
            rotation_speed_limit_deg_s: snapshot.rotation_speed_limit.get::<degree_per_second>(),
            trolley_position: snapshot.trolley_position,
            trolley_distance_m: snapshot.trolley_distance.get::<meter>(),
            hook_depth: snapshot.hook_depth,
            hook_drop_m: snapshot.hook_drop.get::<meter>(),
            load_kg: snapshot.load.get::<kilogram>(),
            load_force_kn: snapshot.load_force.get::<kilonewton>(),
            cargo_attached: snapshot.cargo_attached,
            load_status: snapshot.load_status,
        }
    }
}

/// Streams telemetry snapshots as CSV, header first
pub struct TelemetryRecorder<W: io::Write> {
    writer: csv::Writer<W>,
    rows: usize,
}

impl TelemetryRecorder<File> {
    pub fn create(path: impl AsRef<Path>) -> Result<Self, TelemetryError> {
        let writer = csv::Writer::from_path(path.as_ref())?;
        log::info!("Recording telemetry to {}", path.as_ref().display());
        Ok(Self { writer, rows: 0 })
    }
}

impl<W: io::Write> TelemetryRecorder<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(writer),
            rows: 0,
        }
    }

    pub fn record(&mut self, elapsed: Time, snapshot: &CraneTelemetry) -> Result<(), TelemetryError> {
        self.writer.serialize(TelemetryRecord::from_snapshot(elapsed, snapshot))?;
        self.rows += 1;
        Ok(())
    }

    /// Rows written so far, header excluded
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn flush(&mut self) -> Result<(), TelemetryError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and hand back the underlying writer
    pub fn into_inner(self) -> Result<W, TelemetryError> {
        self.writer
            .into_inner()
            .map_err(|e| TelemetryError::IoError(e.into_error()))
    }
}
