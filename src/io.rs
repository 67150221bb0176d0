use crate::charge::{Charge, ChargeStore};
use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{BufWriter, Cursor, Read, Write};
use std::path::Path;
use ultraviolet::DVec2;

use crate::profile_scope;

/// One element of the persisted charge array.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChargeRecord {
    pub x: f64,
    pub y: f64,
    pub q: f64,
    #[serde(default)]
    pub vx: f64,
    #[serde(default)]
    pub vy: f64,
    pub m: f64,
    #[serde(rename = "netFx", default)]
    pub net_fx: f64,
    #[serde(rename = "netFy", default)]
    pub net_fy: f64,
}

impl From<&Charge> for ChargeRecord {
    fn from(c: &Charge) -> Self {
        Self {
            x: c.pos.x,
            y: c.pos.y,
            q: c.charge,
            vx: c.vel.x,
            vy: c.vel.y,
            m: c.mass,
            net_fx: c.net_force.x,
            net_fy: c.net_force.y,
        }
    }
}

impl From<ChargeRecord> for Charge {
    fn from(r: ChargeRecord) -> Self {
        let mut charge = Charge::new(DVec2::new(r.x, r.y), DVec2::new(r.vx, r.vy), r.q, r.m);
        charge.net_force = DVec2::new(r.net_fx, r.net_fy);
        charge
    }
}

impl ChargeRecord {
    /// Reason this record cannot enter the store, if any.
    fn defect(&self) -> Option<&'static str> {
        let values = [self.x, self.y, self.q, self.vx, self.vy, self.m, self.net_fx, self.net_fy];
        if values.iter().any(|v| !v.is_finite()) {
            return Some("non-finite value");
        }
        if self.m <= 0.0 {
            return Some("mass must be positive");
        }
        None
    }
}

#[derive(Debug)]
pub enum StateError {
    Io(std::io::Error),
    Json(serde_json::Error),
    /// Top-level payload was valid JSON but not an array.
    NotAnArray,
    InvalidEntry { index: usize, reason: String },
    /// Export requested with no recorded samples.
    NoSamples,
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::Io(e) => write!(f, "I/O error: {e}"),
            StateError::Json(e) => write!(f, "invalid JSON: {e}"),
            StateError::NotAnArray => write!(f, "expected a JSON array of charges"),
            StateError::InvalidEntry { index, reason } => {
                write!(f, "invalid charge at index {index}: {reason}")
            }
            StateError::NoSamples => write!(f, "no simulation data to export"),
        }
    }
}

impl std::error::Error for StateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StateError::Io(e) => Some(e),
            StateError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StateError {
    fn from(e: std::io::Error) -> Self {
        StateError::Io(e)
    }
}

impl From<serde_json::Error> for StateError {
    fn from(e: serde_json::Error) -> Self {
        StateError::Json(e)
    }
}

pub fn snapshot(store: &ChargeStore) -> Vec<ChargeRecord> {
    store.iter().map(ChargeRecord::from).collect()
}

/// Swap the whole store for `records`. Every record is checked first; on any
/// defect the store is left untouched.
pub fn replace(store: &mut ChargeStore, records: Vec<ChargeRecord>) -> Result<usize, StateError> {
    if let Some((index, reason)) = records
        .iter()
        .enumerate()
        .find_map(|(i, r)| r.defect().map(|reason| (i, reason)))
    {
        return Err(StateError::InvalidEntry {
            index,
            reason: reason.to_string(),
        });
    }
    let count = records.len();
    store.replace(records.into_iter().map(Charge::from).collect());
    Ok(count)
}

pub fn to_json(store: &ChargeStore) -> Result<String, StateError> {
    Ok(serde_json::to_string_pretty(&snapshot(store))?)
}

/// Parse a charge array without touching any store.
pub fn parse_records(bytes: &[u8]) -> Result<Vec<ChargeRecord>, StateError> {
    let value: serde_json::Value = serde_json::from_slice(bytes)?;
    let entries = match value {
        serde_json::Value::Array(entries) => entries,
        _ => return Err(StateError::NotAnArray),
    };
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            serde_json::from_value::<ChargeRecord>(entry).map_err(|e| StateError::InvalidEntry {
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}

pub fn replace_from_json(store: &mut ChargeStore, json: &str) -> Result<usize, StateError> {
    let records = parse_records(json.as_bytes())?;
    replace(store, records)
}

/// Write the charge array to `path`. Paths ending in `.gz` are gzip compressed.
/// The file is written beside the target and renamed over it.
pub fn save_state<P: AsRef<Path>>(path: P, store: &ChargeStore) -> Result<(), StateError> {
    profile_scope!("save_state");
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let records = snapshot(store);
    let use_gzip = path.extension().is_some_and(|ext| ext == "gz");
    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);
    {
        let file = std::fs::File::create(&tmp_path)?;
        let writer = BufWriter::new(file);
        if use_gzip {
            let mut encoder = GzEncoder::new(writer, Compression::fast());
            serde_json::to_writer(&mut encoder, &records)?;
            let mut writer = encoder.finish()?;
            writer.flush()?;
        } else {
            let mut writer = writer;
            serde_json::to_writer_pretty(&mut writer, &records)?;
            writer.flush()?;
        }
    }
    std::fs::rename(&tmp_path, path)?;
    log::info!("Saved {} charges to {}", records.len(), path.display());
    Ok(())
}

/// Replace the store with the array stored at `path` (plain or gzip JSON).
pub fn load_state<P: AsRef<Path>>(path: P, store: &mut ChargeStore) -> Result<usize, StateError> {
    profile_scope!("load_state");
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    let result = match maybe_decompress_gzip(&data)? {
        Some(decoded) => parse_records(&decoded),
        None => parse_records(&data),
    }
    .and_then(|records| replace(store, records));
    match &result {
        Ok(count) => log::info!("Loaded {} charges from {}", count, path.display()),
        Err(e) => log::warn!("Rejected load of {}: {}", path.display(), e),
    }
    result
}

fn maybe_decompress_gzip(data: &[u8]) -> std::io::Result<Option<Vec<u8>>> {
    if data.len() < 2 || data[0] != 0x1f || data[1] != 0x8b {
        return Ok(None);
    }

    let mut decoder = GzDecoder::new(Cursor::new(data));
    let mut decoded = Vec::new();
    decoder.read_to_end(&mut decoded)?;
    Ok(Some(decoded))
}
