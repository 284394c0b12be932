use chrono::{DateTime, Utc};
use fs2::FileExt;
use log::{debug, error, info};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use crate::telemetry::{Reading, ReadingInput};

use super::{sort_chronologically, validate_batch, ReadingStore, StoreError};

const READINGS_FILE: &str = "readings.jsonl";

/// Stores readings as JSON Lines in `<data_folder>/readings.jsonl`.
///
/// Appends hold an exclusive lock on the file and reads a shared one, so
/// several handles (or processes) on the same folder never see a half-written
/// batch or hand out the same id. The next id is always derived from the
/// file itself.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Opens (or creates) the store folder and checks the existing records parse.
    pub fn open(data_folder: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(data_folder)?;
        let store = FileStore {
            path: data_folder.join(READINGS_FILE),
        };

        let existing = store.load(|_| true)?;
        info!(
            "Opened reading store at {} ({} readings)",
            store.path.display(),
            existing.len()
        );

        Ok(store)
    }

    fn load<F>(&self, keep: F) -> Result<Vec<Reading>, StoreError>
    where
        F: Fn(&Reading) -> bool,
    {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        FileExt::lock_shared(&file)?;

        let mut readings = read_records(&file)?;
        readings.retain(|r| keep(r));
        Ok(readings)
    }
}

fn read_records<R: Read>(reader: R) -> Result<Vec<Reading>, StoreError> {
    let mut readings = Vec::new();
    for line in BufReader::new(reader).lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        readings.push(serde_json::from_str(&line)?);
    }
    Ok(readings)
}

/// Runs `write` and syncs. On failure the file is truncated back to its
/// previous length before the error is returned.
fn write_or_roll_back<W>(file: &File, write: W) -> Result<(), StoreError>
where
    W: FnOnce(&File) -> io::Result<()>,
{
    let original_len = file.metadata()?.len();

    match write(file).and_then(|()| file.sync_all()) {
        Ok(()) => Ok(()),
        Err(e) => {
            if let Err(rollback) = file.set_len(original_len).and_then(|()| file.sync_all()) {
                error!("Failed to roll back partial append: {}", rollback);
            }
            Err(e.into())
        }
    }
}

impl ReadingStore for FileStore {
    fn append_all(&self, inputs: Vec<ReadingInput>) -> Result<Vec<Reading>, StoreError> {
        validate_batch(&inputs)?;
        if inputs.is_empty() {
            return Ok(Vec::new());
        }

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)?;
        FileExt::lock_exclusive(&file)?;

        let next_id = read_records(&file)?
            .iter()
            .map(|r| r.id)
            .max()
            .unwrap_or(0)
            + 1;

        let stored: Vec<Reading> = inputs
            .into_iter()
            .enumerate()
            .map(|(i, input)| Reading::from_input(next_id + i as u64, input))
            .collect();

        let mut buffer = Vec::new();
        for reading in &stored {
            serde_json::to_writer(&mut buffer, reading)?;
            buffer.push(b'\n');
        }

        write_or_roll_back(&file, |mut f| f.write_all(&buffer))?;

        debug!("Appended {} readings to {}", stored.len(), self.path.display());
        Ok(stored)
    }

    fn find_all(&self) -> Result<Vec<Reading>, StoreError> {
        self.load(|_| true)
    }

    fn find_by_satellite(&self, satellite_id: &str) -> Result<Vec<Reading>, StoreError> {
        self.load(|r| r.satellite_id == satellite_id)
    }

    fn find_by_satellite_in_range(
        &self,
        satellite_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Reading>, StoreError> {
        let mut readings = self.load(|r| {
            r.satellite_id == satellite_id && r.timestamp >= from && r.timestamp <= to
        })?;
        sort_chronologically(&mut readings);
        Ok(readings)
    }

    fn find_since(&self, since: DateTime<Utc>) -> Result<Vec<Reading>, StoreError> {
        let mut readings = self.load(|r| r.timestamp > since)?;
        sort_chronologically(&mut readings);
        Ok(readings)
    }
}
