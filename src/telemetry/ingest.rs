use log::info;

use crate::store::{ReadingStore, StoreError};

use super::ReadingInput;

/// Appends a batch and returns how many readings were stored.
pub fn ingest(store: &dyn ReadingStore, batch: Vec<ReadingInput>) -> Result<usize, StoreError> {
    let submitted = batch.len();
    let stored = store.append_all(batch)?;
    info!("Ingested {}/{} readings", stored.len(), submitted);
    Ok(stored.len())
}
