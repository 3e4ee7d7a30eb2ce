//! File-backed order storage

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::orders::{CompletedOrder, OrderId, OrderStore, StoreError};

/// Stores each completed order as `order_<orderId>.json` in one directory.
#[derive(Debug, Clone)]
pub struct FileOrderStore {
    dir: PathBuf,
}

impl FileOrderStore {
    /// Open the store, creating the directory if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();

        fs::create_dir_all(&dir)?;

        debug!(dir = %dir.display(), "opened order store");

        Ok(Self { dir })
    }

    /// Directory orders are written to
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path an order with the given identifier is stored at
    pub fn path_for(&self, order_id: &OrderId) -> PathBuf {
        self.dir.join(order_id.file_name())
    }

    /// Read a stored order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no document exists for the identifier, or an
    /// error if the document cannot be read or decoded.
    pub fn load(&self, order_id: &OrderId) -> Result<CompletedOrder, StoreError> {
        let path = self.path_for(order_id);

        if !path.exists() {
            return Err(StoreError::NotFound(order_id.clone()));
        }

        let contents = fs::read_to_string(path)?;

        Ok(serde_json::from_str(&contents)?)
    }

    /// Read every stored order, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or a document cannot be read or decoded.
    pub fn list(&self) -> Result<Vec<CompletedOrder>, StoreError> {
        let mut orders = Vec::new();

        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();

            let is_order = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with("order_") && name.ends_with(".json"));

            if !is_order {
                continue;
            }

            let contents = fs::read_to_string(&path)?;
            orders.push(serde_json::from_str::<CompletedOrder>(&contents)?);
        }

        orders.sort_by(|a, b| a.order_id.cmp(&b.order_id));

        Ok(orders)
    }
}

impl OrderStore for FileOrderStore {
    fn save(&self, order: &CompletedOrder) -> Result<PathBuf, StoreError> {
        let path = self.path_for(&order.order_id);

        if path.exists() {
            warn!(
                order_id = %order.order_id,
                path = %path.display(),
                "order document already exists and will be overwritten"
            );
        }

        // Write beside the target so the rename stays on one filesystem.
        let mut file = NamedTempFile::new_in(&self.dir)?;
        serde_json::to_writer_pretty(&mut file, order)?;
        file.flush()?;
        file.persist(&path)?;

        info!(
            order_id = %order.order_id,
            path = %path.display(),
            total = %order.total,
            item_count = order.item_count,
            "order saved"
        );

        Ok(path)
    }
}
