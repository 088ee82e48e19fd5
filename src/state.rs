use crate::errors::TrackerError;
use crate::models::AppData;
use crate::storage::persist_data;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<AppData>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: AppData) -> Self {
        Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
        }
    }

    /// Runs `op` against a draft copy of the store. The draft is written to
    /// disk and becomes the live state only when `op` succeeds; if `op` or
    /// the write fails, neither the file nor the in-memory data change.
    pub async fn transact<T>(
        &self,
        op: impl FnOnce(&mut AppData) -> Result<T, TrackerError>,
    ) -> Result<T, TrackerError> {
        let mut data = self.data.lock().await;
        let mut draft = data.clone();
        let output = op(&mut draft)?;

        if draft != *data {
            persist_data(&self.data_path, &draft).await?;
            *data = draft;
        }

        Ok(output)
    }
}
