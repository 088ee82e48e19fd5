use crate::errors::TrackerError;
use crate::models::AppData;
use std::path::Path;
use tokio::fs;
use tracing::error;

pub async fn load_data(path: &Path) -> AppData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse data file {}: {err}", path.display());
                AppData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => AppData::default(),
        Err(err) => {
            error!("failed to read data file {}: {err}", path.display());
            AppData::default()
        }
    }
}

/// Replaces the data file in one step: the document is written to a
/// sibling temp file which is then renamed over `path`.
pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), TrackerError> {
    let payload = serde_json::to_vec_pretty(data)?;
    let tmp_path = path.with_extension(format!("tmp.{}", std::process::id()));
    fs::write(&tmp_path, payload).await?;
    if let Err(err) = fs::rename(&tmp_path, path).await {
        let _ = fs::remove_file(&tmp_path).await;
        return Err(err.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provision::ensure_user_and_habit;

    #[tokio::test]
    async fn missing_file_loads_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let data = load_data(&dir.path().join("absent.json")).await;
        assert_eq!(data, AppData::default());
    }

    #[tokio::test]
    async fn corrupt_file_loads_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("habits.json");
        std::fs::write(&path, b"{not json").unwrap();
        assert_eq!(load_data(&path).await, AppData::default());
    }

    #[tokio::test]
    async fn persisted_store_reloads_with_same_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("habits.json");
        let mut data = AppData::default();
        let (user, habit) = ensure_user_and_habit(&mut data);

        persist_data(&path, &data).await.unwrap();
        let reloaded = load_data(&path).await;

        assert_eq!(reloaded, data);
        assert_eq!(reloaded.users[0].id, user.id);
        assert_eq!(reloaded.habits[0].id, habit.id);
        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().contains("tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[tokio::test]
    async fn persist_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("habits.json");
        let err = persist_data(&path, &AppData::default()).await.unwrap_err();
        assert!(matches!(err, TrackerError::Storage(_)));
    }
}
