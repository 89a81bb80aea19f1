//! Command implementations.

pub mod config;
pub mod extract;
pub mod history;
pub mod recognize;

pub use self::config::execute_config;
pub use self::extract::execute_extract;
pub use self::history::execute_history;
pub use self::recognize::execute_recognize;

use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use plantid_domain::traits::BlobStore;
use plantid_domain::{HistoryEntry, Origin, RecognitionInfo};
use plantid_store::{HistoryStore, SqliteBlobStore, StoreError};
use std::fs;

/// Open the history database named by the configuration.
pub fn open_history(config: &Config) -> Result<HistoryStore<SqliteBlobStore>> {
    let path = config.database_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let backend = SqliteBlobStore::new(&path)?;
    Ok(HistoryStore::new(backend, config.history.to_history_config())?)
}

/// Render a result and, for live results, record it.
///
/// Returns the rendered record and the new entry when one was recorded.
pub fn present<B>(
    history: &mut HistoryStore<B>,
    formatter: &Formatter,
    image: &str,
    info: &RecognitionInfo,
    origin: Origin,
) -> Result<(String, Option<HistoryEntry>)>
where
    B: BlobStore,
    StoreError: From<B::Error>,
{
    let recorded = history.observe(image, info.clone(), origin)?;
    Ok((formatter.format_info(info)?, recorded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use plantid_store::MemoryBlobStore;
    use tempfile::TempDir;

    fn mai_vang() -> RecognitionInfo {
        RecognitionInfo {
            common_name: "Mai vàng".to_string(),
            scientific_name: "Ochna integerrima".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_present_records_live_only() {
        let mut history = HistoryStore::with_defaults(MemoryBlobStore::new());
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let (output, recorded) = present(
            &mut history,
            &formatter,
            "file:///mai.jpg",
            &mai_vang(),
            Origin::Replay,
        )
        .unwrap();
        assert_eq!(output, "Ochna integerrima");
        assert!(recorded.is_none());
        assert!(history.list().unwrap().is_empty());

        let (_, recorded) = present(
            &mut history,
            &formatter,
            "file:///mai.jpg",
            &mai_vang(),
            Origin::Live,
        )
        .unwrap();
        assert!(recorded.is_some());
        assert_eq!(history.list().unwrap().len(), 1);
    }

    #[test]
    fn test_open_history_creates_database() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.history.database = Some(dir.path().join("data").join("history.db"));

        let mut history = open_history(&config).unwrap();
        history
            .append("file:///mai.jpg", mai_vang())
            .unwrap();
        assert!(dir.path().join("data").join("history.db").exists());
    }
}
