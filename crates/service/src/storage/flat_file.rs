use std::{
    marker::PhantomData,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use models::FlatRecord;
use serde::{de::DeserializeOwned, Serialize};
use tokio::{fs, io::AsyncWriteExt};
use tracing::{debug, info};

use super::TableStorage;
use crate::errors::ServiceError;

/// Flat table file: one record per line, fields joined by commas in struct
/// order, dates as `YYYY-MM-DD`. No header row and no quoting, so a field
/// holding a comma cannot be stored.
pub struct FlatFileTable<R> {
    path: PathBuf,
    _record: PhantomData<fn() -> R>,
}

impl<R> FlatFileTable<R>
where
    R: FlatRecord + Serialize + DeserializeOwned,
{
    /// Open the table at `path`, creating the parent directory and an empty file if missing.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ServiceError::io(parent, e))?;
        }
        if fs::metadata(&path).await.is_err() {
            fs::write(&path, b"").await.map_err(|e| ServiceError::io(&path, e))?;
            info!(table = R::TABLE, path = %path.display(), "created empty table file");
        }
        Ok(Self { path, _record: PhantomData })
    }
}

fn encode<R: Serialize>(records: &[R]) -> Result<Vec<u8>, ServiceError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    for record in records {
        wtr.serialize(record).map_err(|e| ServiceError::Encode(e.to_string()))?;
    }
    wtr.into_inner().map_err(|e| ServiceError::Encode(e.to_string()))
}

fn decode<R>(path: &Path, bytes: &[u8]) -> Result<Vec<R>, ServiceError>
where
    R: FlatRecord + DeserializeOwned,
{
    // the csv reader silently drops empty lines; only the final newline may end in one
    let mut lines = bytes.split(|b| *b == b'\n').peekable();
    let mut line = 0u64;
    while let Some(text) = lines.next() {
        line += 1;
        let is_last = lines.peek().is_none();
        if !is_last && text.strip_suffix(b"\r").unwrap_or(text).is_empty() {
            return Err(ServiceError::Corrupt {
                path: path.to_path_buf(),
                line,
                reason: format!("expected {} fields, found an empty line", R::FIELD_COUNT),
            });
        }
    }

    // quoting off: a field is exactly the text between two commas
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .from_reader(bytes);

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result.map_err(|e| ServiceError::Corrupt {
            path: path.to_path_buf(),
            line: e.position().map_or(0, |p| p.line()),
            reason: e.to_string(),
        })?;
        let line = row.position().map_or(0, |p| p.line());
        if row.len() != R::FIELD_COUNT {
            return Err(ServiceError::Corrupt {
                path: path.to_path_buf(),
                line,
                reason: format!("expected {} fields, found {}", R::FIELD_COUNT, row.len()),
            });
        }
        let record: R = row.deserialize(None).map_err(|e| ServiceError::Corrupt {
            path: path.to_path_buf(),
            line,
            reason: e.to_string(),
        })?;
        records.push(record);
    }
    Ok(records)
}

#[async_trait]
impl<R> TableStorage<R> for FlatFileTable<R>
where
    R: FlatRecord + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    async fn append(&self, record: &R) -> Result<(), ServiceError> {
        let bytes = encode(std::slice::from_ref(record))?;
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| ServiceError::io(&self.path, e))?;
        file.write_all(&bytes).await.map_err(|e| ServiceError::io(&self.path, e))?;
        file.sync_data().await.map_err(|e| ServiceError::io(&self.path, e))?;
        debug!(table = R::TABLE, id = record.id(), "appended record");
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<R>, ServiceError> {
        let bytes = fs::read(&self.path).await.map_err(|e| ServiceError::io(&self.path, e))?;
        decode(&self.path, &bytes)
    }

    async fn rewrite(&self, records: &[R]) -> Result<(), ServiceError> {
        let bytes = encode(records)?;
        fs::write(&self.path, bytes).await.map_err(|e| ServiceError::io(&self.path, e))?;
        debug!(table = R::TABLE, count = records.len(), "rewrote table");
        Ok(())
    }
}
