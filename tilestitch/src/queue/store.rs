//! Durable FIFO of job ids backed by a text file.
//!
//! One entry per line. A missing or empty file is an empty queue. Every
//! mutation writes the whole file to `<path>.tmp` and renames it over the
//! original, so a crash mid-write leaves either the old or the new queue.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::error::QueueError;
use crate::job::JobId;

/// One queue line with its 1-based position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueEntry {
    /// Position in the queue, starting at 1
    pub ordinal: usize,
    /// Entry text, trimmed
    pub value: String,
}

/// File-backed queue of job ids.
#[derive(Debug, Clone)]
pub struct QueueStore {
    path: PathBuf,
}

impl QueueStore {
    /// Queue stored at `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the queue file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every entry in order, trimmed.
    pub async fn entries(&self) -> Result<Vec<String>, QueueError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(content.lines().map(|line| line.trim().to_string()).collect()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(source) => Err(QueueError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Appends ids not already queued, keeping arrival order.
    ///
    /// Entries are compared by their decimal text, so duplicates within
    /// `ids` are dropped too. Returns the ids actually added.
    pub async fn add(&self, ids: &[JobId]) -> Result<Vec<JobId>, QueueError> {
        let mut entries = self.entries().await?;
        let mut seen: HashSet<String> = entries.iter().cloned().collect();
        let mut added = Vec::new();

        for id in ids {
            let text = id.to_string();
            if seen.insert(text.clone()) {
                entries.push(text);
                added.push(*id);
                info!(job_id = %id, "Added to the queue");
            } else {
                debug!(job_id = %id, "Already queued, skipping");
            }
        }

        if !added.is_empty() {
            self.write_entries(&entries).await?;
        }
        Ok(added)
    }

    /// Current entries with their ordinals.
    pub async fn view(&self) -> Result<Vec<QueueEntry>, QueueError> {
        Ok(self
            .entries()
            .await?
            .into_iter()
            .enumerate()
            .map(|(i, value)| QueueEntry {
                ordinal: i + 1,
                value,
            })
            .collect())
    }

    /// First entry, if any.
    pub async fn peek(&self) -> Result<Option<String>, QueueError> {
        Ok(self.entries().await?.into_iter().next())
    }

    /// Removes and returns the first entry.
    pub async fn pop_front(&self) -> Result<Option<String>, QueueError> {
        let mut entries = self.entries().await?;
        if entries.is_empty() {
            return Ok(None);
        }
        let head = entries.remove(0);
        self.write_entries(&entries).await?;
        Ok(Some(head))
    }

    /// True when the queue holds no entries.
    pub async fn is_empty(&self) -> Result<bool, QueueError> {
        Ok(self.entries().await?.is_empty())
    }

    async fn write_entries(&self, entries: &[String]) -> Result<(), QueueError> {
        let to_error = |source: io::Error| QueueError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(to_error)?;
            }
        }

        let mut content = String::new();
        for entry in entries {
            content.push_str(entry);
            content.push('\n');
        }

        let temp_path = self.temp_path();
        tokio::fs::write(&temp_path, content)
            .await
            .map_err(to_error)?;
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(to_error)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn ids(values: &[u64]) -> Vec<JobId> {
        values.iter().map(|v| JobId::new(*v).unwrap()).collect()
    }

    fn store(temp_dir: &TempDir) -> QueueStore {
        QueueStore::new(temp_dir.path().join("queue.txt"))
    }

    #[tokio::test]
    async fn test_absent_file_is_empty_queue() {
        let temp_dir = TempDir::new().unwrap();
        let queue = store(&temp_dir);

        assert!(queue.is_empty().await.unwrap());
        assert!(queue.view().await.unwrap().is_empty());
        assert_eq!(queue.pop_front().await.unwrap(), None);
        assert!(!queue.path().exists());
    }

    #[tokio::test]
    async fn test_add_deduplicates() {
        let temp_dir = TempDir::new().unwrap();
        let queue = store(&temp_dir);

        let first = queue.add(&ids(&[42, 42])).await.unwrap();
        let second = queue.add(&ids(&[42])).await.unwrap();

        assert_eq!(first, ids(&[42]));
        assert!(second.is_empty());
        assert_eq!(queue.entries().await.unwrap(), vec!["42"]);
    }

    #[tokio::test]
    async fn test_add_preserves_arrival_order() {
        let temp_dir = TempDir::new().unwrap();
        let queue = store(&temp_dir);

        queue.add(&ids(&[3, 1])).await.unwrap();
        queue.add(&ids(&[2, 3, 4])).await.unwrap();

        assert_eq!(queue.entries().await.unwrap(), vec!["3", "1", "2", "4"]);
    }

    #[tokio::test]
    async fn test_view_numbers_from_one() {
        let temp_dir = TempDir::new().unwrap();
        let queue = store(&temp_dir);
        queue.add(&ids(&[10, 20])).await.unwrap();

        let view = queue.view().await.unwrap();
        assert_eq!(
            view,
            vec![
                QueueEntry {
                    ordinal: 1,
                    value: "10".to_string()
                },
                QueueEntry {
                    ordinal: 2,
                    value: "20".to_string()
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_pop_front_rewrites_without_head() {
        let temp_dir = TempDir::new().unwrap();
        let queue = store(&temp_dir);
        queue.add(&ids(&[1, 2])).await.unwrap();

        assert_eq!(queue.pop_front().await.unwrap().as_deref(), Some("1"));
        assert_eq!(std::fs::read_to_string(queue.path()).unwrap(), "2\n");
        assert_eq!(queue.pop_front().await.unwrap().as_deref(), Some("2"));
        assert!(queue.is_empty().await.unwrap());
    }

    #[tokio::test]
    async fn test_mutations_leave_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let queue = store(&temp_dir);

        queue.add(&ids(&[1, 2, 3])).await.unwrap();
        queue.pop_front().await.unwrap();

        let names: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["queue.txt"]);
    }

    #[tokio::test]
    async fn test_existing_entries_are_trimmed() {
        let temp_dir = TempDir::new().unwrap();
        let queue = store(&temp_dir);
        std::fs::write(queue.path(), " 7 \r\n8\n").unwrap();

        assert_eq!(queue.entries().await.unwrap(), vec!["7", "8"]);
        assert!(queue.add(&ids(&[7])).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_queue_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        // A directory cannot be read as a file
        let queue = QueueStore::new(temp_dir.path());

        assert!(matches!(
            queue.entries().await,
            Err(QueueError::Read { .. })
        ));
    }
}
