// src/units/words.rs
use std::path::PathBuf;
use anyhow::Context;
use tracing::{info, debug};

use crate::engine::{Executor, TaskUnit};
use crate::error::FanJoinResult;

/// Count whitespace-delimited tokens
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Reads one file and counts its words
pub struct WordCountUnit;

#[async_trait::async_trait]
impl TaskUnit for WordCountUnit {
    type Input = PathBuf;
    type Output = usize;

    fn name(&self) -> &str {
        "word-count"
    }

    async fn run(&self, path: PathBuf) -> anyhow::Result<usize> {
        let content = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let words = count_words(&content);
        debug!("{}: {} words", path.display(), words);

        Ok(words)
    }
}

/// Total word count across `paths`. Any unreadable file fails the whole batch.
pub async fn total_word_count(executor: &Executor, paths: Vec<PathBuf>) -> FanJoinResult<usize> {
    let counts = executor.execute_all(paths, WordCountUnit).await?;
    let total: usize = counts.iter().sum();

    info!("Counted {} words across {} files", total, counts.len());
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use crate::error::FanJoinError;

    fn text_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_count_words() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("  one\ttwo\n\nthree  "), 3);
    }

    #[tokio::test]
    async fn test_total_across_files() {
        let executor = Executor::default();
        let first = text_file("the quick brown fox");
        let second = text_file("jumps over\nthe lazy dog\n");
        let empty = text_file("");

        let paths = vec![
            first.path().to_path_buf(),
            second.path().to_path_buf(),
            empty.path().to_path_buf(),
        ];

        assert_eq!(total_word_count(&executor, paths).await.unwrap(), 9);
    }

    #[tokio::test]
    async fn test_no_files_is_zero() {
        let executor = Executor::default();

        assert_eq!(total_word_count(&executor, Vec::new()).await.unwrap(), 0);
        assert_eq!(executor.tasks_launched(), 0);
    }

    #[tokio::test]
    async fn test_missing_file_fails_batch() {
        let executor = Executor::default();
        let present = text_file("still counted");
        let dir = tempfile::tempdir().unwrap();

        let paths = vec![present.path().to_path_buf(), dir.path().join("missing.txt")];
        let err = total_word_count(&executor, paths).await.unwrap_err();

        match err {
            FanJoinError::UnitFailure { unit, index, message } => {
                assert_eq!(unit, "word-count");
                assert_eq!(index, 1);
                assert!(message.contains("missing.txt"), "message was {}", message);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
