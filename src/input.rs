// src/input.rs
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tracing::debug;

use crate::error::{FanJoinResult, FanJoinError};

/// Split a line on commas and whitespace and parse every token
pub fn parse_tokens<T>(line: &str) -> FanJoinResult<Vec<T>>
where
    T: FromStr,
    T::Err: Display,
{
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse().map_err(|e| {
                FanJoinError::InvalidInput(format!("Cannot parse '{}': {}", token, e))
            })
        })
        .collect()
}

/// Read a single line from standard input
pub async fn read_line() -> FanJoinResult<String> {
    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .map_err(|e| FanJoinError::InvalidInput(format!("Failed to read standard input: {}", e)))?;

    debug!("Read {} bytes from standard input", line.len());
    Ok(line)
}

/// Read standard input to the end
pub async fn read_all() -> FanJoinResult<String> {
    let mut text = String::new();
    tokio::io::stdin()
        .read_to_string(&mut text)
        .await
        .map_err(|e| FanJoinError::InvalidInput(format!("Failed to read standard input: {}", e)))?;

    Ok(text)
}

/// Use the given tokens, or fall back to one line of standard input
pub async fn tokens_or_stdin<T>(values: &[String]) -> FanJoinResult<Vec<T>>
where
    T: FromStr,
    T::Err: Display,
{
    if values.is_empty() {
        parse_tokens(&read_line().await?)
    } else {
        parse_tokens(&values.join(" "))
    }
}

/// Use the given paths verbatim, or split one line of standard input on whitespace
pub async fn paths_or_stdin(files: &[String]) -> FanJoinResult<Vec<PathBuf>> {
    if files.is_empty() {
        Ok(split_paths(&read_line().await?))
    } else {
        Ok(files.iter().map(PathBuf::from).collect())
    }
}

pub fn split_paths(line: &str) -> Vec<PathBuf> {
    line.split_whitespace().map(PathBuf::from).collect()
}

/// Parse JSON without serde_json's nesting limit, so trees as deep as
/// `max_tree_depth` reach the executor. The stack grows on demand while parsing.
pub fn parse_json<T: DeserializeOwned>(text: &str) -> FanJoinResult<T> {
    let to_error = |e: serde_json::Error| FanJoinError::SerializationError(format!("Failed to parse JSON: {}", e));

    let mut deserializer = serde_json::Deserializer::from_str(text);
    deserializer.disable_recursion_limit();

    let value = T::deserialize(serde_stacker::Deserializer::new(&mut deserializer)).map_err(to_error)?;
    deserializer.end().map_err(to_error)?;

    Ok(value)
}

pub async fn load_json<T: DeserializeOwned>(path: &Path) -> FanJoinResult<T> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| FanJoinError::FileError {
            path: path.to_path_buf(),
            message: format!("Failed to read file: {}", e),
        })?;

    parse_json(&content)
}
