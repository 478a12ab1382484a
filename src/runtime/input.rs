//! Corpus Input Reading
//!
//! Inputs are text files with one document per line. Each line becomes a
//! [`Record`] keyed by the line's byte offset within its file, which is the
//! identity that output records carry back out.

use crate::error::JobResult;
use crate::runtime::types::Record;
use std::fs;
use std::path::{Path, PathBuf};

/// Reads every input location (a file, or a directory of files read in
/// sorted order) into one logical record set.
pub fn collect_records(inputs: &[PathBuf]) -> JobResult<Vec<Record>> {
    let mut records = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut files: Vec<PathBuf> = fs::read_dir(input)?
                .collect::<Result<Vec<_>, _>>()?
                .into_iter()
                .map(|entry| entry.path())
                .filter(|path| path.is_file())
                .collect();
            files.sort();
            for file in files {
                records_from_file(&file, &mut records)?;
            }
        } else {
            records_from_file(input, &mut records)?;
        }
    }

    tracing::info!("Collected {} input records", records.len());
    Ok(records)
}

fn records_from_file(path: &Path, records: &mut Vec<Record>) -> JobResult<()> {
    let contents = fs::read_to_string(path)?;

    let mut offset = 0u64;
    for line in contents.split('\n') {
        // A trailing newline yields one final empty segment, not a record.
        if offset as usize >= contents.len() {
            break;
        }
        records.push(Record {
            offset,
            text: line.trim_end_matches('\r').to_string(),
        });
        offset += line.len() as u64 + 1;
    }

    Ok(())
}

/// Splits records into at most `worker_count` contiguous, non-empty shards.
pub fn split_shards(records: Vec<Record>, worker_count: usize) -> Vec<Vec<Record>> {
    if records.is_empty() || worker_count == 0 {
        return Vec::new();
    }

    let shard_size = records.len().div_ceil(worker_count);
    let mut shards = Vec::new();
    let mut rest = records;
    while !rest.is_empty() {
        let tail = rest.split_off(rest.len().min(shard_size));
        shards.push(rest);
        rest = tail;
    }
    shards
}
