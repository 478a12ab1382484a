//! Structured Output Writing
//!
//! Each worker writes its results to its own part file under the job's
//! output location, one JSON-serialized annotation result per line. Part
//! files never overlap between workers, so no cross-worker coordination is
//! needed.

use crate::error::JobResult;
use crate::runtime::types::AnnotationResult;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub struct PartWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    written: u64,
}

impl PartWriter {
    /// Creates `part-NNNNN.jsonl` for one worker under the output location.
    pub fn create(output_dir: &Path, worker_id: usize) -> JobResult<Self> {
        fs::create_dir_all(output_dir)?;
        let path = output_dir.join(format!("part-{:05}.jsonl", worker_id));
        let file = File::create(&path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            path,
            written: 0,
        })
    }

    pub fn write(&mut self, result: &AnnotationResult) -> JobResult<()> {
        let line = serde_json::to_string(result)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    /// Flushes and returns the part path plus the record count.
    pub fn finish(mut self) -> JobResult<(PathBuf, u64)> {
        self.writer.flush()?;
        Ok((self.path, self.written))
    }
}

/// Reads every part file under an output location back into memory.
/// Used by tests and by downstream consumers that want the full result set.
pub fn read_parts(output_dir: &Path) -> JobResult<Vec<AnnotationResult>> {
    let mut parts: Vec<PathBuf> = fs::read_dir(output_dir)?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension().is_some_and(|ext| ext == "jsonl")
                && path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with("part-"))
        })
        .collect();
    parts.sort();

    let mut results = Vec::new();
    for part in parts {
        for line in fs::read_to_string(&part)?.lines() {
            let result: AnnotationResult = serde_json::from_str(line)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
            results.push(result);
        }
    }
    Ok(results)
}
