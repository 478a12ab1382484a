//! Worker Module Tests
//!
//! Exercises the engine cache state machine (build-once, close semantics)
//! and the record processor (offset identity, error propagation) against
//! stub engines plugged in through the factory seam.

use crate::engine::annotator::{Annotator, EngineFactory};
use crate::error::{JobError, JobResult};
use crate::runtime::types::Record;
use crate::worker::cache::EngineCache;
use crate::worker::processor::RecordProcessor;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Stub engine that echoes its input and counts shutdowns.
struct EchoEngine {
    shutdowns: Arc<AtomicUsize>,
}

impl Annotator for EchoEngine {
    fn annotate(&mut self, text: &str) -> JobResult<String> {
        Ok(format!("<echo>{}</echo>", text))
    }

    fn shutdown(&mut self) {
        self.shutdowns.fetch_add(1, Ordering::SeqCst);
    }
}

/// Factory that counts constructions, so tests can assert build-once.
struct CountingFactory {
    builds: Arc<AtomicUsize>,
    shutdowns: Arc<AtomicUsize>,
}

impl EngineFactory for CountingFactory {
    fn build(&self, _bundle_dir: &Path) -> JobResult<Box<dyn Annotator>> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(EchoEngine {
            shutdowns: self.shutdowns.clone(),
        }))
    }
}

/// Factory whose engines refuse to initialize.
struct FailingFactory;

impl EngineFactory for FailingFactory {
    fn build(&self, _bundle_dir: &Path) -> JobResult<Box<dyn Annotator>> {
        Err(JobError::engine_init("corrupt bundle"))
    }
}

/// Engine that fails on every record.
struct BrokenEngine;

impl Annotator for BrokenEngine {
    fn annotate(&mut self, _text: &str) -> JobResult<String> {
        Err(JobError::engine_init("annotation pipeline crashed"))
    }
}

struct BrokenEngineFactory;

impl EngineFactory for BrokenEngineFactory {
    fn build(&self, _bundle_dir: &Path) -> JobResult<Box<dyn Annotator>> {
        Ok(Box::new(BrokenEngine))
    }
}

fn counting_cache() -> (EngineCache, Arc<AtomicUsize>, Arc<AtomicUsize>) {
    let builds = Arc::new(AtomicUsize::new(0));
    let shutdowns = Arc::new(AtomicUsize::new(0));
    let cache = EngineCache::new(
        PathBuf::from("/unused"),
        Arc::new(CountingFactory {
            builds: builds.clone(),
            shutdowns: shutdowns.clone(),
        }),
    );
    (cache, builds, shutdowns)
}

// ============================================================
// EngineCache lifecycle
// ============================================================

#[test]
fn test_engine_built_once_across_many_records() {
    // ARRANGE
    let (mut cache, builds, _) = counting_cache();

    // ACT: process many records through the same cache
    let mut processor = RecordProcessor::new(&mut cache);
    for i in 0..50u64 {
        let record = Record {
            offset: i,
            text: format!("doc {}", i),
        };
        processor.process(&record).unwrap();
    }

    // ASSERT: construction cost paid exactly once
    assert_eq!(builds.load(Ordering::SeqCst), 1);
    assert_eq!(cache.build_count(), 1);
}

#[test]
fn test_close_without_construction_is_noop() {
    let (mut cache, builds, shutdowns) = counting_cache();

    cache.close();

    assert!(cache.is_closed());
    assert_eq!(builds.load(Ordering::SeqCst), 0);
    assert_eq!(shutdowns.load(Ordering::SeqCst), 0);
}

#[test]
fn test_close_releases_engine_and_is_idempotent() {
    let (mut cache, _, shutdowns) = counting_cache();
    cache.ensure_ready().unwrap();

    cache.close();
    cache.close();

    assert!(cache.is_closed());
    assert_eq!(shutdowns.load(Ordering::SeqCst), 1);
}

#[test]
fn test_ensure_ready_after_close_fails() {
    let (mut cache, _, _) = counting_cache();
    cache.close();

    let result = cache.ensure_ready();

    assert!(matches!(
        result,
        Err(JobError::EngineInitialization { .. })
    ));
}

#[test]
fn test_construction_failure_is_fatal_and_not_retried_here() {
    let mut cache = EngineCache::new(PathBuf::from("/unused"), Arc::new(FailingFactory));

    let first = cache.ensure_ready();
    assert!(matches!(first, Err(JobError::EngineInitialization { .. })));
    assert_eq!(cache.build_count(), 0);
}

// ============================================================
// RecordProcessor
// ============================================================

#[test]
fn test_output_offset_equals_input_offset() {
    let (mut cache, _, _) = counting_cache();
    let mut processor = RecordProcessor::new(&mut cache);

    for offset in [0u64, 7, 42, u64::MAX] {
        let record = Record {
            offset,
            text: "hello".to_string(),
        };
        let result = processor.process(&record).unwrap();
        assert_eq!(result.offset, offset);
        assert_eq!(result.annotation, "<echo>hello</echo>");
    }
}

#[test]
fn test_engine_error_propagates_as_record_failure() {
    let mut cache = EngineCache::new(PathBuf::from("/unused"), Arc::new(BrokenEngineFactory));
    let mut processor = RecordProcessor::new(&mut cache);

    let record = Record {
        offset: 13,
        text: "doc".to_string(),
    };
    let result = processor.process(&record);

    match result {
        Err(JobError::RecordProcessing { offset, reason }) => {
            assert_eq!(offset, 13);
            assert!(reason.contains("annotation pipeline crashed"));
        }
        other => panic!("expected record-processing failure, got {:?}", other),
    }
}
