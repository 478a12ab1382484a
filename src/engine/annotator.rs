//! Annotator Contract and Bundle-Backed Engine
//!
//! `Annotator` is the whole contract the rest of the system has with the
//! annotation toolkit: raw text in, opaque serialized annotation document
//! out. `EngineFactory` is the construction seam the per-worker cache calls
//! through, which is also where tests substitute counting or failing
//! engines.

use super::bundle::BundleDescriptor;
use crate::error::{JobError, JobResult};
use regex::Regex;
use std::path::Path;

/// A stateful, single-threaded annotation engine.
///
/// Implementations are expensive to construct and cheap to invoke; callers
/// must not share one instance across threads or feed it more than one
/// document at a time.
pub trait Annotator: Send {
    /// Annotates one document's raw text, returning an opaque serialized
    /// annotation blob.
    fn annotate(&mut self, text: &str) -> JobResult<String>;

    /// Releases engine-held resources. Called once, by the owning cache,
    /// when the worker retires.
    fn shutdown(&mut self) {}
}

/// Builds an engine instance from a locally materialized bundle directory.
pub trait EngineFactory: Send + Sync {
    fn build(&self, bundle_dir: &Path) -> JobResult<Box<dyn Annotator>>;
}

/// The default factory: loads the bundle descriptor and compiles its rules.
pub struct BundleEngineFactory;

impl EngineFactory for BundleEngineFactory {
    fn build(&self, bundle_dir: &Path) -> JobResult<Box<dyn Annotator>> {
        Ok(Box::new(BundleEngine::load(bundle_dir)?))
    }
}

/// The descriptor-configured engine shipped with this crate.
///
/// Construction compiles every annotator rule up front, so all descriptor
/// problems surface as initialization failures rather than per-record ones.
#[derive(Debug)]
pub struct BundleEngine {
    name: String,
    rules: Vec<(String, Regex)>,
}

impl BundleEngine {
    pub fn load(bundle_dir: &Path) -> JobResult<Self> {
        let descriptor = BundleDescriptor::load(bundle_dir)?;

        let mut rules = Vec::with_capacity(descriptor.annotators.len());
        for spec in &descriptor.annotators {
            let regex = Regex::new(&spec.pattern).map_err(|e| {
                JobError::engine_init(format!(
                    "annotator '{}' has an invalid pattern: {}",
                    spec.label, e
                ))
            })?;
            rules.push((spec.label.clone(), regex));
        }

        tracing::info!(
            "Initialized engine '{}' with {} annotator rules",
            descriptor.name,
            rules.len()
        );

        Ok(Self {
            name: descriptor.name,
            rules,
        })
    }
}

impl Annotator for BundleEngine {
    fn annotate(&mut self, text: &str) -> JobResult<String> {
        // One transient document per call; dropped before returning.
        let document = Document::new(text);
        Ok(document.to_xml(&self.name, &self.rules))
    }

    fn shutdown(&mut self) {
        tracing::debug!("Shutting down engine '{}'", self.name);
        self.rules.clear();
    }
}

/// Transient per-record document view. Exactly one exists at a time within a
/// worker, matching the engine's single-document assumption.
struct Document<'a> {
    text: &'a str,
}

impl<'a> Document<'a> {
    fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Serializes the document and its rule matches as an XML blob. The
    /// format is opaque to every other module.
    fn to_xml(&self, engine_name: &str, rules: &[(String, Regex)]) -> String {
        let mut xml = String::with_capacity(self.text.len() + 128);
        xml.push_str(&format!(
            "<annotated-document engine=\"{}\">",
            escape_xml(engine_name)
        ));
        xml.push_str(&format!("<text>{}</text>", escape_xml(self.text)));
        for (label, regex) in rules {
            for found in regex.find_iter(self.text) {
                xml.push_str(&format!(
                    "<annotation type=\"{}\" start=\"{}\" end=\"{}\"/>",
                    escape_xml(label),
                    found.start(),
                    found.end()
                ));
            }
        }
        xml.push_str("</annotated-document>");
        xml
    }
}

fn escape_xml(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
