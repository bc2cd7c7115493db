//! Measurement execution context.
//!
//! A [`Measurer`] owns a [`Model`], a [`Registry`] and a small LRU cache
//! of documents built from raw text. Measuring the same text repeatedly,
//! with one measurement or many, tokenizes it once.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::args::Arguments;
use crate::config::Config;
use crate::document::{Document, DocumentRef, TextInput};
use crate::error::MeasureResult;
use crate::nlp::{DEFAULT_MODEL, Model};
use crate::registry::Registry;
use crate::value::Value;

/// Documents kept by a [`Measurer`] unless configured otherwise.
pub const DEFAULT_CACHE_CAPACITY: usize = 10;

/// Runs registered measurements against raw text or documents.
#[derive(Debug)]
pub struct Measurer {
    model: Arc<Model>,
    registry: Registry,
    documents: RefCell<DocumentCache>,
}

impl Measurer {
    /// A measurer over the default model and every built-in measurement.
    pub fn new() -> MeasureResult<Self> {
        Ok(Self::with_model(Model::load(DEFAULT_MODEL)?))
    }

    /// A measurer over the model named in `config`, with its cache size.
    pub fn from_config(config: &Config) -> MeasureResult<Self> {
        let measurer = Self::with_model(Model::load(&config.model)?);
        Ok(match config.cache_capacity {
            Some(capacity) => measurer.with_cache_capacity(capacity),
            None => measurer,
        })
    }

    /// A measurer over an already loaded model.
    pub fn with_model(model: Model) -> Self {
        Self {
            model: Arc::new(model),
            registry: Registry::builtin(),
            documents: RefCell::new(DocumentCache::new(DEFAULT_CACHE_CAPACITY)),
        }
    }

    /// Replace the registry.
    #[must_use]
    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    /// Change how many documents are cached. Zero disables caching.
    #[must_use]
    pub fn with_cache_capacity(self, capacity: usize) -> Self {
        Self {
            documents: RefCell::new(DocumentCache::new(capacity)),
            ..self
        }
    }

    /// The model raw text is parsed with.
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// The measurements this measurer can run.
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Number of cached documents.
    pub fn cached_documents(&self) -> usize {
        self.documents.borrow().len()
    }

    /// Resolve an input to a document.
    ///
    /// Documents pass through untouched. Raw text is looked up in the
    /// cache, and wrapped with this measurer's model on a miss.
    pub fn document<'a>(&self, input: impl Into<TextInput<'a>>) -> DocumentRef<'a> {
        match input.into() {
            TextInput::Document(document) => DocumentRef::Borrowed(document),
            TextInput::Raw(text) => {
                let mut cache = self.documents.borrow_mut();
                let key = (self.model.name().to_string(), text.into_owned());
                if let Some(document) = cache.get(&key) {
                    tracing::trace!(text_len = key.1.len(), "document cache hit");
                    return DocumentRef::Shared(document);
                }
                let document = Rc::new(Document::with_model(key.1.clone(), Arc::clone(&self.model)));
                cache.insert(key, Rc::clone(&document));
                DocumentRef::Shared(document)
            }
        }
    }

    /// Run the measurement registered as `name`.
    ///
    /// The text comes from `args` (a named `text` argument, or the first
    /// positional one); the rest bind to the measurement's parameters.
    #[tracing::instrument(skip(self, args))]
    pub fn measure(&self, name: &str, args: Arguments<'_>) -> MeasureResult<Value> {
        let measurement = self.registry.get(name)?;
        let (input, rest) = args.resolve()?;
        let params = measurement.bind(rest)?;
        let document = self.document(input);
        measurement.call(&document, &params)
    }

    /// Run `name` on `input` with default parameters.
    pub fn measure_text<'a>(&self, name: &str, input: impl Into<TextInput<'a>>) -> MeasureResult<Value> {
        self.measure(name, Arguments::with_text(input))
    }

    /// Run every registered measurement on `input` with default parameters.
    ///
    /// Each result is reported separately, so one degenerate measurement
    /// does not hide the others.
    #[tracing::instrument(skip_all)]
    pub fn measure_all<'a>(
        &self,
        input: impl Into<TextInput<'a>>,
    ) -> Vec<(&'static str, MeasureResult<Value>)> {
        let document = self.document(input);
        self.registry
            .iter()
            .map(|measurement| {
                let result = measurement
                    .bind(Arguments::new())
                    .and_then(|params| measurement.call(&document, &params));
                (measurement.name, result)
            })
            .collect()
    }
}

/// Documents keyed by model name and text. `None` when caching is off.
struct DocumentCache {
    capacity: usize,
    lru: Option<hashlru::Cache<(String, String), Rc<Document>>>,
}

impl DocumentCache {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            lru: (capacity > 0).then(|| hashlru::Cache::new(capacity)),
        }
    }

    fn len(&self) -> usize {
        self.lru.as_ref().map_or(0, hashlru::Cache::len)
    }

    fn get(&mut self, key: &(String, String)) -> Option<Rc<Document>> {
        self.lru.as_mut()?.get(key).map(Rc::clone)
    }

    fn insert(&mut self, key: (String, String), document: Rc<Document>) {
        if let Some(lru) = self.lru.as_mut() {
            lru.insert(key, document);
        }
    }
}

impl fmt::Debug for DocumentCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentCache")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .finish()
    }
}
