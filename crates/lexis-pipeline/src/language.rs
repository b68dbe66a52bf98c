use std::collections::HashSet;
use std::sync::{Arc, RwLock};
use std::time::Instant;

use lexis_doc::{Doc, ExtensionRegistry};
use lexis_vocab::Vocab;
use tracing::debug;

use crate::component::{Component, PipePosition};
use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::stream::{ContextStream, DocStream};
use crate::tokenizer::{RuleTokenizer, Tokenizer};

// ---------------------------------------------------------------------------
// Language
// ---------------------------------------------------------------------------

/// A processing pipeline: vocabulary, extension registry, tokenizer and an
/// ordered list of named components.
///
/// Every document produced by a `Language` shares its vocabulary and its
/// extension registry. Components run in order; the first failure stops
/// processing of that document and is reported with the component's name.
pub struct Language {
    config: PipelineConfig,
    vocab: Arc<Vocab>,
    extensions: Arc<ExtensionRegistry>,
    tokenizer: Box<dyn Tokenizer>,
    pipes: Vec<Box<dyn Component>>,
    disabled: RwLock<HashSet<String>>,
}

impl Language {
    /// An empty pipeline with the default rule tokenizer and a fresh
    /// vocabulary.
    pub fn blank(lang: impl Into<String>) -> Self {
        Self {
            config: PipelineConfig::new(lang),
            vocab: Arc::new(Vocab::new()),
            extensions: Arc::new(ExtensionRegistry::new()),
            tokenizer: Box::new(RuleTokenizer::default()),
            pipes: Vec::new(),
            disabled: RwLock::new(HashSet::new()),
        }
    }

    /// An empty pipeline built from a validated configuration.
    pub fn from_config(config: PipelineConfig) -> PipelineResult<Self> {
        config.validate()?;
        let vocab = Vocab::with_config(&config.vocab)?;
        let tokenizer = RuleTokenizer::new(config.tokenizer.clone())?;
        debug!(lang = %config.lang, batch_size = config.batch_size, "created language");
        Ok(Self {
            config,
            vocab: Arc::new(vocab),
            extensions: Arc::new(ExtensionRegistry::new()),
            tokenizer: Box::new(tokenizer),
            pipes: Vec::new(),
            disabled: RwLock::new(HashSet::new()),
        })
    }

    /// Use an existing, possibly shared, vocabulary.
    pub fn with_vocab(mut self, vocab: Arc<Vocab>) -> Self {
        self.vocab = vocab;
        self
    }

    /// Use an existing, possibly shared, extension registry.
    pub fn with_extensions(mut self, extensions: Arc<ExtensionRegistry>) -> Self {
        self.extensions = extensions;
        self
    }

    /// Replace the tokenizer.
    pub fn with_tokenizer(mut self, tokenizer: impl Tokenizer + 'static) -> Self {
        self.tokenizer = Box::new(tokenizer);
        self
    }

    pub fn lang(&self) -> &str {
        &self.config.lang
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn vocab(&self) -> &Arc<Vocab> {
        &self.vocab
    }

    pub fn extensions(&self) -> &Arc<ExtensionRegistry> {
        &self.extensions
    }

    // -----------------------------------------------------------------------
    // Processing
    // -----------------------------------------------------------------------

    /// Tokenize `text` without running any component.
    pub fn make_doc(&self, text: &str) -> PipelineResult<Doc> {
        let tokens = self.tokenizer.tokenize(text);
        let doc = Doc::with_extensions(
            Arc::clone(&self.vocab),
            Arc::clone(&self.extensions),
            &tokens.words,
            &tokens.spaces,
        )?;
        Ok(doc)
    }

    /// Tokenize `text` and run every enabled component over it.
    pub fn process(&self, text: &str) -> PipelineResult<Doc> {
        let doc = self.make_doc(text)?;
        self.run_pipes(doc)
    }

    /// Run every enabled component over an existing document.
    pub fn run_pipes(&self, mut doc: Doc) -> PipelineResult<Doc> {
        let enabled: Vec<&dyn Component> = {
            let disabled = self.disabled.read().expect("lock poisoned");
            self.pipes
                .iter()
                .filter(|p| !disabled.contains(p.name()))
                .map(|p| p.as_ref())
                .collect()
        };
        for pipe in enabled {
            let start = Instant::now();
            doc = pipe
                .process(doc)
                .map_err(|e| PipelineError::component(pipe.name(), e))?;
            debug!(
                component = pipe.name(),
                tokens = doc.len(),
                elapsed_us = start.elapsed().as_micros() as u64,
                "component finished"
            );
        }
        Ok(doc)
    }

    /// Lazily process a stream of texts.
    ///
    /// Texts are pulled `batch_size` at a time; documents come out in
    /// input order, one `Result` per text.
    pub fn pipe<I>(&self, texts: I) -> DocStream<'_, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        DocStream::new(self, texts.into_iter(), self.config.batch_size)
    }

    /// Lazily process `(text, context)` pairs, passing each context through
    /// unchanged next to its document.
    pub fn pipe_with_context<I, T, C>(&self, items: I) -> ContextStream<'_, I::IntoIter, C>
    where
        I: IntoIterator<Item = (T, C)>,
        T: AsRef<str>,
    {
        ContextStream::new(self, items.into_iter(), self.config.batch_size)
    }

    // -----------------------------------------------------------------------
    // Pipeline management
    // -----------------------------------------------------------------------

    /// Insert a component.
    pub fn add_pipe(
        &mut self,
        component: impl Component + 'static,
        position: PipePosition,
    ) -> PipelineResult<()> {
        self.add_pipe_boxed(Box::new(component), position)
    }

    /// Insert an already boxed component.
    pub fn add_pipe_boxed(
        &mut self,
        component: Box<dyn Component>,
        position: PipePosition,
    ) -> PipelineResult<()> {
        let name = component.name().to_string();
        if name.is_empty() {
            return Err(PipelineError::Config(
                "component name must not be empty".to_string(),
            ));
        }
        if self.has_pipe(&name) {
            return Err(PipelineError::DuplicateComponent(name));
        }
        let index = match &position {
            PipePosition::First => 0,
            PipePosition::Last => self.pipes.len(),
            PipePosition::Before(other) => self.index_of(other)?,
            PipePosition::After(other) => self.index_of(other)? + 1,
        };
        self.pipes.insert(index, component);
        debug!(component = %name, index, "added component");
        Ok(())
    }

    /// Remove a component and hand it back.
    pub fn remove_pipe(&mut self, name: &str) -> PipelineResult<Box<dyn Component>> {
        let index = self.index_of(name)?;
        self.disabled
            .get_mut()
            .expect("lock poisoned")
            .remove(name);
        debug!(component = name, "removed component");
        Ok(self.pipes.remove(index))
    }

    /// Replace the component of the same name, keeping its position.
    pub fn replace_pipe(
        &mut self,
        component: impl Component + 'static,
    ) -> PipelineResult<Box<dyn Component>> {
        let index = self.index_of(component.name())?;
        Ok(std::mem::replace(&mut self.pipes[index], Box::new(component)))
    }

    pub fn get_pipe(&self, name: &str) -> Option<&dyn Component> {
        self.pipes
            .iter()
            .find(|p| p.name() == name)
            .map(|p| p.as_ref())
    }

    /// Returns `true` if a component of this name exists, enabled or not.
    pub fn has_pipe(&self, name: &str) -> bool {
        self.pipes.iter().any(|p| p.name() == name)
    }

    /// Names of the enabled components, in order.
    pub fn pipe_names(&self) -> Vec<&str> {
        let disabled = self.disabled.read().expect("lock poisoned");
        self.pipes
            .iter()
            .map(|p| p.name())
            .filter(|name| !disabled.contains(*name))
            .collect()
    }

    /// Names of all components, enabled or not, in order.
    pub fn component_names(&self) -> Vec<&str> {
        self.pipes.iter().map(|p| p.name()).collect()
    }

    /// Names of the disabled components, sorted.
    pub fn disabled_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .disabled
            .read()
            .expect("lock poisoned")
            .iter()
            .cloned()
            .collect();
        names.sort();
        names
    }

    /// Disable a component until [`enable_pipe`](Self::enable_pipe).
    pub fn disable_pipe(&self, name: &str) -> PipelineResult<()> {
        self.index_of(name)?;
        self.disabled
            .write()
            .expect("lock poisoned")
            .insert(name.to_string());
        Ok(())
    }

    pub fn enable_pipe(&self, name: &str) -> PipelineResult<()> {
        self.index_of(name)?;
        self.disabled.write().expect("lock poisoned").remove(name);
        Ok(())
    }

    /// Disable the named components until the returned guard is dropped.
    ///
    /// Components that were already disabled stay disabled afterwards.
    pub fn select_pipes(&self, disable: &[&str]) -> PipelineResult<DisabledPipes<'_>> {
        for name in disable {
            self.index_of(name)?;
        }
        let mut set = self.disabled.write().expect("lock poisoned");
        let names: Vec<String> = disable
            .iter()
            .filter(|name| set.insert(name.to_string()))
            .map(|name| name.to_string())
            .collect();
        debug!(?names, "disabled components");
        Ok(DisabledPipes { lang: self, names })
    }

    /// Disable every component not named in `enable` until the returned
    /// guard is dropped.
    pub fn select_only(&self, enable: &[&str]) -> PipelineResult<DisabledPipes<'_>> {
        for name in enable {
            self.index_of(name)?;
        }
        let others: Vec<&str> = self
            .pipes
            .iter()
            .map(|p| p.name())
            .filter(|name| !enable.contains(name))
            .collect();
        self.select_pipes(&others)
    }

    fn index_of(&self, name: &str) -> PipelineResult<usize> {
        self.pipes
            .iter()
            .position(|p| p.name() == name)
            .ok_or_else(|| PipelineError::UnknownComponent(name.to_string()))
    }
}

impl std::fmt::Debug for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Language")
            .field("lang", &self.config.lang)
            .field("pipes", &self.component_names())
            .field("disabled", &self.disabled_names())
            .field("vocab", &self.vocab)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// DisabledPipes
// ---------------------------------------------------------------------------

/// Guard returned by [`Language::select_pipes`]; re-enables the components
/// it disabled when dropped.
#[must_use = "the components are re-enabled as soon as the guard is dropped"]
pub struct DisabledPipes<'a> {
    lang: &'a Language,
    names: Vec<String>,
}

impl DisabledPipes<'_> {
    /// The components this guard disabled.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Re-enable the components now.
    pub fn restore(self) {}
}

impl Drop for DisabledPipes<'_> {
    fn drop(&mut self) {
        let mut set = self.lang.disabled.write().expect("lock poisoned");
        for name in &self.names {
            set.remove(name);
        }
        debug!(names = ?self.names, "re-enabled components");
    }
}
