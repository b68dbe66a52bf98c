//! Lazy document streams.
//!
//! Both streams pull at most `batch_size` inputs from their source per
//! refill and process them in order. Nothing is read from the source until
//! the first document is requested, and a failing text yields an `Err` in
//! its position without ending the stream.

use std::collections::VecDeque;

use lexis_doc::Doc;
use tracing::debug;

use crate::error::PipelineResult;
use crate::language::Language;

/// Stream of documents returned by [`Language::pipe`].
pub struct DocStream<'a, I> {
    lang: &'a Language,
    texts: I,
    batch_size: usize,
    buffer: VecDeque<PipelineResult<Doc>>,
}

impl<'a, I> DocStream<'a, I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    pub(crate) fn new(lang: &'a Language, texts: I, batch_size: usize) -> Self {
        Self {
            lang,
            texts,
            batch_size: batch_size.max(1),
            buffer: VecDeque::new(),
        }
    }

    /// Override the number of texts pulled per refill.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    fn refill(&mut self) {
        let batch: Vec<I::Item> = self.texts.by_ref().take(self.batch_size).collect();
        if batch.is_empty() {
            return;
        }
        debug!(texts = batch.len(), "processing batch");
        for text in batch {
            self.buffer.push_back(self.lang.process(text.as_ref()));
        }
    }
}

impl<I> Iterator for DocStream<'_, I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = PipelineResult<Doc>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.buffer.is_empty() {
            self.refill();
        }
        self.buffer.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.texts.size_hint();
        let buffered = self.buffer.len();
        (
            lower.saturating_add(buffered),
            upper.and_then(|u| u.checked_add(buffered)),
        )
    }
}

/// Stream of `(document, context)` pairs returned by
/// [`Language::pipe_with_context`].
pub struct ContextStream<'a, I, C> {
    lang: &'a Language,
    items: I,
    batch_size: usize,
    buffer: VecDeque<(PipelineResult<Doc>, C)>,
}

impl<'a, I, T, C> ContextStream<'a, I, C>
where
    I: Iterator<Item = (T, C)>,
    T: AsRef<str>,
{
    pub(crate) fn new(lang: &'a Language, items: I, batch_size: usize) -> Self {
        Self {
            lang,
            items,
            batch_size: batch_size.max(1),
            buffer: VecDeque::new(),
        }
    }

    /// Override the number of items pulled per refill.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    fn refill(&mut self) {
        let batch: Vec<(T, C)> = self.items.by_ref().take(self.batch_size).collect();
        if batch.is_empty() {
            return;
        }
        debug!(texts = batch.len(), "processing batch with context");
        for (text, context) in batch {
            self.buffer
                .push_back((self.lang.process(text.as_ref()), context));
        }
    }
}

impl<I, T, C> Iterator for ContextStream<'_, I, C>
where
    I: Iterator<Item = (T, C)>,
    T: AsRef<str>,
{
    type Item = PipelineResult<(Doc, C)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.buffer.is_empty() {
            self.refill();
        }
        self.buffer
            .pop_front()
            .map(|(doc, context)| doc.map(|doc| (doc, context)))
    }
}
