//! Content providers.
//!
//! The grid engine never fetches anything itself. A [`ContentProvider`]
//! answers the [`LoadRequest`]s the engine hands out:
//! - [`CatalogProvider`]: in-memory catalog loaded from JSONL or generated
//! - [`ProviderWorker`]: runs any provider on a background thread

use crate::grid::LoadRequest;
use crate::model::{ContentId, ContentItem, Filter, ProviderError};

pub mod catalog;
pub mod worker;

pub use catalog::{Catalog, CatalogProvider};
pub use worker::{Completion, ProviderWorker};

/// Source of discovery batches.
///
/// # Contract
///
/// - never returns an id contained in `exclude_ids`
/// - an empty `Ok` batch means no more content exists for `filter`
pub trait ContentProvider {
    /// Fetch up to `batch_size` items matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the backing source is unavailable.
    fn fetch_batch(
        &mut self,
        exclude_ids: &[ContentId],
        batch_size: usize,
        filter: &Filter,
    ) -> Result<Vec<ContentItem>, ProviderError>;
}

impl<P: ContentProvider + ?Sized> ContentProvider for Box<P> {
    fn fetch_batch(
        &mut self,
        exclude_ids: &[ContentId],
        batch_size: usize,
        filter: &Filter,
    ) -> Result<Vec<ContentItem>, ProviderError> {
        (**self).fetch_batch(exclude_ids, batch_size, filter)
    }
}

/// Execute a load request synchronously.
pub fn execute<P: ContentProvider + ?Sized>(
    provider: &mut P,
    request: &LoadRequest,
) -> Result<Vec<ContentItem>, ProviderError> {
    provider.fetch_batch(&request.exclude_ids, request.batch_size, &request.filter)
}
