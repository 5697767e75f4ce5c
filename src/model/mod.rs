//! Domain model: content identity, payload, filters, errors and user intents.

pub mod content;
pub mod error;
pub mod identifiers;
pub mod key_action;

pub use content::{ContentItem, Filter};
pub use error::{AppError, CatalogError, GridError, ProviderError};
pub use identifiers::{ContentId, InvalidContentId};
pub use key_action::KeyAction;
