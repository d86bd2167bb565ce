//! Read-only access to the appointment form.
//!
//! The extractor never touches a DOM directly. It asks a [`FieldLocator`]
//! for the first match of a selector or for every match, which keeps it
//! testable against HTML snapshots and JSON fixtures alike.

mod fixture;
mod html;

pub use fixture::FixtureFragment;
pub use html::{HtmlDocument, HtmlFragment};

use crate::error::SyncResult;

/// Query capability over one scope of the form.
pub trait FieldLocator: Sized {
    /// Text of the first element matching `selector`, if any.
    fn find_one(&self, selector: &str) -> SyncResult<Option<String>>;

    /// Every element matching `selector`, in document order, each usable as
    /// a narrower scope.
    fn find_all(&self, selector: &str) -> SyncResult<Vec<Self>>;
}
