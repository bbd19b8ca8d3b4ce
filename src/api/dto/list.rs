//! Envelope for collection responses.

use serde::Serialize;

/// Response containing a list of items.
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T, U: Into<T>> FromIterator<U> for ListResponse<T> {
    fn from_iter<I: IntoIterator<Item = U>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}
