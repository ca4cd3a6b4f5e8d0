//! Tagged result for catalog reads.
//!
//! Catalog failures are never raised to the page. Callers that only care
//! about "data or nothing" collapse a [`Lookup`] with [`Lookup::into_option`]
//! or [`Lookup::unwrap_or_default`]; callers that want to render a 404
//! differently from an outage can match on it.

/// Outcome of a catalog read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    /// The service returned data.
    Found(T),
    /// The service answered, but the resource does not exist.
    NotFound,
    /// Transport or service failure; the detail is for logs only.
    Transient(String),
}

impl<T> Lookup<T> {
    /// Collapse to the data, discarding why it is missing.
    #[must_use]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::NotFound | Self::Transient(_) => None,
        }
    }

    /// Transform the found value.
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Self::Found(value) => Lookup::Found(f(value)),
            Self::NotFound => Lookup::NotFound,
            Self::Transient(detail) => Lookup::Transient(detail),
        }
    }
}

impl<T: Default> Lookup<T> {
    /// The found value, or the empty value for any failure.
    #[must_use]
    pub fn unwrap_or_default(self) -> T {
        self.into_option().unwrap_or_default()
    }
}
