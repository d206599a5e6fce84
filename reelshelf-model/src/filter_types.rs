//! Filter state that identifies one logical result set.

use std::fmt;

use crate::media_type::MediaKind;

/// The tuple of active search and filter parameters.
///
/// Two signatures are the same result set exactly when every field matches.
/// `None`/empty means "no filter" and is omitted from the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct QuerySignature {
    pub search_text: String,
    pub type_filter: Option<MediaKind>,
    pub year_filter: Option<i32>,
    pub director_filter: Option<String>,
}

impl QuerySignature {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn with_type(mut self, kind: Option<MediaKind>) -> Self {
        self.type_filter = kind;
        self
    }

    pub fn with_year(mut self, year: Option<i32>) -> Self {
        self.year_filter = year;
        self
    }

    pub fn with_director(mut self, director: Option<String>) -> Self {
        self.director_filter = director.filter(|d| !d.trim().is_empty());
        self
    }

    /// True when no filter narrows the result set.
    pub fn is_unfiltered(&self) -> bool {
        self.search_text.is_empty()
            && self.type_filter.is_none()
            && self.year_filter.is_none()
            && self.director_filter.is_none()
    }

    /// Query string pairs for the listing endpoint, without paging.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(4);
        if !self.search_text.is_empty() {
            pairs.push(("search", self.search_text.clone()));
        }
        if let Some(kind) = self.type_filter {
            pairs.push(("type", kind.api_name().to_string()));
        }
        if let Some(year) = self.year_filter {
            pairs.push(("releaseYear", year.to_string()));
        }
        if let Some(director) = &self.director_filter {
            pairs.push(("director", director.clone()));
        }
        pairs
    }
}

impl fmt::Display for QuerySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "search={:?} type={} year={} director={}",
            self.search_text,
            self.type_filter.map(|k| k.api_name()).unwrap_or("*"),
            self.year_filter
                .map(|y| y.to_string())
                .unwrap_or_else(|| "*".to_string()),
            self.director_filter.as_deref().unwrap_or("*"),
        )
    }
}
