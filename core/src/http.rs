//! Query-string construction for API requests.
//!
//! # Design
//! `Query` is an ordered list of key/value pairs built with a fluent API.
//! Pairs keep insertion order, so the rendered query string is deterministic
//! for a fixed sequence of calls. Values are coerced to their `Display` form
//! before encoding; absent (`None`) values are omitted entirely rather than
//! serialized as a literal placeholder.

use url::Url;

use crate::error::ApiError;

/// Ordered query-parameter list.
///
/// Built fluently and rendered onto a URL by [`build_url`]. Percent-encoding
/// is handled by the `url` crate at render time, not at insertion time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter, coercing the value to its string form.
    pub fn set(mut self, key: &str, value: impl ToString) -> Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    /// Append a parameter only when the value is present.
    pub fn set_opt(self, key: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.set(key, value),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }
}

/// Join `path` against `base` and append `query` pairs in insertion order.
pub(crate) fn build_url(base: &Url, path: &str, query: Option<&Query>) -> Result<Url, ApiError> {
    let mut url = base
        .join(path.trim_start_matches('/'))
        .map_err(|e| ApiError::InvalidBaseUrl(format!("{e} for path {path}")))?;
    if let Some(query) = query {
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.pairs());
        }
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://localhost:8000/").unwrap()
    }

    #[test]
    fn absent_values_are_omitted() {
        let query = Query::new().set_opt("page", Some(2)).set_opt("size", None::<u32>);
        let url = build_url(&base(), "/accounts", Some(&query)).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/accounts?page=2");
    }

    #[test]
    fn values_are_coerced_to_string_form() {
        let query = Query::new().set("year", 2025).set("month", 6).set("sort", "date");
        let url = build_url(&base(), "/budgets/status", Some(&query)).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/budgets/status?year=2025&month=6&sort=date"
        );
    }

    #[test]
    fn insertion_order_is_preserved() {
        let query = Query::new().set("b", 1).set("a", 2);
        let url = build_url(&base(), "/expenses", Some(&query)).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/expenses?b=1&a=2");
    }

    #[test]
    fn empty_query_leaves_url_bare() {
        let url = build_url(&base(), "/tags", Some(&Query::new())).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/tags");
        let url = build_url(&base(), "/tags", None).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/tags");
    }

    #[test]
    fn values_are_percent_encoded() {
        let query = Query::new().set("sort", "created at");
        let url = build_url(&base(), "/categories", Some(&query)).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/categories?sort=created+at"
        );
    }

    #[test]
    fn base_with_path_prefix_is_respected() {
        let base = Url::parse("http://localhost:8000/api/v1/").unwrap();
        let url = build_url(&base, "/accounts", None).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/v1/accounts");
    }
}
