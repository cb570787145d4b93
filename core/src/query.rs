//! Query-string and form-body encoding.
//!
//! Backlog reads list parameters as repeated `key[]` pairs, and the wire
//! format sends zero-valued scalars rather than omitting them. `QueryParams`
//! keeps pairs in insertion order; `EncodeQuery` is implemented by every
//! query-options and payload type.

use url::form_urlencoded;

/// An ordered list of key/value pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        self.pairs.push((key.to_string(), value.into()));
        self
    }

    /// Always emitted, even when empty (`key=`).
    pub fn push_str(&mut self, key: &str, value: &str) -> &mut Self {
        self.push(key, value)
    }

    /// Emitted only when set. Used by partial-update payloads.
    pub fn push_opt_str(&mut self, key: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    pub fn push_int(&mut self, key: &str, value: i64) -> &mut Self {
        self.push(key, value.to_string())
    }

    /// One `key[]=value` pair per element; nothing for an empty slice.
    pub fn push_ints(&mut self, key: &str, values: &[i64]) -> &mut Self {
        let key = format!("{key}[]");
        for value in values {
            self.push(&key, value.to_string());
        }
        self
    }

    pub fn push_bool(&mut self, key: &str, value: bool) -> &mut Self {
        self.push(key, if value { "true" } else { "false" })
    }

    pub fn extend(&mut self, other: QueryParams) -> &mut Self {
        self.pairs.extend(other.pairs);
        self
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Every value stored under `key`, in insertion order.
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Percent-encode as `application/x-www-form-urlencoded`.
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.pairs)
            .finish()
    }
}

/// Conversion of an options or payload value into flat key/value pairs.
pub trait EncodeQuery {
    fn encode_query(&self, params: &mut QueryParams);

    fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        self.encode_query(&mut params);
        params
    }
}

/// No options beyond `apiKey`.
impl EncodeQuery for () {
    fn encode_query(&self, _params: &mut QueryParams) {}
}

/// Ad-hoc options built by hand are appended as-is.
impl EncodeQuery for QueryParams {
    fn encode_query(&self, params: &mut QueryParams) {
        params.pairs.extend(self.pairs.iter().cloned());
    }
}

impl<T: EncodeQuery + ?Sized> EncodeQuery for &T {
    fn encode_query(&self, params: &mut QueryParams) {
        (**self).encode_query(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_emits_one_pair_per_element() {
        for n in 0..5 {
            let values: Vec<i64> = (1..=n).collect();
            let mut params = QueryParams::new();
            params.push_ints("statusId", &values);
            assert_eq!(params.get_all("statusId[]").len(), n as usize);
            assert_eq!(params.len(), n as usize);
        }
    }

    #[test]
    fn bool_is_always_emitted() {
        let mut params = QueryParams::new();
        params.push_bool("attachment", false).push_bool("sharedFile", true);
        assert_eq!(params.get_all("attachment"), vec!["false"]);
        assert_eq!(params.get_all("sharedFile"), vec!["true"]);
    }

    #[test]
    fn empty_string_and_zero_are_still_emitted() {
        let mut params = QueryParams::new();
        params.push_str("sort", "").push_int("count", 0);
        assert_eq!(params.encode(), "sort=&count=0");
    }

    #[test]
    fn optional_string_is_skipped_when_unset() {
        let mut params = QueryParams::new();
        params.push_opt_str("name", None).push_opt_str("content", Some(""));
        assert_eq!(params.encode(), "content=");
    }

    #[test]
    fn encode_escapes_brackets_and_reserved_characters() {
        let mut params = QueryParams::new();
        params
            .push("apiKey", "a/b+c")
            .push_ints("projectId", &[10])
            .push_str("keyword", "fix bug&go");
        assert_eq!(
            params.encode(),
            "apiKey=a%2Fb%2Bc&projectId%5B%5D=10&keyword=fix+bug%26go"
        );
    }

    #[test]
    fn negative_integers_use_base_ten() {
        let mut params = QueryParams::new();
        params.push_int("minId", -1);
        assert_eq!(params.get_all("minId"), vec!["-1"]);
    }

    #[test]
    fn params_encode_as_themselves_after_existing_pairs() {
        let mut extra = QueryParams::new();
        extra.push_ints("projectId", &[1, 2]).push_str("keyword", "");

        let mut params = QueryParams::new();
        params.push("apiKey", "KEY");
        extra.encode_query(&mut params);
        assert_eq!(
            params.encode(),
            "apiKey=KEY&projectId%5B%5D=1&projectId%5B%5D=2&keyword="
        );
        assert_eq!(extra.to_params(), extra);
    }

    #[test]
    fn unit_encodes_nothing() {
        assert!(().to_params().is_empty());
    }
}
