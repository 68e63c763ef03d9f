//! Ordered multi-valued query parameters.

use indexmap::IndexMap;
use indexmap::map::Iter;

/// Decoded query parameters of a DSN.
///
/// Keys keep the order of their first appearance and every key maps to all
/// of its values in the order they were written.
///
/// ```rust
/// use dsnkit::Dsn;
///
/// let dsn = Dsn::parse("tcp://localhost?tag=a&timeout=3&tag=b").unwrap();
/// let query = dsn.query();
/// assert_eq!(query.get("timeout"), Some("3"));
/// assert_eq!(query.get_all("tag"), Some(&["a".to_string(), "b".to_string()][..]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: IndexMap<String, Vec<String>>,
}

impl Query {
    /// Create an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode an `application/x-www-form-urlencoded` query string.
    pub fn parse(input: &str) -> Self {
        url::form_urlencoded::parse(input.as_bytes())
            .into_owned()
            .collect()
    }

    /// Append a value for `key`.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.entry(key.into()).or_default().push(value.into());
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values for `key`, in order.
    pub fn get_all(&self, key: &str) -> Option<&[String]> {
        self.params.get(key).map(Vec::as_slice)
    }

    /// Check whether `key` appears at all.
    pub fn contains_key(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check whether there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterate over keys and their values.
    pub fn iter(&self) -> Iter<'_, String, Vec<String>> {
        self.params.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for Query
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = Self::new();
        for (key, value) in iter {
            query.append(key, value);
        }
        query
    }
}

impl<'a> IntoIterator for &'a Query {
    type Item = (&'a String, &'a Vec<String>);
    type IntoIter = Iter<'a, String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_repeated_keys() {
        let query = Query::parse("tag=a&timeout=3&tag=b");
        assert_eq!(query.len(), 2);
        assert_eq!(query.get("tag"), Some("a"));
        assert_eq!(
            query.get_all("tag").unwrap(),
            &["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn test_keys_keep_first_appearance_order() {
        let query = Query::parse("b=1&a=2&b=3&c=4");
        let keys: Vec<_> = query.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_parse_decodes_values() {
        let query = Query::parse("name=hello+world&path=%2Fvar%2Frun&empty=");
        assert_eq!(query.get("name"), Some("hello world"));
        assert_eq!(query.get("path"), Some("/var/run"));
        assert_eq!(query.get("empty"), Some(""));
    }

    #[test]
    fn test_missing_key() {
        let query = Query::parse("a=1");
        assert_eq!(query.get("b"), None);
        assert_eq!(query.get_all("b"), None);
        assert!(!query.contains_key("b"));
    }

    #[test]
    fn test_empty_query() {
        let query = Query::parse("");
        assert!(query.is_empty());
        assert_eq!(query, Query::new());
    }

    #[test]
    fn test_from_iterator() {
        let query: Query = [("tag", "a"), ("tag", "b")].into_iter().collect();
        assert_eq!(query.get_all("tag").map(<[String]>::len), Some(2));
    }
}
