use serde::Serialize;
use std::fmt::Display;
use url::form_urlencoded;

/// An insertion-ordered set of query parameters.
///
/// Inserting an existing key replaces its value in place, so the encoded
/// order stays stable.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Display) {
        let key = key.into();
        let value = value.to_string();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    /// Inserts the value only when one is present.
    pub fn insert_opt(&mut self, key: impl Into<String>, value: Option<impl Display>) {
        if let Some(value) = value {
            self.insert(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serializes as `k1=v1&k2=v2` with form-style percent-encoding.
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_encodes_to_empty_string() {
        assert_eq!(Params::new().encode(), "");
    }

    #[test]
    fn test_encode_preserves_insertion_order() {
        let params: Params = [("b", "2"), ("a", "1")].into_iter().collect();
        assert_eq!(params.encode(), "b=2&a=1");
    }

    #[test]
    fn test_encode_escapes_keys_and_values() {
        let params: Params = [("a", "1"), ("b", "x y"), ("c&d", "é=?")].into_iter().collect();
        assert_eq!(params.encode(), "a=1&b=x+y&c%26d=%C3%A9%3D%3F");
    }

    #[test]
    fn test_encode_decodes_back_to_original() {
        let params: Params = [("a", "1"), ("b", "x y")].into_iter().collect();
        let decoded: Vec<(String, String)> = form_urlencoded::parse(params.encode().as_bytes())
            .into_owned()
            .collect();
        assert_eq!(
            decoded,
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "x y".to_string())
            ]
        );
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut params = Params::new();
        params.insert("transactionId", "old");
        params.insert("operation", "AUTH");
        params.insert("transactionId", "new");
        assert_eq!(params.len(), 2);
        assert_eq!(params.encode(), "transactionId=new&operation=AUTH");
    }

    #[test]
    fn test_insert_opt_skips_none() {
        let mut params = Params::new();
        params.insert_opt("orderDescription", None::<&str>);
        params.insert_opt("language", Some("nb_NO"));
        assert_eq!(params.get("orderDescription"), None);
        assert_eq!(params.get("language"), Some("nb_NO"));
    }
}
