use serde_json::{Map, Number, Value};
use std::fmt;
use url::form_urlencoded;

#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    /// Byte values travel as text, so they must be valid UTF-8.
    pub fn from_utf8(bytes: &[u8]) -> std::result::Result<Self, std::str::Utf8Error> {
        Ok(Self::Text(std::str::from_utf8(bytes)?.to_string()))
    }

    fn to_json(&self) -> Value {
        match self {
            Scalar::Text(s) => Value::String(s.clone()),
            Scalar::Integer(i) => Value::from(*i),
            Scalar::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
            Scalar::Bool(b) => Value::Bool(*b),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => f.write_str(s),
            Scalar::Integer(i) => write!(f, "{i}"),
            Scalar::Float(x) => write!(f, "{x}"),
            Scalar::Bool(b) => write!(f, "{b}"),
        }
    }
}

macro_rules! scalar_from {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$t> for Scalar {
                fn from(v: $t) -> Self {
                    Scalar::$variant(v.into())
                }
            }

            impl From<$t> for QueryValue {
                fn from(v: $t) -> Self {
                    QueryValue::One(v.into())
                }
            }
        )*
    };
}

scalar_from! {
    String => Text,
    &str => Text,
    i64 => Integer,
    i32 => Integer,
    u32 => Integer,
    u16 => Integer,
    f64 => Float,
    bool => Bool,
}

impl From<&String> for Scalar {
    fn from(v: &String) -> Self {
        Scalar::Text(v.clone())
    }
}

impl From<&String> for QueryValue {
    fn from(v: &String) -> Self {
        QueryValue::One(v.into())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    One(Scalar),
    Many(Vec<Scalar>),
    Absent,
}

impl From<Scalar> for QueryValue {
    fn from(v: Scalar) -> Self {
        QueryValue::One(v)
    }
}

impl<T: Into<Scalar>> From<Vec<T>> for QueryValue {
    fn from(v: Vec<T>) -> Self {
        QueryValue::Many(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Scalar> + Clone> From<&[T]> for QueryValue {
    fn from(v: &[T]) -> Self {
        QueryValue::Many(v.iter().cloned().map(Into::into).collect())
    }
}

impl<T: Into<QueryValue>> From<Option<T>> for QueryValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(QueryValue::Absent, Into::into)
    }
}

/// Ordered parameter mapping. Keys are not validated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams(Vec<(String, QueryValue)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, replacing any previous value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|(_, v)| match v {
            QueryValue::Absent => true,
            QueryValue::Many(values) => values.is_empty(),
            QueryValue::One(_) => false,
        })
    }

    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.0 {
            match value {
                QueryValue::One(v) => {
                    serializer.append_pair(key, &v.to_string());
                }
                QueryValue::Many(values) => {
                    for v in values {
                        serializer.append_pair(key, &v.to_string());
                    }
                }
                QueryValue::Absent => {}
            }
        }
        serializer.finish()
    }

    /// `url` followed by `?` and the encoded query, or `url` alone when there is
    /// nothing to encode.
    pub fn append_to(&self, url: &str) -> String {
        let query = self.encode();
        if query.is_empty() {
            url.to_string()
        } else {
            format!("{url}?{query}")
        }
    }

    pub(crate) fn to_json_body(&self) -> Value {
        let mut body = Map::new();
        for (key, value) in &self.0 {
            let value = match value {
                QueryValue::One(v) => v.to_json(),
                QueryValue::Many(values) if !values.is_empty() => {
                    values.iter().map(Scalar::to_json).collect()
                }
                QueryValue::Many(_) | QueryValue::Absent => continue,
            };
            body.insert(key.clone(), value);
        }
        Value::Object(body)
    }
}

impl<K: Into<String>, V: Into<QueryValue>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

pub trait ToQueryParams {
    fn to_query_params(&self) -> QueryParams;
}

impl ToQueryParams for QueryParams {
    fn to_query_params(&self) -> QueryParams {
        self.clone()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_values_repeat_the_key() {
        let params = QueryParams::new().with("k", vec!["a", "b"]);
        assert_eq!(params.encode(), "k=a&k=b");
        assert!(!params.encode().contains("a,b"));
    }

    #[test]
    fn test_absent_values_are_dropped() {
        let with_absent = QueryParams::new()
            .with("title", "Yotsuba")
            .with("year", None::<u32>)
            .with("limit", 10u32);
        let without = QueryParams::new().with("title", "Yotsuba").with("limit", 10u32);
        assert_eq!(with_absent.encode(), without.encode());
        assert_eq!(with_absent.encode(), "title=Yotsuba&limit=10");
    }

    #[test]
    fn test_empty_mapping_leaves_url_alone() {
        let url = "https://api.mangadex.org/manga";
        assert_eq!(QueryParams::new().append_to(url), url);
        let only_absent = QueryParams::new().with("offset", None::<u32>);
        assert!(only_absent.is_empty());
        assert_eq!(only_absent.append_to(url), url);
        assert_eq!(
            QueryParams::new().with("limit", 1u32).append_to(url),
            "https://api.mangadex.org/manga?limit=1"
        );
    }

    #[test]
    fn test_scalars_and_escaping() {
        let params = QueryParams::new()
            .with("title", "kimi no na wa")
            .with("includedTags[]", vec!["x&y"])
            .with("flag", true)
            .with("ratio", 0.5);
        assert_eq!(
            params.encode(),
            "title=kimi+no+na+wa&includedTags%5B%5D=x%26y&flag=true&ratio=0.5"
        );
    }

    #[test]
    fn test_unknown_keys_pass_through_and_insert_replaces() {
        let mut params = QueryParams::new();
        params.insert("order[createdAt]", "asc");
        params.insert("limit", 1u32);
        params.insert("order[createdAt]", "desc");
        assert_eq!(params.encode(), "order%5BcreatedAt%5D=desc&limit=1");
        assert_eq!(params.get("limit"), Some(&QueryValue::One(Scalar::Integer(1))));
    }

    #[test]
    fn test_bytes_decode_as_utf8() {
        let value = Scalar::from_utf8(b"caf\xc3\xa9").unwrap();
        assert_eq!(value, Scalar::Text("café".to_string()));
        assert!(Scalar::from_utf8(&[0xff, 0xfe]).is_err());
    }

    #[test]
    fn test_json_body_skips_absent() {
        let params: QueryParams = [
            ("username", QueryValue::from("yotsuba")),
            ("password", QueryValue::from("hunter2")),
            ("code", QueryValue::Absent),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            params.to_json_body(),
            json!({"username": "yotsuba", "password": "hunter2"})
        );
    }
}
