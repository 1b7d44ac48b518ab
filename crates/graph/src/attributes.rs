//! Attribute values and their textual form.
//!
//! Every vertex, arc and graph carries an insertion-ordered [`Attributes`] map.
//! Values are kept structured until emission, where [`format_value`] flattens
//! them into the text placed between double quotes in the DOT output.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Insertion-ordered attribute map.
pub type Attributes = IndexMap<String, AttrValue>;

/// A single attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// Passed through verbatim
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    /// Ordered, possibly heterogeneous sequence
    List(Vec<AttrValue>),
    /// Nested mapping, rendered as `key=value` pairs
    Map(IndexMap<String, AttrValue>),
}

impl AttrValue {
    /// Get the string payload, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Format this value. Shorthand for [`format_value`].
    pub fn format(&self) -> String {
        format_value(self)
    }
}

/// Convert an attribute value to its textual form.
///
/// Strings pass through unchanged, mappings become `k=v` pairs and sequences
/// become their formatted elements, both joined with `", "`. Scalars fall back
/// to their debug representation. This never fails.
pub fn format_value(value: &AttrValue) -> String {
    match value {
        AttrValue::Str(s) => s.clone(),
        AttrValue::Map(map) => map
            .iter()
            .map(|(k, v)| format!("{}={}", k, format_value(v)))
            .collect::<Vec<_>>()
            .join(", "),
        AttrValue::List(items) => items.iter().map(format_value).collect::<Vec<_>>().join(", "),
        AttrValue::Int(i) => format!("{:?}", i),
        AttrValue::Float(f) => format!("{:?}", f),
        AttrValue::Bool(b) => format!("{:?}", b),
        AttrValue::Null => "null".to_string(),
    }
}

/// Render an attribute map as `key="value", ...`, skipping `excluded` keys.
pub(crate) fn format_attr_list(attributes: &Attributes, excluded: &[&str]) -> String {
    attributes
        .iter()
        .filter(|(k, _)| !excluded.contains(&k.as_str()))
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_quotes(&format_value(v))))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Escape a value so it stays inside its quoted DOT string.
///
/// Embedded `"` become `\"`. Other backslashes pass through so DOT escapes
/// such as `\n` and `\l` keep working, except that an odd run of trailing
/// backslashes gets one more, otherwise the last one would escape the closing
/// quote.
pub(crate) fn escape_quotes(s: &str) -> String {
    let mut escaped = s.replace('"', "\\\"");
    let trailing = escaped.chars().rev().take_while(|&c| c == '\\').count();
    if trailing % 2 == 1 {
        escaped.push('\\');
    }
    escaped
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Str(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Str(s)
    }
}

impl From<&String> for AttrValue {
    fn from(s: &String) -> Self {
        AttrValue::Str(s.clone())
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for AttrValue {
                fn from(i: $t) -> Self {
                    AttrValue::Int(i64::from(i))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<usize> for AttrValue {
    fn from(i: usize) -> Self {
        match i64::try_from(i) {
            Ok(i) => AttrValue::Int(i),
            Err(_) => AttrValue::Str(i.to_string()),
        }
    }
}

impl From<f64> for AttrValue {
    fn from(f: f64) -> Self {
        AttrValue::Float(f)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Bool(b)
    }
}

impl<T: Into<AttrValue>> From<Vec<T>> for AttrValue {
    fn from(items: Vec<T>) -> Self {
        AttrValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<AttrValue>> From<IndexMap<String, T>> for AttrValue {
    fn from(map: IndexMap<String, T>) -> Self {
        AttrValue::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(AttrValue::Null, Into::into)
    }
}

impl From<serde_json::Value> for AttrValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => AttrValue::Null,
            Value::Bool(b) => AttrValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => AttrValue::Int(i),
                None => n.as_f64().map_or_else(|| AttrValue::Str(n.to_string()), AttrValue::Float),
            },
            Value::String(s) => AttrValue::Str(s),
            Value::Array(items) => AttrValue::List(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => {
                AttrValue::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

/// Build an [`Attributes`] map from `(key, value)` pairs, keeping their order.
pub fn attrs<K, V, I>(pairs: I) -> Attributes
where
    K: Into<String>,
    V: Into<AttrValue>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_passes_through() {
        assert_eq!(format_value(&"dashed".into()), "dashed");
        assert_eq!(format_value(&"".into()), "");
    }

    #[test]
    fn test_mapping_formats_as_pairs() {
        let value = AttrValue::from(attrs([("x", 1), ("y", 2)]));
        assert_eq!(format_value(&value), "x=1, y=2");
    }

    #[test]
    fn test_sequence_formats_elements() {
        let value = AttrValue::from(vec!["a", "b"]);
        assert_eq!(format_value(&value), "a, b");
    }

    #[test]
    fn test_heterogeneous_nested_sequence() {
        let value = AttrValue::List(vec![
            "a".into(),
            3.into(),
            AttrValue::List(vec![true.into(), AttrValue::Null]),
            AttrValue::from(attrs([("k", "v")])),
        ]);
        assert_eq!(format_value(&value), "a, 3, true, null, k=v");
    }

    #[test]
    fn test_scalars_fall_back_to_debug() {
        assert_eq!(format_value(&42.into()), "42");
        assert_eq!(format_value(&(-7i64).into()), "-7");
        assert_eq!(format_value(&2.5.into()), "2.5");
        assert_eq!(format_value(&1.0.into()), "1.0");
        assert_eq!(format_value(&false.into()), "false");
    }

    #[test]
    fn test_from_json_value() {
        let json = serde_json::json!({"x": 1, "y": [1.5, "z"], "n": null});
        let value = AttrValue::from(json);
        assert_eq!(format_value(&value), "x=1, y=1.5, z, n=null");
    }

    #[test]
    fn test_format_attr_list_excludes_and_escapes() {
        let map = attrs([("label", "say \"hi\""), ("source", "ignored"), ("color", "red")]);
        assert_eq!(
            format_attr_list(&map, &["source", "dest"]),
            r#"label="say \"hi\"", color="red""#
        );
    }

    #[test]
    fn test_trailing_backslash_cannot_escape_closing_quote() {
        assert_eq!(escape_quotes(r"C:\dir\"), r"C:\dir\\");
        assert_eq!(escape_quotes(r"two\\"), r"two\\");
        assert_eq!(escape_quotes(r"left\l"), r"left\l");
    }

    #[test]
    fn test_untagged_deserialize() {
        let value: AttrValue = serde_json::from_str(r#"{"a": [1, "b"], "c": true}"#).unwrap();
        assert_eq!(format_value(&value), "a=1, b, c=true");
    }
}
