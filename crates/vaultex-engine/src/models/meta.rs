use serde::Serialize;
use std::collections::BTreeMap;

/// Open key/value metadata attached to jobs and blocks.
///
/// Sourced from note front matter and callout configuration, and exposed to
/// templates as variables.
pub type Metadata = BTreeMap<String, MetaValue>;

/// The value shapes metadata may hold.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetaValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<MetaValue>),
    Map(Metadata),
}

impl MetaValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            MetaValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetaValue::Integer(i) => Some(*i as f64),
            MetaValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Scalar rendering used when a value is spliced into markup.
    pub fn to_markup(&self) -> String {
        match self {
            MetaValue::Bool(b) => b.to_string(),
            MetaValue::Integer(i) => i.to_string(),
            MetaValue::Float(f) => f.to_string(),
            MetaValue::String(s) => s.clone(),
            MetaValue::List(items) => items
                .iter()
                .map(MetaValue::to_markup)
                .collect::<Vec<_>>()
                .join(","),
            MetaValue::Map(_) => String::new(),
        }
    }

    /// Converts a YAML value, dropping nulls.
    pub fn from_yaml(value: serde_yaml::Value) -> Option<Self> {
        use serde_yaml::Value;

        match value {
            Value::Null => None,
            Value::Bool(b) => Some(MetaValue::Bool(b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Some(MetaValue::Integer(i)),
                None => n.as_f64().map(MetaValue::Float),
            },
            Value::String(s) => Some(MetaValue::String(s)),
            Value::Sequence(items) => Some(MetaValue::List(
                items.into_iter().filter_map(MetaValue::from_yaml).collect(),
            )),
            Value::Mapping(mapping) => Some(MetaValue::Map(metadata_from_mapping(mapping))),
            Value::Tagged(tagged) => MetaValue::from_yaml(tagged.value),
        }
    }
}

impl From<&str> for MetaValue {
    fn from(s: &str) -> Self {
        MetaValue::String(s.to_string())
    }
}

impl From<bool> for MetaValue {
    fn from(b: bool) -> Self {
        MetaValue::Bool(b)
    }
}

fn metadata_from_mapping(mapping: serde_yaml::Mapping) -> Metadata {
    mapping
        .into_iter()
        .filter_map(|(key, value)| {
            let key = match key {
                serde_yaml::Value::String(s) => s,
                serde_yaml::Value::Number(n) => n.to_string(),
                serde_yaml::Value::Bool(b) => b.to_string(),
                _ => return None,
            };
            MetaValue::from_yaml(value).map(|value| (key, value))
        })
        .collect()
}

/// Parses a YAML mapping document into metadata.
///
/// An empty document yields empty metadata; anything other than a mapping is an error.
pub fn parse_yaml_metadata(source: &str) -> Result<Metadata, String> {
    let value: serde_yaml::Value = serde_yaml::from_str(source).map_err(|e| e.to_string())?;
    match value {
        serde_yaml::Value::Null => Ok(Metadata::new()),
        serde_yaml::Value::Mapping(mapping) => Ok(metadata_from_mapping(mapping)),
        other => Err(format!("expected a mapping, found {other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scalar_shapes() {
        let meta = parse_yaml_metadata("lang: en\nwidth: 0.7\ndepth: 3\ndraft: false").unwrap();
        assert_eq!(meta["lang"], MetaValue::String("en".into()));
        assert_eq!(meta["width"], MetaValue::Float(0.7));
        assert_eq!(meta["depth"], MetaValue::Integer(3));
        assert_eq!(meta["draft"], MetaValue::Bool(false));
    }

    #[test]
    fn nulls_are_dropped() {
        let meta = parse_yaml_metadata("title:\nlang: en").unwrap();
        assert!(!meta.contains_key("title"));
        assert_eq!(meta.len(), 1);
    }

    #[test]
    fn nested_maps_and_lists() {
        let meta = parse_yaml_metadata("tags:\n  - a\n  - b\nlayout:\n  columns: 2").unwrap();
        assert_eq!(
            meta["tags"],
            MetaValue::List(vec!["a".into(), "b".into()])
        );
        let MetaValue::Map(layout) = &meta["layout"] else {
            panic!("expected nested map");
        };
        assert_eq!(layout["columns"], MetaValue::Integer(2));
    }

    #[test]
    fn empty_document_is_empty_metadata() {
        assert!(parse_yaml_metadata("").unwrap().is_empty());
    }

    #[test]
    fn non_mapping_is_rejected() {
        assert!(parse_yaml_metadata("- just\n- a list").is_err());
        assert!(parse_yaml_metadata("key: [unclosed").is_err());
    }

    #[test]
    fn numeric_accessors() {
        assert_eq!(MetaValue::Integer(1).as_f64(), Some(1.0));
        assert_eq!(MetaValue::from("x").as_f64(), None);
        assert_eq!(MetaValue::Float(0.25).to_markup(), "0.25");
    }
}
