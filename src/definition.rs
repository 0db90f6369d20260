//! Definition document parsing structures
//!
//! A definition is a YAML document whose root `templates` key holds a node:
//!
//! ```yaml
//! templates:
//!   selection_variable: lang
//!   variables:
//!     lang:
//!       name: Language
//!       type: select
//!       values: { go: Go, rs: Rust }
//!   templates:
//!     go: { path: go-tpl }
//!     rs:
//!       path: rust-tpl
//!       variables:
//!         proj: { type: text, default: app }
//! ```

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;

/// Parsed definition document
#[derive(Debug, Default, Deserialize)]
pub struct Definition {
    /// Root node. A document without it resolves to an invalid node.
    #[serde(default)]
    pub templates: NodeDef,
}

impl Definition {
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }
}

/// A template node as written in YAML.
///
/// Whether it is a leaf or a branch is decided by [`NodeDef::kind`] when the
/// resolver reaches it, so malformed nodes on unvisited branches are harmless.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct NodeDef {
    #[serde(default)]
    pub path: Option<String>,

    #[serde(default)]
    pub selection_variable: Option<String>,

    /// Children keyed by selection value
    #[serde(default)]
    pub templates: OrderedMap<NodeDef>,

    /// Variables asked at this node, in display order
    #[serde(default)]
    pub variables: OrderedMap<VariableSpec>,
}

/// The two node variants the resolver understands
#[derive(Debug, Clone, Copy)]
pub enum NodeKind<'a> {
    Leaf {
        template_path: &'a str,
    },
    Branch {
        selection_variable: &'a str,
        children: &'a OrderedMap<NodeDef>,
    },
}

impl NodeDef {
    /// `path` wins over `selection_variable`; `None` when the node has neither.
    pub fn kind(&self) -> Option<NodeKind<'_>> {
        if let Some(path) = &self.path {
            return Some(NodeKind::Leaf {
                template_path: path,
            });
        }
        self.selection_variable
            .as_deref()
            .map(|selection_variable| NodeKind::Branch {
                selection_variable,
                children: &self.templates,
            })
    }

    pub fn leaf(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn branch<K, I>(selection_variable: impl Into<String>, children: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, NodeDef)>,
    {
        Self {
            selection_variable: Some(selection_variable.into()),
            templates: children.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn with_variable(mut self, name: impl Into<String>, spec: VariableSpec) -> Self {
        self.variables.push(name.into(), spec);
        self
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    #[default]
    Text,
    Select,
}

/// How a variable is asked for. The variable id is its key in the node's
/// `variables` map.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(from = "Option<VariableSpecRaw>")]
pub struct VariableSpec {
    /// Display label (`name` in YAML); the id is shown when absent
    pub label: Option<String>,
    pub kind: VariableKind,
    pub default: Option<String>,
    /// Select only: value id to display label
    pub choices: OrderedMap<String>,
}

#[derive(Debug, Default, Deserialize)]
struct VariableSpecRaw {
    #[serde(default)]
    name: Option<String>,
    #[serde(default, rename = "type")]
    kind: VariableKind,
    #[serde(default)]
    default: Option<Scalar>,
    #[serde(default)]
    values: OrderedMap<Scalar>,
}

impl From<Option<VariableSpecRaw>> for VariableSpec {
    fn from(raw: Option<VariableSpecRaw>) -> Self {
        let raw = raw.unwrap_or_default();
        Self {
            label: raw.name,
            kind: raw.kind,
            default: raw.default.map(|s| s.0),
            choices: raw.values.into_iter().map(|(k, v)| (k, v.0)).collect(),
        }
    }
}

impl VariableSpec {
    pub fn text() -> Self {
        Self::default()
    }

    pub fn select<K, V, I>(choices: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            kind: VariableKind::Select,
            choices: choices
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            ..Self::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// String-keyed map that keeps YAML insertion order and rejects duplicate keys.
///
/// Keys may be written as any YAML scalar (`8080:`, `true:`); they are stored
/// in their string form.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> OrderedMap<V> {
    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replaces the value in place when the key exists.
    pub fn push(&mut self, key: String, value: V) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        for (k, v) in iter {
            map.push(k.into(), v);
        }
        map
    }
}

impl<V> IntoIterator for OrderedMap<V> {
    type Item = (String, V);
    type IntoIter = std::vec::IntoIter<(String, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(OrderedMapVisitor(PhantomData))
    }
}

struct OrderedMapVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
    type Value = OrderedMap<V>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a mapping")
    }

    // `variables:` with nothing after it
    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(OrderedMap::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(OrderedMap::default())
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries: Vec<(String, V)> = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(Scalar(key)) = access.next_key::<Scalar>()? {
            if entries.iter().any(|(k, _)| *k == key) {
                return Err(de::Error::custom(format!("duplicate key '{}'", key)));
            }
            let value = access.next_value()?;
            entries.push((key, value));
        }
        Ok(OrderedMap { entries })
    }
}

/// A YAML scalar (string, number or bool) kept as a string.
#[derive(Debug, Clone, PartialEq)]
struct Scalar(String);

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match serde_yaml::Value::deserialize(deserializer)? {
            serde_yaml::Value::String(s) => Ok(Scalar(s)),
            serde_yaml::Value::Number(n) => Ok(Scalar(n.to_string())),
            serde_yaml::Value::Bool(b) => Ok(Scalar(b.to_string())),
            other => Err(de::Error::custom(format!(
                "expected a string, number or bool, got {:?}",
                other
            ))),
        }
    }
}
