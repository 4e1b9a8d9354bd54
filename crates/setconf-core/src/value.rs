//! Setting value types
//!
//! A stored setting is either a [`SettingValue::Simple`] literal as it appeared
//! in its source, or a [`SettingValue::Complex`] handle into a structured
//! document (an object or a list) that is only rendered or recursed into by
//! the list accessors.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A node of a parsed YAML/JSON document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Node {
    /// Null value
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// String value
    String(String),
    /// Sequence of nodes
    Sequence(Vec<Node>),
    /// Mapping of string keys to nodes
    Mapping(IndexMap<String, Node>),
}

impl Node {
    /// Check if this node is null
    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    /// Check if this node is a mapping
    pub fn is_mapping(&self) -> bool {
        matches!(self, Node::Mapping(_))
    }

    /// Get as slice if this is a Sequence
    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Node::Sequence(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the type name of this node
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Null => "null",
            Node::Bool(_) => "boolean",
            Node::Integer(_) => "integer",
            Node::Float(_) => "float",
            Node::String(_) => "string",
            Node::Sequence(_) => "sequence",
            Node::Mapping(_) => "mapping",
        }
    }

    /// Flatten a document into dotted `(key, value)` pairs
    ///
    /// - Nested mappings become dotted keys (`server.port`)
    /// - A key wrapped in double quotes is stored without them
    /// - Null leaves are skipped
    /// - Sequences and empty mappings are kept as [`SettingValue::Complex`]
    /// - Scalars become [`SettingValue::Simple`] with their canonical text
    ///
    /// A non-mapping root has no keys and yields nothing.
    pub fn flatten(&self) -> Vec<(String, SettingValue)> {
        let mut entries = Vec::new();
        if let Node::Mapping(map) = self {
            flatten_into(map, "", &mut entries);
        }
        entries
    }
}

fn flatten_into(
    map: &IndexMap<String, Node>,
    prefix: &str,
    entries: &mut Vec<(String, SettingValue)>,
) {
    for (key, node) in map {
        let key = unquote(key);
        let full_key = if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", prefix, key)
        };

        match node {
            Node::Null => {}
            Node::Mapping(inner) if !inner.is_empty() => flatten_into(inner, &full_key, entries),
            other => entries.push((full_key, SettingValue::from_node(other.clone()))),
        }
    }
}

fn unquote(key: &str) -> &str {
    key.strip_prefix('"')
        .and_then(|k| k.strip_suffix('"'))
        .unwrap_or(key)
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Null => write!(f, "null"),
            Node::Bool(b) => write!(f, "{}", b),
            Node::Integer(i) => write!(f, "{}", i),
            // Whole floats keep their fraction so `1.0` does not read back as `1`
            Node::Float(n) if n.is_finite() && n.fract() == 0.0 => write!(f, "{:.1}", n),
            Node::Float(n) => write!(f, "{}", n),
            Node::String(s) => write!(f, "{}", s),
            Node::Sequence(seq) => {
                write!(f, "[")?;
                for (i, v) in seq.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
            Node::Mapping(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}={}", k, v)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::String(s.to_string())
    }
}

impl From<i64> for Node {
    fn from(i: i64) -> Self {
        Node::Integer(i)
    }
}

impl<T: Into<Node>> From<Vec<T>> for Node {
    fn from(v: Vec<T>) -> Self {
        Node::Sequence(v.into_iter().map(Into::into).collect())
    }
}

/// Structural kind of a complex value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplexKind {
    Object,
    List,
}

impl fmt::Display for ComplexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComplexKind::Object => write!(f, "object"),
            ComplexKind::List => write!(f, "list"),
        }
    }
}

/// A stored setting value
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    /// Literal text exactly as the source supplied it
    Simple(String),
    /// Structured document node with its kind
    Complex(Node, ComplexKind),
}

impl SettingValue {
    /// Create a simple value
    pub fn simple(value: impl Into<String>) -> Self {
        SettingValue::Simple(value.into())
    }

    /// Wrap a document node; objects and lists stay structured
    pub fn from_node(node: Node) -> Self {
        match node {
            Node::Mapping(_) => SettingValue::Complex(node, ComplexKind::Object),
            Node::Sequence(_) => SettingValue::Complex(node, ComplexKind::List),
            Node::String(s) => SettingValue::Simple(s),
            scalar => SettingValue::Simple(scalar.to_string()),
        }
    }

    /// Get the literal text if this is a simple value
    pub fn as_simple(&self) -> Option<&str> {
        match self {
            SettingValue::Simple(s) => Some(s),
            SettingValue::Complex(..) => None,
        }
    }

    /// Get the kind if this is a complex value
    pub fn complex_kind(&self) -> Option<ComplexKind> {
        match self {
            SettingValue::Simple(_) => None,
            SettingValue::Complex(_, kind) => Some(*kind),
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Simple(s) => write!(f, "{}", s),
            SettingValue::Complex(node, _) => write!(f, "{}", node),
        }
    }
}

impl From<&str> for SettingValue {
    fn from(s: &str) -> Self {
        SettingValue::Simple(s.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(s: String) -> Self {
        SettingValue::Simple(s)
    }
}
