use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The dynamic value carried by a single property.
///
/// The downstream graph database is schemaless, so nodes built by different
/// transformers (pods, policies, helm releases, ...) need a property bag that
/// doesn't commit to a fixed Rust type. A `BTreeMap` of these, compared
/// structurally, is what backs the redundancy check in the reconciliation
/// loop (see `graph_types::Node::structurally_equal`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// A UTF-8 string.
    String(String),
    /// A signed integer.
    Int(i64),
    /// A boolean flag.
    Bool(bool),
    /// A list of strings, e.g. label values.
    StringList(Vec<String>),
    /// A nested string-to-string map, e.g. Kubernetes labels/annotations.
    StringMap(BTreeMap<String, String>),
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// `name -> value` properties of a [`crate::Node`].
///
/// A plain `BTreeMap` alias rather than a newtype: `BTreeMap`'s `PartialEq`
/// already compares by key/value content rather than insertion order, which
/// is exactly the "ordering irrelevance" deep-equality the redundancy check
/// in the reconciliation loop needs.
pub type PropertyMap = BTreeMap<String, PropertyValue>;

/// `name -> value` metadata of a [`crate::Node`], used by edge-builders to
/// resolve symbolic references (e.g. an owner UID).
pub type MetadataMap = BTreeMap<String, String>;

/// Well-known metadata key an edge-builder looks for to find the UID of the
/// resource that owns this node (see the `ownedBy` edge type).
pub const OWNER_UID_KEY: &str = "OwnerUID";

/// Well-known property keys used by [`crate::store::NodeStoreView::by_kind_name`]
/// to index nodes for symbolic lookup.
pub const KIND_KEY: &str = "kind";
/// See [`KIND_KEY`].
pub const NAMESPACE_KEY: &str = "namespace";
/// See [`KIND_KEY`].
pub const NAME_KEY: &str = "name";
