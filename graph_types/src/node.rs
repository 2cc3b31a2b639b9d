use crate::properties::{MetadataMap, PropertyMap, KIND_KEY, NAME_KEY, NAMESPACE_KEY};
use crate::uid::Uid;
use serde::{Deserialize, Serialize};

/// A vertex in the reconciled cluster graph.
///
/// Two `Node`s with the same [`Uid`] are the same entity; whether a new
/// version is a no-op is decided by [`Node::structurally_equal`], *not* by
/// `PartialEq` on the whole struct (which also compares the UID and is used
/// for ordinary collection bookkeeping).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// The node's globally unique identifier.
    pub uid: Uid,
    /// Schemaless properties, set entirely by the transformer that built this
    /// node.
    pub properties: PropertyMap,
    /// String metadata, used by edge-builders to resolve symbolic references.
    pub metadata: MetadataMap,
}

impl Node {
    /// Construct a bare node with no properties or metadata.
    pub fn new(uid: impl Into<Uid>) -> Self {
        Self {
            uid: uid.into(),
            properties: PropertyMap::new(),
            metadata: MetadataMap::new(),
        }
    }

    /// Deep-equality used by the reconciliation loop's redundancy check:
    /// same properties and same metadata, ignoring the UID (callers only ever
    /// compare two nodes known to share a UID already).
    pub fn structurally_equal(&self, other: &Node) -> bool {
        self.properties == other.properties && self.metadata == other.metadata
    }

    /// The resource kind, if the transformer recorded one under the
    /// well-known `kind` property — used to build the `by_kind_name` index.
    pub fn kind(&self) -> Option<&str> {
        match self.properties.get(KIND_KEY) {
            Some(crate::properties::PropertyValue::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The resource namespace, if recorded under the well-known `namespace`
    /// property.
    pub fn namespace(&self) -> Option<&str> {
        match self.properties.get(NAMESPACE_KEY) {
            Some(crate::properties::PropertyValue::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The resource name, if recorded under the well-known `name` property.
    pub fn name(&self) -> Option<&str> {
        match self.properties.get(NAME_KEY) {
            Some(crate::properties::PropertyValue::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::PropertyValue;

    #[test]
    fn structural_equality_ignores_map_construction_order() {
        let mut a = Node::new("x");
        a.properties.insert("a".into(), PropertyValue::Int(1));
        a.properties.insert("b".into(), PropertyValue::Int(2));

        let mut b = Node::new("x");
        b.properties.insert("b".into(), PropertyValue::Int(2));
        b.properties.insert("a".into(), PropertyValue::Int(1));

        assert!(a.structurally_equal(&b));
    }

    #[test]
    fn structural_equality_detects_value_change() {
        let mut a = Node::new("x");
        a.properties.insert("a".into(), PropertyValue::Int(1));

        let mut b = Node::new("x");
        b.properties.insert("a".into(), PropertyValue::Int(2));

        assert!(!a.structurally_equal(&b));
    }

    #[test]
    fn round_trips_through_json() {
        let mut node = Node::new("local-cluster/1");
        node.properties.insert("kind".into(), PropertyValue::String("Pod".into()));
        node.metadata.insert("OwnerUID".into(), "local-cluster/0".into());

        let encoded = serde_json::to_string(&node).unwrap();
        let decoded: Node = serde_json::from_str(&encoded).unwrap();
        assert_eq!(node, decoded);
    }
}
