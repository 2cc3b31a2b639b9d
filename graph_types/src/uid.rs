use serde::{Deserialize, Serialize};
use std::fmt;

/// A globally unique identifier for a graph node.
///
/// By convention this is `<cluster-prefix>/<resource-uid>` so that UIDs
/// produced by distinct clusters reporting into the same aggregator never
/// collide. The prefix is opaque to the reconciler itself — it is stamped on
/// by the transformer that builds the [`crate::Node`], not recomputed here.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Uid(String);

impl Uid {
    /// Wrap a raw string as a [`Uid`].
    pub fn new(uid: impl Into<String>) -> Self {
        Self(uid.into())
    }

    /// Build a [`Uid`] by prepending `cluster_prefix` to `raw_uid`.
    pub fn prefixed(cluster_prefix: &str, raw_uid: &str) -> Self {
        Self(format!("{cluster_prefix}/{raw_uid}"))
    }

    /// Borrow the underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the UID carries no characters. Used by event validation to
    /// reject malformed events.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Uid {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Uid {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
