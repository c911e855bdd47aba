//! Content-derived identifier types
//!
//! Generated geometries have no identity beyond their coordinates, so the
//! resources emitted for them are keyed by a hash of their WKT text. The key is
//! a name-based UUID (v5), which is stable across runs, platforms and builds.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Namespace all resource keys are derived in
const RESOURCE_NAMESPACE: Uuid = Uuid::NAMESPACE_URL;

/// Deterministic identifier of a geometry, derived from its WKT text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceKey(pub Uuid);

impl ResourceKey {
    /// Derive the key for a WKT string
    pub fn from_wkt(wkt: &str) -> Self {
        Self(Uuid::new_v5(&RESOURCE_NAMESPACE, wkt.as_bytes()))
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl Serialize for ResourceKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.simple().to_string())
    }
}

impl<'de> Deserialize<'de> for ResourceKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let uuid = Uuid::parse_str(&s).map_err(serde::de::Error::custom)?;
        Ok(ResourceKey(uuid))
    }
}
