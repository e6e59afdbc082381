//! Identifier newtypes and connection handles
//!
//! Ids are human-readable strings (`big-scene_<uuid>`) rather than bare
//! uuids: sub-scene ids are embedded verbatim into [`Handle`] strings, and
//! handles must round-trip back to the id they encode.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing id string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a fresh id with the given prefix.
            #[must_use]
            pub fn generate(prefix: &str) -> Self {
                Self(format!("{prefix}_{}", Uuid::new_v4()))
            }

            /// View the id as a string slice.
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::error::Error for $name {}

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(
    /// Unique node identifier
    NodeId
);

string_id!(
    /// Unique edge identifier
    EdgeId
);

string_id!(
    /// Identifier of a sub-scene within a scene node's payload
    SubSceneId
);

/// Named connection point on a node.
///
/// Scene nodes expose one output handle per sub-scene, encoded as
/// `sub-scene-<subSceneId>`. Everything else is an opaque name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Handle(String);

impl Handle {
    /// Prefix marking a handle as a sub-scene output.
    pub const SUB_SCENE_PREFIX: &'static str = "sub-scene-";

    /// Wrap an arbitrary handle name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The output handle belonging to a sub-scene.
    #[must_use]
    pub fn sub_scene(id: &SubSceneId) -> Self {
        Self(format!("{}{}", Self::SUB_SCENE_PREFIX, id.as_str()))
    }

    /// Parse the sub-scene id back out of a sub-scene handle.
    ///
    /// Returns `None` for handles that do not carry the sub-scene prefix.
    #[must_use]
    pub fn as_sub_scene(&self) -> Option<SubSceneId> {
        self.0
            .strip_prefix(Self::SUB_SCENE_PREFIX)
            .map(SubSceneId::from)
    }

    /// Whether this handle denotes a sub-scene output.
    #[inline]
    #[must_use]
    pub fn is_sub_scene(&self) -> bool {
        self.0.starts_with(Self::SUB_SCENE_PREFIX)
    }

    /// View the handle as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Handle {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_embeds_prefix() {
        let id = NodeId::generate("big-scene");
        assert!(id.as_str().starts_with("big-scene_"));
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = NodeId::generate("start");
        let b = NodeId::generate("start");
        assert_ne!(a, b);
    }

    #[test]
    fn sub_scene_handle_round_trip() {
        let sub = SubSceneId::new("sub_1");
        let handle = Handle::sub_scene(&sub);

        assert_eq!(handle.as_str(), "sub-scene-sub_1");
        assert!(handle.is_sub_scene());
        assert_eq!(handle.as_sub_scene(), Some(sub));
    }

    #[test]
    fn plain_handle_is_not_sub_scene() {
        let handle = Handle::new("output");
        assert!(!handle.is_sub_scene());
        assert_eq!(handle.as_sub_scene(), None);
    }

    #[test]
    fn id_serde_is_transparent() {
        let id = NodeId::new("start_0");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"start_0\"");

        let back: NodeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
