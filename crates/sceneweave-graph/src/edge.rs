//! Edge model: directed connections with optional endpoint handles

use crate::ids::{EdgeId, Handle, NodeId, SubSceneId};
use serde::{Deserialize, Serialize};

/// Rendering style carried on every edge. The engine never reads it back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeStyle {
    pub stroke: String,
    pub stroke_width: f32,
    pub dashed: bool,
}

impl Default for EdgeStyle {
    fn default() -> Self {
        Self {
            stroke: "#94a3b8".to_string(),
            stroke_width: 2.0,
            dashed: false,
        }
    }
}

impl EdgeStyle {
    /// Style of scene-to-description link edges. Shared links render dashed.
    #[must_use]
    pub fn description_link(shared: bool) -> Self {
        Self {
            stroke: "#8b5cf6".to_string(),
            stroke_width: 1.0,
            dashed: shared,
        }
    }
}

/// Payload on edges that represent a sub-scene-to-description link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionLink {
    /// Which sub-scene this edge belongs to.
    pub sub_scene: SubSceneId,
    /// Whether the target node is shared across the scene's sub-scenes.
    pub is_shared: bool,
}

/// A directed edge between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default)]
    pub source_handle: Option<Handle>,
    #[serde(default)]
    pub target_handle: Option<Handle>,
    #[serde(default)]
    pub style: EdgeStyle,
    /// Present only on description-link edges.
    #[serde(default)]
    pub link: Option<DescriptionLink>,
}

impl Edge {
    /// Plain structural edge between two flow nodes, no handles.
    #[must_use]
    pub fn structural(source: NodeId, target: NodeId) -> Self {
        Self {
            id: EdgeId::generate("edge"),
            source,
            target,
            source_handle: None,
            target_handle: None,
            style: EdgeStyle::default(),
            link: None,
        }
    }

    /// Structural edge with explicit endpoint handles.
    #[must_use]
    pub fn with_handles(
        source: NodeId,
        source_handle: Option<Handle>,
        target: NodeId,
        target_handle: Option<Handle>,
    ) -> Self {
        Self {
            id: EdgeId::generate("edge"),
            source,
            target,
            source_handle,
            target_handle,
            style: EdgeStyle::default(),
            link: None,
        }
    }

    /// Link edge from a scene's sub-scene handle to a description node.
    #[must_use]
    pub fn description_link(
        source: NodeId,
        sub_scene: SubSceneId,
        target: NodeId,
        shared: bool,
    ) -> Self {
        Self {
            id: EdgeId::generate("edge"),
            source,
            source_handle: Some(Handle::sub_scene(&sub_scene)),
            target,
            target_handle: None,
            style: EdgeStyle::description_link(shared),
            link: Some(DescriptionLink {
                sub_scene,
                is_shared: shared,
            }),
        }
    }

    /// Whether the source handle denotes a sub-scene output.
    #[inline]
    #[must_use]
    pub fn has_sub_scene_handle(&self) -> bool {
        self.source_handle
            .as_ref()
            .is_some_and(Handle::is_sub_scene)
    }

    /// Sub-scene id parsed from the source handle, if it carries one.
    #[must_use]
    pub fn sub_scene_id(&self) -> Option<SubSceneId> {
        self.source_handle.as_ref().and_then(Handle::as_sub_scene)
    }
}
