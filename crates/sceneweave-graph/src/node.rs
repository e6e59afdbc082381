//! Node model: kinds, positions, and type-specific payloads

use crate::ids::{NodeId, SubSceneId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of node types the editor places on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    /// Workflow entry point
    Start,
    /// Workflow terminal
    End,
    /// Primary scene node holding an ordered list of sub-scenes
    BigScene,
    /// Guide leading the audience into a scene
    EnterGuide,
    /// Guide leading the audience out of a scene
    ExitGuide,
    /// Auxiliary description node linked from sub-scene handles
    Description,
}

impl NodeKind {
    /// Stable string tag, matching the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
            Self::BigScene => "big-scene",
            Self::EnterGuide => "enter-guide",
            Self::ExitGuide => "exit-guide",
            Self::Description => "description",
        }
    }

    /// All kinds, in catalog order.
    #[must_use]
    pub const fn all() -> [Self; 6] {
        [
            Self::Start,
            Self::End,
            Self::BigScene,
            Self::EnterGuide,
            Self::ExitGuide,
            Self::Description,
        ]
    }

    /// Whether nodes of this kind participate in scene flow.
    ///
    /// Description nodes are a bipartite relation off to the side; they
    /// never carry structural edges.
    #[inline]
    #[must_use]
    pub const fn is_structural(self) -> bool {
        !matches!(self, Self::Description)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canvas position. Display-only; no engine logic reads it back.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    /// Construct a position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Offset by a delta, used when placing generated nodes near their scene.
    #[must_use]
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// One entry in a scene node's ordered sub-scene list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubScene {
    pub id: SubSceneId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Whether a description node is currently linked.
    #[serde(default)]
    pub has_description: bool,
    /// The linked description node, if any.
    #[serde(default)]
    pub linked_description_node: Option<NodeId>,
    /// Whether the linked node is the scene-level shared one.
    #[serde(default)]
    pub is_description_shared: bool,
}

impl SubScene {
    /// A fresh, unlinked sub-scene.
    pub fn new(id: impl Into<SubSceneId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            has_description: false,
            linked_description_node: None,
            is_description_shared: false,
        }
    }

    /// Point this sub-scene at a description node.
    pub fn link_to(&mut self, node: NodeId, shared: bool) {
        self.has_description = true;
        self.linked_description_node = Some(node);
        self.is_description_shared = shared;
    }

    /// Clear all three linkage fields.
    pub fn clear_link(&mut self) {
        self.has_description = false;
        self.linked_description_node = None;
        self.is_description_shared = false;
    }

    /// Whether any description node is linked.
    #[inline]
    #[must_use]
    pub fn is_linked(&self) -> bool {
        self.linked_description_node.is_some()
    }
}

/// Payload of a `BigScene` node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneData {
    pub title: String,
    #[serde(default)]
    pub sub_scenes: Vec<SubScene>,
    /// Scene-level shared description flags.
    #[serde(default)]
    pub has_shared_description: bool,
    #[serde(default)]
    pub shared_description_node: Option<NodeId>,
}

impl SceneData {
    /// Scene payload with a title and no sub-scenes.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Look up a sub-scene by id.
    #[must_use]
    pub fn sub_scene(&self, id: &SubSceneId) -> Option<&SubScene> {
        self.sub_scenes.iter().find(|s| &s.id == id)
    }

    /// Mutable lookup by id.
    pub fn sub_scene_mut(&mut self, id: &SubSceneId) -> Option<&mut SubScene> {
        self.sub_scenes.iter_mut().find(|s| &s.id == id)
    }
}

/// Payload of a `Description` node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DescriptionData {
    pub title: String,
    #[serde(default)]
    pub body: String,
    /// Scene that spawned this node.
    #[serde(default)]
    pub parent_scene: Option<NodeId>,
    /// Sub-scenes currently served by this node.
    #[serde(default)]
    pub linked_sub_scenes: Vec<SubSceneId>,
    /// Shared across all sub-scenes of the parent scene, vs exclusive to one.
    #[serde(default)]
    pub is_shared: bool,
}

impl DescriptionData {
    /// Drop a sub-scene from the served set.
    pub fn unlink_sub_scene(&mut self, id: &SubSceneId) {
        self.linked_sub_scenes.retain(|s| s != id);
    }
}

/// Type-specific node payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "payload", rename_all = "kebab-case")]
pub enum NodePayload {
    /// Start/end/guide nodes carry only a title.
    Flow { title: String },
    /// Scene nodes carry the sub-scene list and shared-description flags.
    Scene(SceneData),
    /// Description nodes carry their linkage bookkeeping.
    Description(DescriptionData),
}

/// A node in the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub position: Position,
    pub payload: NodePayload,
}

impl Node {
    /// Construct a node from its parts.
    pub fn new(id: NodeId, kind: NodeKind, position: Position, payload: NodePayload) -> Self {
        Self {
            id,
            kind,
            position,
            payload,
        }
    }

    /// Node title regardless of payload shape.
    #[must_use]
    pub fn title(&self) -> &str {
        match &self.payload {
            NodePayload::Flow { title } => title,
            NodePayload::Scene(data) => &data.title,
            NodePayload::Description(data) => &data.title,
        }
    }

    /// Scene payload accessor.
    #[must_use]
    pub fn scene(&self) -> Option<&SceneData> {
        match &self.payload {
            NodePayload::Scene(data) => Some(data),
            _ => None,
        }
    }

    /// Mutable scene payload accessor.
    pub fn scene_mut(&mut self) -> Option<&mut SceneData> {
        match &mut self.payload {
            NodePayload::Scene(data) => Some(data),
            _ => None,
        }
    }

    /// Description payload accessor.
    #[must_use]
    pub fn description(&self) -> Option<&DescriptionData> {
        match &self.payload {
            NodePayload::Description(data) => Some(data),
            _ => None,
        }
    }

    /// Mutable description payload accessor.
    pub fn description_mut(&mut self) -> Option<&mut DescriptionData> {
        match &mut self.payload {
            NodePayload::Description(data) => Some(data),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tags_are_kebab_case() {
        assert_eq!(NodeKind::BigScene.as_str(), "big-scene");
        assert_eq!(
            serde_json::to_string(&NodeKind::EnterGuide).unwrap(),
            "\"enter-guide\""
        );
    }

    #[test]
    fn description_is_not_structural() {
        assert!(!NodeKind::Description.is_structural());
        assert!(NodeKind::BigScene.is_structural());
        assert!(NodeKind::End.is_structural());
    }

    #[test]
    fn sub_scene_link_and_clear() {
        let mut sub = SubScene::new("sub_1", "Scene 1");
        assert!(!sub.is_linked());

        sub.link_to(NodeId::new("desc_1"), true);
        assert!(sub.has_description);
        assert!(sub.is_description_shared);
        assert_eq!(sub.linked_description_node, Some(NodeId::new("desc_1")));

        sub.clear_link();
        assert!(!sub.has_description);
        assert!(!sub.is_description_shared);
        assert_eq!(sub.linked_description_node, None);
    }

    #[test]
    fn scene_sub_scene_lookup() {
        let mut data = SceneData::new("Scene");
        data.sub_scenes.push(SubScene::new("sub_1", "one"));
        data.sub_scenes.push(SubScene::new("sub_2", "two"));

        assert_eq!(
            data.sub_scene(&SubSceneId::new("sub_2")).map(|s| s.name.as_str()),
            Some("two")
        );
        assert!(data.sub_scene(&SubSceneId::new("missing")).is_none());
    }

    #[test]
    fn node_payload_accessors() {
        let node = Node::new(
            NodeId::new("scene_1"),
            NodeKind::BigScene,
            Position::default(),
            NodePayload::Scene(SceneData::new("Scene 1")),
        );

        assert_eq!(node.title(), "Scene 1");
        assert!(node.scene().is_some());
        assert!(node.description().is_none());
    }
}
