//! Testing fixtures for the sceneweave workspace
//!
//! Shared graph builders used across crate tests and the demo binary.

#![allow(missing_docs)]

use sceneweave_graph::{
    Edge, EdgeId, GraphSnapshot, Node, NodeId, NodeKind, NodePayload, Position, SceneData,
    SubScene,
};

pub fn flow_node(id: &str, kind: NodeKind, title: &str, x: f32, y: f32) -> Node {
    Node::new(
        NodeId::new(id),
        kind,
        Position::new(x, y),
        NodePayload::Flow {
            title: title.to_string(),
        },
    )
}

pub fn scene_node(id: &str, title: &str, sub_scenes: &[(&str, &str)], x: f32, y: f32) -> Node {
    let mut data = SceneData::new(title);
    data.sub_scenes = sub_scenes
        .iter()
        .map(|(sub_id, name)| SubScene::new(*sub_id, *name))
        .collect();
    Node::new(
        NodeId::new(id),
        NodeKind::BigScene,
        Position::new(x, y),
        NodePayload::Scene(data),
    )
}

pub fn plain_edge(id: &str, source: &str, target: &str) -> Edge {
    Edge {
        id: EdgeId::new(id),
        ..Edge::structural(NodeId::new(source), NodeId::new(target))
    }
}

/// The stock demo workflow: a start node leading through an enter guide
/// into a scene with two sub-scenes, a follow-up scene, and an exit guide
/// into the end node.
#[must_use]
pub fn demo_workflow() -> GraphSnapshot {
    GraphSnapshot::new(
        vec![
            flow_node("start_0", NodeKind::Start, "Start", 100.0, 200.0),
            flow_node("enter_guide_1", NodeKind::EnterGuide, "Enter Guide", 350.0, 180.0),
            scene_node(
                "big_scene_1",
                "Big Scene 1",
                &[("sub_1", "Sub-scene 1"), ("sub_2", "Sub-scene 2")],
                600.0,
                100.0,
            ),
            scene_node("big_scene_2", "Big Scene 2", &[], 850.0, 80.0),
            flow_node("exit_guide_1", NodeKind::ExitGuide, "Exit Guide", 600.0, 280.0),
            flow_node("end_0", NodeKind::End, "End", 850.0, 260.0),
        ],
        vec![
            plain_edge("edge_1", "start_0", "enter_guide_1"),
            plain_edge("edge_2", "enter_guide_1", "big_scene_1"),
            plain_edge("edge_3", "big_scene_1", "big_scene_2"),
            plain_edge("edge_4", "big_scene_1", "exit_guide_1"),
            plain_edge("edge_5", "exit_guide_1", "end_0"),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_workflow_shape() {
        let document = demo_workflow();
        assert_eq!(document.node_count(), 6);
        assert_eq!(document.edge_count(), 5);

        let scene = document
            .nodes
            .iter()
            .find(|n| n.id == NodeId::new("big_scene_1"))
            .unwrap();
        assert_eq!(scene.scene().unwrap().sub_scenes.len(), 2);
    }
}
