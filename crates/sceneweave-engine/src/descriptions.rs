//! Linked-description lifecycle
//!
//! Keeps auxiliary description nodes and their link edges consistent with
//! sub-scene and scene state. A sub-scene links to at most one description
//! node; a description node with no incoming edges must not survive the
//! operation that orphaned it.
//!
//! Reactive cleanup after edge removal is a two-phase contract: the caller
//! captures the removed edge's endpoint data *before* the removal
//! completes, [`DescriptionManager::reconcile_removed_edge`] updates the
//! linkage bookkeeping and names the orphan candidate, and the caller
//! performs the node deletion. The manager never deletes nodes mid-batch.

use crate::error::LifecycleError;
use sceneweave_graph::{
    DescriptionData, Edge, EdgeId, GraphStore, Handle, Node, NodeId, NodeKind, NodePayload,
    SubScene, SubSceneId,
};
use tracing::{info, warn};

/// Horizontal offset of generated description nodes from their scene.
const DESCRIPTION_OFFSET_X: f32 = 300.0;
/// Vertical spacing between description nodes of consecutive sub-scenes.
const DESCRIPTION_SPACING_Y: f32 = 120.0;

/// Orchestrates creation, re-linking, and deletion of description nodes.
#[derive(Debug, Clone, Copy)]
pub struct DescriptionManager<'a> {
    store: &'a GraphStore,
}

impl<'a> DescriptionManager<'a> {
    /// Manager over a store.
    #[must_use]
    pub fn new(store: &'a GraphStore) -> Self {
        Self { store }
    }

    /// Create an exclusive description node for one sub-scene.
    ///
    /// Any previous link of that sub-scene (exclusive or shared) is torn
    /// down; the old target is garbage-collected if the removed edge was
    /// its last incoming one. Returns the created node.
    pub fn generate_exclusive(
        &self,
        scene_id: &NodeId,
        sub_scene_index: usize,
    ) -> Result<Node, LifecycleError> {
        let (scene, sub) = self.scene_and_sub(scene_id, sub_scene_index)?;
        let sub_id = sub.id.clone();

        let node = Node::new(
            NodeId::generate(NodeKind::Description.as_str()),
            NodeKind::Description,
            scene.position.offset(
                DESCRIPTION_OFFSET_X,
                sub_scene_index as f32 * DESCRIPTION_SPACING_Y,
            ),
            NodePayload::Description(DescriptionData {
                title: format!("{} - description", sub.name),
                body: String::new(),
                parent_scene: Some(scene_id.clone()),
                linked_sub_scenes: vec![sub_id.clone()],
                is_shared: false,
            }),
        );
        self.store.add_nodes([node.clone()]);

        self.unlink_previous(scene_id, &sub);

        self.store.add_edges([Edge::description_link(
            scene_id.clone(),
            sub_id.clone(),
            node.id.clone(),
            false,
        )]);

        let node_id = node.id.clone();
        let _ = self.store.update_node(scene_id, |n| {
            if let Some(s) = n
                .scene_mut()
                .and_then(|d| d.sub_scenes.get_mut(sub_scene_index))
            {
                s.link_to(node_id, false);
            }
        });

        info!(scene = %scene_id, sub_scene = %sub_id, node = %node.id,
              "created exclusive description node");
        Ok(node)
    }

    /// Create one shared description node serving every sub-scene of a scene.
    ///
    /// Fails without mutation when the scene has no sub-scenes. Each
    /// sub-scene's previous link is torn down the same way as in
    /// [`Self::generate_exclusive`], then re-pointed at the single shared
    /// node. Scene-level shared flags are set last.
    pub fn generate_shared(&self, scene_id: &NodeId) -> Result<Node, LifecycleError> {
        let scene = self.scene_node(scene_id)?;
        let subs = scene
            .scene()
            .ok_or_else(|| LifecycleError::NotAScene(scene_id.clone()))?
            .sub_scenes
            .clone();
        if subs.is_empty() {
            return Err(LifecycleError::NoSubScenes(scene_id.clone()));
        }

        let node = Node::new(
            NodeId::generate(NodeKind::Description.as_str()),
            NodeKind::Description,
            scene.position.offset(DESCRIPTION_OFFSET_X, 0.0),
            NodePayload::Description(DescriptionData {
                title: format!("{} - shared description", scene.title()),
                body: String::new(),
                parent_scene: Some(scene_id.clone()),
                linked_sub_scenes: subs.iter().map(|s| s.id.clone()).collect(),
                is_shared: true,
            }),
        );
        self.store.add_nodes([node.clone()]);

        for (index, sub) in subs.iter().enumerate() {
            self.unlink_previous(scene_id, sub);

            self.store.add_edges([Edge::description_link(
                scene_id.clone(),
                sub.id.clone(),
                node.id.clone(),
                true,
            )]);

            let node_id = node.id.clone();
            let _ = self.store.update_node(scene_id, |n| {
                if let Some(s) = n.scene_mut().and_then(|d| d.sub_scenes.get_mut(index)) {
                    s.link_to(node_id, true);
                }
            });
        }

        let node_id = node.id.clone();
        let _ = self.store.update_node(scene_id, |n| {
            if let Some(data) = n.scene_mut() {
                data.has_shared_description = true;
                data.shared_description_node = Some(node_id);
            }
        });

        info!(scene = %scene_id, node = %node.id, sub_scenes = subs.len(),
              "created shared description node");
        Ok(node)
    }

    /// Remove one sub-scene's description link.
    ///
    /// Warns and returns `false` when the sub-scene has no link. The target
    /// node is deleted only once its last incoming edge is gone.
    pub fn remove_exclusive(
        &self,
        scene_id: &NodeId,
        sub_scene_index: usize,
    ) -> Result<bool, LifecycleError> {
        let (_, sub) = self.scene_and_sub(scene_id, sub_scene_index)?;

        let Some(target) = sub.linked_description_node.clone() else {
            warn!(scene = %scene_id, index = sub_scene_index,
                  "sub-scene has no linked description");
            return Ok(false);
        };

        self.remove_link_edges(scene_id, &sub.id, &target);
        if self.store.incoming_total(&target) == 0 {
            self.store.remove_nodes(std::slice::from_ref(&target));
            info!(node = %target, "deleted orphaned description node");
        }

        let _ = self.store.update_node(scene_id, |n| {
            if let Some(s) = n
                .scene_mut()
                .and_then(|d| d.sub_scenes.get_mut(sub_scene_index))
            {
                s.clear_link();
            }
        });

        info!(scene = %scene_id, sub_scene = %sub.id, "removed description link");
        Ok(true)
    }

    /// Remove a scene's shared description node and every edge into it.
    ///
    /// Warns and returns `false` when the scene has no shared node. The
    /// shared node is deleted unconditionally.
    pub fn remove_shared(&self, scene_id: &NodeId) -> Result<bool, LifecycleError> {
        let scene = self.scene_node(scene_id)?;
        let data = scene
            .scene()
            .ok_or_else(|| LifecycleError::NotAScene(scene_id.clone()))?;

        let Some(shared) = data.shared_description_node.clone() else {
            warn!(scene = %scene_id, "scene has no shared description");
            return Ok(false);
        };

        let sub_handles: Vec<Handle> = data
            .sub_scenes
            .iter()
            .map(|s| Handle::sub_scene(&s.id))
            .collect();
        let edges: Vec<EdgeId> = self
            .store
            .find_edges(|e| {
                e.target == shared
                    && &e.source == scene_id
                    && e.source_handle
                        .as_ref()
                        .is_some_and(|h| sub_handles.contains(h))
            })
            .into_iter()
            .map(|e| e.id)
            .collect();
        if !edges.is_empty() {
            self.store.remove_edges(&edges);
        }

        self.store.remove_nodes(std::slice::from_ref(&shared));

        let _ = self.store.update_node(scene_id, |n| {
            if let Some(data) = n.scene_mut() {
                for sub in &mut data.sub_scenes {
                    if sub.linked_description_node.as_ref() == Some(&shared) {
                        sub.clear_link();
                    }
                }
                data.has_shared_description = false;
                data.shared_description_node = None;
            }
        });

        info!(scene = %scene_id, node = %shared, "removed shared description node");
        Ok(true)
    }

    /// Reactive cleanup after an edge was removed.
    ///
    /// `removed` is the edge's data captured before removal completed; the
    /// live edge set may or may not still contain it, so every remaining-
    /// connection query excludes it by id. Returns the id of a description
    /// node that is now orphaned and must be deleted by the caller.
    ///
    /// Edges that are not sub-scene-to-description links are ignored, as is
    /// any link whose scene, description node, or sub-scene record has
    /// already vanished.
    #[must_use]
    pub fn reconcile_removed_edge(&self, removed: &Edge) -> Option<NodeId> {
        let sub_id = removed.sub_scene_id()?;
        let scene = self.store.node(&removed.source)?;
        let description = self.store.node(&removed.target)?;
        if description.kind != NodeKind::Description {
            return None;
        }
        let sub = scene.scene()?.sub_scene(&sub_id)?.clone();

        // The edge payload knows whether the link was shared; fall back to
        // the sub-scene's flag for edges created before the payload existed.
        let was_shared = removed
            .link
            .as_ref()
            .map_or(sub.is_description_shared, |l| l.is_shared);

        let _ = self.store.update_node(&removed.source, |n| {
            if let Some(s) = n.scene_mut().and_then(|d| d.sub_scene_mut(&sub_id)) {
                s.clear_link();
            }
        });

        let mut orphan = None;
        if was_shared {
            let remaining_from_scene = self.store.find_edges(|e| {
                e.id != removed.id
                    && e.target == removed.target
                    && e.source == removed.source
                    && e.source_handle.as_ref().is_some_and(Handle::is_sub_scene)
            });

            if remaining_from_scene.is_empty() {
                let _ = self.store.update_node(&removed.source, |n| {
                    if let Some(data) = n.scene_mut() {
                        data.has_shared_description = false;
                        data.shared_description_node = None;
                    }
                });

                if self.remaining_incoming(removed) == 0 {
                    orphan = Some(removed.target.clone());
                }
            }
            info!(scene = %removed.source, sub_scene = %sub_id,
                  "cleared shared description link");
        } else if self.remaining_incoming(removed) == 0 {
            orphan = Some(removed.target.clone());
            info!(scene = %removed.source, sub_scene = %sub_id,
                  "cleared exclusive description link; node orphaned");
        } else {
            info!(scene = %removed.source, sub_scene = %sub_id,
                  "cleared exclusive description link");
        }

        let _ = self.store.update_node(&removed.target, |n| {
            if let Some(data) = n.description_mut() {
                data.unlink_sub_scene(&sub_id);
            }
        });

        orphan
    }

    /// Batch variant of [`Self::reconcile_removed_edge`].
    ///
    /// Returns the deduplicated set of nodes the caller must delete once
    /// the whole batch has been processed.
    #[must_use]
    pub fn reconcile_removed_edges(&self, removed: &[Edge]) -> Vec<NodeId> {
        let mut orphans = Vec::new();
        for edge in removed {
            if let Some(id) = self.reconcile_removed_edge(edge) {
                if !orphans.contains(&id) {
                    orphans.push(id);
                }
            }
        }
        orphans
    }

    /// Point a sub-scene at an existing description node.
    ///
    /// Backs the manual connection path once the rule engine's sub-protocol
    /// has allowed it: adds the link edge and keeps the sub-scene fields
    /// and the node's served set in agreement (shared-ness mirrors the
    /// target node).
    pub fn attach_sub_scene(
        &self,
        scene_id: &NodeId,
        sub_scene: &SubSceneId,
        description_id: &NodeId,
    ) -> Result<EdgeId, LifecycleError> {
        let description = self
            .store
            .node(description_id)
            .ok_or_else(|| LifecycleError::DescriptionMissing(description_id.clone()))?;
        let shared = description.description().is_some_and(|d| d.is_shared);

        let edge = Edge::description_link(
            scene_id.clone(),
            sub_scene.clone(),
            description_id.clone(),
            shared,
        );
        let edge_id = edge.id.clone();
        self.store.add_edges([edge]);

        let node_id = description_id.clone();
        let _ = self.store.update_node(scene_id, |n| {
            if let Some(s) = n.scene_mut().and_then(|d| d.sub_scene_mut(sub_scene)) {
                s.link_to(node_id, shared);
            }
        });
        let sub_id = sub_scene.clone();
        let _ = self.store.update_node(description_id, |n| {
            if let Some(data) = n.description_mut() {
                if !data.linked_sub_scenes.contains(&sub_id) {
                    data.linked_sub_scenes.push(sub_id);
                }
            }
        });

        Ok(edge_id)
    }

    // Tear down a sub-scene's previous link, garbage-collecting the old
    // target when the removed edge was its last incoming one.
    fn unlink_previous(&self, scene_id: &NodeId, sub: &SubScene) {
        let Some(old) = sub.linked_description_node.clone() else {
            return;
        };
        self.remove_link_edges(scene_id, &sub.id, &old);
        if self.store.incoming_total(&old) == 0 {
            self.store.remove_nodes(std::slice::from_ref(&old));
            info!(node = %old, "deleted orphaned description node");
        }
    }

    fn remove_link_edges(&self, scene_id: &NodeId, sub: &SubSceneId, target: &NodeId) {
        let handle = Handle::sub_scene(sub);
        let edges: Vec<EdgeId> = self
            .store
            .find_edges(|e| {
                &e.source == scene_id
                    && e.source_handle.as_ref() == Some(&handle)
                    && &e.target == target
            })
            .into_iter()
            .map(|e| e.id)
            .collect();
        if !edges.is_empty() {
            self.store.remove_edges(&edges);
        }
    }

    // Incoming edges of the removed edge's target, the removed edge itself
    // excluded in case it is still present.
    fn remaining_incoming(&self, removed: &Edge) -> usize {
        self.store
            .find_edges(|e| e.id != removed.id && e.target == removed.target)
            .len()
    }

    fn scene_node(&self, scene_id: &NodeId) -> Result<Node, LifecycleError> {
        let node = self
            .store
            .node(scene_id)
            .ok_or_else(|| LifecycleError::SceneMissing(scene_id.clone()))?;
        if node.scene().is_none() {
            return Err(LifecycleError::NotAScene(scene_id.clone()));
        }
        Ok(node)
    }

    fn scene_and_sub(
        &self,
        scene_id: &NodeId,
        index: usize,
    ) -> Result<(Node, SubScene), LifecycleError> {
        let scene = self.scene_node(scene_id)?;
        let sub = scene
            .scene()
            .and_then(|d| d.sub_scenes.get(index))
            .cloned()
            .ok_or_else(|| LifecycleError::SubSceneOutOfRange {
                scene: scene_id.clone(),
                index,
            })?;
        Ok((scene, sub))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sceneweave_graph::{Position, SceneData};

    fn scene_with_subs(id: &str, subs: &[&str]) -> Node {
        let mut data = SceneData::new(id);
        data.sub_scenes = subs.iter().map(|s| SubScene::new(*s, *s)).collect();
        Node::new(
            NodeId::new(id),
            NodeKind::BigScene,
            Position::new(100.0, 200.0),
            NodePayload::Scene(data),
        )
    }

    fn store_with_scene(subs: &[&str]) -> GraphStore {
        let store = GraphStore::new();
        store.add_nodes([scene_with_subs("scene", subs)]);
        store
    }

    fn sub_state(store: &GraphStore, scene: &str, index: usize) -> SubScene {
        store
            .node(&NodeId::new(scene))
            .unwrap()
            .scene()
            .unwrap()
            .sub_scenes[index]
            .clone()
    }

    #[test]
    fn generate_exclusive_links_one_sub_scene() {
        let store = store_with_scene(&["sub_1", "sub_2"]);
        let manager = DescriptionManager::new(&store);

        let node = manager
            .generate_exclusive(&NodeId::new("scene"), 0)
            .unwrap();

        let data = node.description().unwrap();
        assert!(!data.is_shared);
        assert_eq!(data.linked_sub_scenes, vec![SubSceneId::new("sub_1")]);
        assert_eq!(data.parent_scene, Some(NodeId::new("scene")));
        assert_eq!(node.position, Position::new(400.0, 200.0));

        let sub = sub_state(&store, "scene", 0);
        assert!(sub.has_description);
        assert_eq!(sub.linked_description_node, Some(node.id.clone()));
        assert!(!sub.is_description_shared);

        assert_eq!(store.incoming_total(&node.id), 1);
        let untouched = sub_state(&store, "scene", 1);
        assert!(!untouched.has_description);
    }

    #[test]
    fn generate_exclusive_replaces_previous_node() {
        let store = store_with_scene(&["sub_1"]);
        let manager = DescriptionManager::new(&store);

        let first = manager
            .generate_exclusive(&NodeId::new("scene"), 0)
            .unwrap();
        let second = manager
            .generate_exclusive(&NodeId::new("scene"), 0)
            .unwrap();

        // Old node lost its only incoming edge and was collected.
        assert!(store.node(&first.id).is_none());
        assert!(store.node(&second.id).is_some());
        assert_eq!(store.incoming_total(&second.id), 1);
        assert_eq!(
            sub_state(&store, "scene", 0).linked_description_node,
            Some(second.id)
        );
    }

    #[test]
    fn generate_exclusive_rejects_bad_index() {
        let store = store_with_scene(&["sub_1"]);
        let manager = DescriptionManager::new(&store);

        let result = manager.generate_exclusive(&NodeId::new("scene"), 5);
        assert_eq!(
            result.unwrap_err(),
            LifecycleError::SubSceneOutOfRange {
                scene: NodeId::new("scene"),
                index: 5,
            }
        );
        // No mutation happened.
        assert_eq!(store.node_count(), 1);
        assert_eq!(store.edge_count(), 0);
    }

    #[test]
    fn generate_shared_links_every_sub_scene() {
        // Scenario: two unlinked sub-scenes gain one shared node and an
        // edge each, and the scene-level flags are set.
        let store = store_with_scene(&["sub_1", "sub_2"]);
        let manager = DescriptionManager::new(&store);

        let node = manager.generate_shared(&NodeId::new("scene")).unwrap();

        let data = node.description().unwrap();
        assert!(data.is_shared);
        assert_eq!(
            data.linked_sub_scenes,
            vec![SubSceneId::new("sub_1"), SubSceneId::new("sub_2")]
        );

        assert_eq!(store.incoming_total(&node.id), 2);
        for index in 0..2 {
            let sub = sub_state(&store, "scene", index);
            assert!(sub.has_description);
            assert!(sub.is_description_shared);
            assert_eq!(sub.linked_description_node, Some(node.id.clone()));
        }

        let scene = store.node(&NodeId::new("scene")).unwrap();
        let scene_data = scene.scene().unwrap();
        assert!(scene_data.has_shared_description);
        assert_eq!(scene_data.shared_description_node, Some(node.id.clone()));

        let handles: Vec<_> = store
            .edges_into(&node.id)
            .into_iter()
            .filter_map(|e| e.source_handle)
            .collect();
        assert_eq!(
            handles,
            vec![
                Handle::sub_scene(&SubSceneId::new("sub_1")),
                Handle::sub_scene(&SubSceneId::new("sub_2")),
            ]
        );
    }

    #[test]
    fn generate_shared_requires_sub_scenes() {
        let store = store_with_scene(&[]);
        let manager = DescriptionManager::new(&store);

        assert_eq!(
            manager.generate_shared(&NodeId::new("scene")).unwrap_err(),
            LifecycleError::NoSubScenes(NodeId::new("scene"))
        );
        assert_eq!(store.node_count(), 1);
    }

    #[test]
    fn exclusive_after_shared_keeps_shared_node_alive() {
        // Scenario: shared node D serves sub 1 and 2; generating an
        // exclusive node for sub 1 detaches it from D without deleting D.
        let store = store_with_scene(&["sub_1", "sub_2"]);
        let manager = DescriptionManager::new(&store);

        let shared = manager.generate_shared(&NodeId::new("scene")).unwrap();
        let exclusive = manager
            .generate_exclusive(&NodeId::new("scene"), 0)
            .unwrap();

        assert!(store.node(&shared.id).is_some());
        assert_eq!(store.incoming_total(&shared.id), 1);
        assert_eq!(store.incoming_total(&exclusive.id), 1);

        let sub_1 = sub_state(&store, "scene", 0);
        assert_eq!(sub_1.linked_description_node, Some(exclusive.id.clone()));
        assert!(!sub_1.is_description_shared);

        let sub_2 = sub_state(&store, "scene", 1);
        assert_eq!(sub_2.linked_description_node, Some(shared.id.clone()));
        assert!(sub_2.is_description_shared);
    }

    #[test]
    fn remove_exclusive_collects_orphan() {
        let store = store_with_scene(&["sub_1"]);
        let manager = DescriptionManager::new(&store);
        let node = manager
            .generate_exclusive(&NodeId::new("scene"), 0)
            .unwrap();

        assert_eq!(manager.remove_exclusive(&NodeId::new("scene"), 0), Ok(true));

        assert!(store.node(&node.id).is_none());
        let sub = sub_state(&store, "scene", 0);
        assert!(!sub.has_description);
        assert_eq!(sub.linked_description_node, None);
        assert!(!sub.is_description_shared);
        assert_eq!(store.edge_count(), 0);
    }

    #[test]
    fn remove_exclusive_without_link_is_a_warning_noop() {
        let store = store_with_scene(&["sub_1"]);
        let manager = DescriptionManager::new(&store);

        assert_eq!(manager.remove_exclusive(&NodeId::new("scene"), 0), Ok(false));
        assert_eq!(store.node_count(), 1);
    }

    #[test]
    fn remove_shared_deletes_node_and_clears_flags() {
        let store = store_with_scene(&["sub_1", "sub_2"]);
        let manager = DescriptionManager::new(&store);
        let node = manager.generate_shared(&NodeId::new("scene")).unwrap();

        assert_eq!(manager.remove_shared(&NodeId::new("scene")), Ok(true));

        assert!(store.node(&node.id).is_none());
        assert_eq!(store.edge_count(), 0);
        for index in 0..2 {
            let sub = sub_state(&store, "scene", index);
            assert!(!sub.has_description);
            assert_eq!(sub.linked_description_node, None);
        }
        let scene_data = store.node(&NodeId::new("scene")).unwrap();
        let scene_data = scene_data.scene().unwrap();
        assert!(!scene_data.has_shared_description);
        assert_eq!(scene_data.shared_description_node, None);
    }

    #[test]
    fn remove_shared_without_node_is_a_warning_noop() {
        let store = store_with_scene(&["sub_1"]);
        let manager = DescriptionManager::new(&store);

        assert_eq!(manager.remove_shared(&NodeId::new("scene")), Ok(false));
    }

    #[test]
    fn reconcile_ignores_structural_edges() {
        let store = store_with_scene(&["sub_1"]);
        store.add_nodes([scene_with_subs("other", &[])]);
        let manager = DescriptionManager::new(&store);

        let edge = Edge::structural(NodeId::new("scene"), NodeId::new("other"));
        assert_eq!(manager.reconcile_removed_edge(&edge), None);
    }

    #[test]
    fn reconcile_exclusive_link_signals_orphan() {
        let store = store_with_scene(&["sub_1"]);
        let manager = DescriptionManager::new(&store);
        let node = manager
            .generate_exclusive(&NodeId::new("scene"), 0)
            .unwrap();

        // The UI removes the edge and hands over the captured value.
        let edge = store.edges_into(&node.id).pop().unwrap();
        store.remove_edges(std::slice::from_ref(&edge.id));

        let orphan = manager.reconcile_removed_edge(&edge);
        assert_eq!(orphan, Some(node.id.clone()));

        let sub = sub_state(&store, "scene", 0);
        assert!(!sub.has_description);
        assert_eq!(sub.linked_description_node, None);

        let description = store.node(&node.id).unwrap();
        assert!(description
            .description()
            .unwrap()
            .linked_sub_scenes
            .is_empty());
    }

    #[test]
    fn reconcile_last_shared_link_clears_scene_flags() {
        // Scenario: sub 1 re-linked exclusively, then sub 2's shared edge
        // removed. The shared node loses its last incoming edge, the scene
        // flags clear, and deletion is signalled to the caller.
        let store = store_with_scene(&["sub_1", "sub_2"]);
        let manager = DescriptionManager::new(&store);

        let shared = manager.generate_shared(&NodeId::new("scene")).unwrap();
        manager
            .generate_exclusive(&NodeId::new("scene"), 0)
            .unwrap();

        let edge = store.edges_into(&shared.id).pop().unwrap();
        store.remove_edges(std::slice::from_ref(&edge.id));

        let orphan = manager.reconcile_removed_edge(&edge);
        assert_eq!(orphan, Some(shared.id.clone()));

        let sub_2 = sub_state(&store, "scene", 1);
        assert!(!sub_2.has_description);
        assert_eq!(sub_2.linked_description_node, None);

        let scene = store.node(&NodeId::new("scene")).unwrap();
        let data = scene.scene().unwrap();
        assert!(!data.has_shared_description);
        assert_eq!(data.shared_description_node, None);
    }

    #[test]
    fn reconcile_shared_link_with_remaining_siblings_keeps_node() {
        let store = store_with_scene(&["sub_1", "sub_2"]);
        let manager = DescriptionManager::new(&store);
        let shared = manager.generate_shared(&NodeId::new("scene")).unwrap();

        let edge = store
            .find_edges(|e| {
                e.target == shared.id
                    && e.source_handle
                        == Some(Handle::sub_scene(&SubSceneId::new("sub_1")))
            })
            .pop()
            .unwrap();
        store.remove_edges(std::slice::from_ref(&edge.id));

        assert_eq!(manager.reconcile_removed_edge(&edge), None);

        // Sub 2 still points at the shared node; the scene flags survive.
        let scene = store.node(&NodeId::new("scene")).unwrap();
        let data = scene.scene().unwrap();
        assert!(data.has_shared_description);
        assert_eq!(
            data.sub_scenes[1].linked_description_node,
            Some(shared.id.clone())
        );
        assert_eq!(
            store.node(&shared.id).unwrap().description().unwrap().linked_sub_scenes,
            vec![SubSceneId::new("sub_2")]
        );
    }

    #[test]
    fn reconcile_batch_deduplicates_orphans() {
        let store = store_with_scene(&["sub_1", "sub_2"]);
        let manager = DescriptionManager::new(&store);
        let shared = manager.generate_shared(&NodeId::new("scene")).unwrap();

        let edges = store.edges_into(&shared.id);
        let ids: Vec<EdgeId> = edges.iter().map(|e| e.id.clone()).collect();
        store.remove_edges(&ids);

        let orphans = manager.reconcile_removed_edges(&edges);
        assert_eq!(orphans, vec![shared.id]);
    }

    #[test]
    fn attach_sub_scene_mirrors_shared_flag() {
        let store = store_with_scene(&["sub_1", "sub_2"]);
        let manager = DescriptionManager::new(&store);
        let shared = manager.generate_shared(&NodeId::new("scene")).unwrap();

        // A second scene's sub-scene linking into the same shared node.
        store.add_nodes([scene_with_subs("scene_b", &["sub_b"])]);
        manager
            .attach_sub_scene(
                &NodeId::new("scene_b"),
                &SubSceneId::new("sub_b"),
                &shared.id,
            )
            .unwrap();

        let sub = sub_state(&store, "scene_b", 0);
        assert!(sub.is_description_shared);
        assert_eq!(sub.linked_description_node, Some(shared.id.clone()));
        assert_eq!(store.incoming_total(&shared.id), 3);
        assert!(store
            .node(&shared.id)
            .unwrap()
            .description()
            .unwrap()
            .linked_sub_scenes
            .contains(&SubSceneId::new("sub_b")));
    }
}
