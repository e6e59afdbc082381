//! Cycle detection over structural edges

use sceneweave_graph::{Edge, GraphStore, NodeId};
use std::collections::{HashMap, HashSet};

/// Whether an edge participates in scene flow.
///
/// Description links are a bipartite relation: any edge leaving a sub-scene
/// handle, or landing on a description node, is excluded from cycle checks.
#[must_use]
pub fn is_structural_edge(store: &GraphStore, edge: &Edge) -> bool {
    if edge.has_sub_scene_handle() {
        return false;
    }
    store
        .node(&edge.target)
        .map_or(true, |n| n.kind.is_structural())
}

/// Would adding `source -> target` close a cycle?
///
/// Iterative depth-first search from `target` over existing structural
/// edges; a cycle forms exactly when `source` is reachable. Visited-set
/// guarantees termination, O(V+E).
#[must_use]
pub fn would_create_cycle(store: &GraphStore, source: &NodeId, target: &NodeId) -> bool {
    // One pass over the edge set up front keeps the walk linear.
    let mut adjacency: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
    for edge in store.edges() {
        if is_structural_edge(store, &edge) {
            adjacency.entry(edge.source).or_default().push(edge.target);
        }
    }

    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut stack = vec![target.clone()];

    while let Some(current) = stack.pop() {
        if &current == source {
            return true;
        }
        if !visited.insert(current.clone()) {
            continue;
        }
        if let Some(next) = adjacency.get(&current) {
            for node in next {
                if !visited.contains(node) {
                    stack.push(node.clone());
                }
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use sceneweave_graph::{Node, NodeKind, NodePayload, Position, SubSceneId};

    fn flow_node(id: &str, kind: NodeKind) -> Node {
        Node::new(
            NodeId::new(id),
            kind,
            Position::default(),
            NodePayload::Flow {
                title: id.to_string(),
            },
        )
    }

    fn chain_store(ids: &[&str]) -> GraphStore {
        let store = GraphStore::new();
        store.add_nodes(ids.iter().map(|id| flow_node(id, NodeKind::BigScene)));
        store.add_edges(
            ids.windows(2)
                .map(|w| Edge::structural(NodeId::new(w[0]), NodeId::new(w[1]))),
        );
        store
    }

    #[test]
    fn direct_back_edge_is_a_cycle() {
        let store = chain_store(&["a", "b"]);
        assert!(would_create_cycle(&store, &NodeId::new("b"), &NodeId::new("a")));
    }

    #[test]
    fn long_chain_back_edge_is_a_cycle() {
        let store = chain_store(&["a", "b", "c", "d"]);
        assert!(would_create_cycle(&store, &NodeId::new("d"), &NodeId::new("a")));
    }

    #[test]
    fn forward_and_sibling_edges_are_fine() {
        let store = chain_store(&["a", "b", "c"]);
        assert!(!would_create_cycle(&store, &NodeId::new("a"), &NodeId::new("c")));

        store.add_nodes([flow_node("side", NodeKind::BigScene)]);
        assert!(!would_create_cycle(
            &store,
            &NodeId::new("side"),
            &NodeId::new("b")
        ));
    }

    #[test]
    fn description_links_do_not_close_cycles() {
        let store = GraphStore::new();
        store.add_nodes([
            flow_node("scene", NodeKind::BigScene),
            flow_node("next", NodeKind::BigScene),
        ]);
        store.add_nodes([Node::new(
            NodeId::new("desc"),
            NodeKind::Description,
            Position::default(),
            NodePayload::Description(sceneweave_graph::DescriptionData::default()),
        )]);

        store.add_edges([
            Edge::structural(NodeId::new("scene"), NodeId::new("next")),
            Edge::description_link(
                NodeId::new("next"),
                SubSceneId::new("sub_1"),
                NodeId::new("desc"),
                false,
            ),
        ]);

        // Even if a hypothetical edge desc -> scene existed in a corrupted
        // graph, the link edge out of `next` must not extend the walk.
        let link = store.edges_into(&NodeId::new("desc")).pop().unwrap();
        assert!(!is_structural_edge(&store, &link));
        assert!(!would_create_cycle(
            &store,
            &NodeId::new("desc"),
            &NodeId::new("scene")
        ));
    }
}
