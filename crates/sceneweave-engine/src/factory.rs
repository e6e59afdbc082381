//! Node factory
//!
//! Builds node instances from catalog metadata. The catalog decides the
//! default title and payload shape; callers refine via [`NodeFactory::create_with`].

use crate::error::CatalogError;
use sceneweave_graph::{
    DescriptionData, Node, NodeId, NodeKind, NodePayload, Position, SceneData,
};
use sceneweave_rules::NodeCatalog;

/// Creates nodes of registered types.
#[derive(Debug, Clone, Copy)]
pub struct NodeFactory<'a> {
    catalog: &'a NodeCatalog,
}

impl<'a> NodeFactory<'a> {
    /// Factory over a catalog.
    #[must_use]
    pub fn new(catalog: &'a NodeCatalog) -> Self {
        Self { catalog }
    }

    /// Instantiate a node of `kind` at `position`.
    pub fn create(&self, kind: NodeKind, position: Position) -> Result<Node, CatalogError> {
        let entry = self
            .catalog
            .lookup(kind)
            .ok_or(CatalogError::UnknownType(kind))?;
        let title = entry.display.name.clone();

        let payload = match kind {
            NodeKind::BigScene => NodePayload::Scene(SceneData::new(title)),
            NodeKind::Description => NodePayload::Description(DescriptionData {
                title,
                ..DescriptionData::default()
            }),
            _ => NodePayload::Flow { title },
        };

        Ok(Node::new(
            NodeId::generate(kind.as_str()),
            kind,
            position,
            payload,
        ))
    }

    /// Instantiate and then adjust the node before handing it back.
    pub fn create_with(
        &self,
        kind: NodeKind,
        position: Position,
        f: impl FnOnce(&mut Node),
    ) -> Result<Node, CatalogError> {
        let mut node = self.create(kind, position)?;
        f(&mut node);
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sceneweave_graph::SubScene;

    #[test]
    fn creates_flow_node_with_display_title() {
        let catalog = NodeCatalog::with_defaults();
        let factory = NodeFactory::new(&catalog);

        let node = factory
            .create(NodeKind::Start, Position::new(10.0, 20.0))
            .unwrap();

        assert_eq!(node.kind, NodeKind::Start);
        assert_eq!(node.title(), "Start");
        assert!(node.id.as_str().starts_with("start_"));
        assert_eq!(node.position, Position::new(10.0, 20.0));
    }

    #[test]
    fn creates_scene_payload_for_big_scene() {
        let catalog = NodeCatalog::with_defaults();
        let factory = NodeFactory::new(&catalog);

        let node = factory
            .create(NodeKind::BigScene, Position::default())
            .unwrap();

        assert!(node.scene().is_some());
        assert!(node.scene().unwrap().sub_scenes.is_empty());
    }

    #[test]
    fn create_with_refines_payload() {
        let catalog = NodeCatalog::with_defaults();
        let factory = NodeFactory::new(&catalog);

        let node = factory
            .create_with(NodeKind::BigScene, Position::default(), |n| {
                if let Some(data) = n.scene_mut() {
                    data.title = "Act One".to_string();
                    data.sub_scenes.push(SubScene::new("sub_1", "Opening"));
                }
            })
            .unwrap();

        assert_eq!(node.title(), "Act One");
        assert_eq!(node.scene().unwrap().sub_scenes.len(), 1);
    }

    #[test]
    fn unknown_type_is_a_programming_error() {
        let mut catalog = NodeCatalog::with_defaults();
        catalog.unregister(NodeKind::ExitGuide);
        let factory = NodeFactory::new(&catalog);

        assert_eq!(
            factory.create(NodeKind::ExitGuide, Position::default()),
            Err(CatalogError::UnknownType(NodeKind::ExitGuide))
        );
    }
}
