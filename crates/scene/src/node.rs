//! Arena-backed scene graph.
//!
//! Nodes live in a flat `Vec` and reference their parent by index, so the
//! upward walk used by the interaction resolver is plain index-chasing with a
//! fixed depth bound instead of pointer traversal over a cyclic-capable
//! hierarchy.

use flatwalk_core::{Interactable, RoomId};
use glam::{Mat4, Quat, Vec3};

use crate::raycast::Aabb;

/// Upper bound on ancestor-walk depth. Guarantees termination even if a
/// parent chain is malformed.
pub const MAX_WALK_DEPTH: usize = 32;

/// Index of a node within one room's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Identity of a node across rooms; keys cooldown and pulse bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey {
    /// Room the node belongs to.
    pub room: RoomId,
    /// Node index within that room.
    pub node: NodeId,
}

/// Hit-testable geometry carried by a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Axis-aligned box given by local half extents.
    Box {
        /// Half extents along x/y/z before the node transform.
        half_extents: Vec3,
    },
}

/// One node in a room's arena.
#[derive(Debug, Clone)]
pub struct Node {
    /// Parent index, `None` for roots.
    pub parent: Option<NodeId>,
    /// Debug name ("floor", "bed", "bed/mattress", ...).
    pub name: String,
    /// Local translation.
    pub translation: Vec3,
    /// Local rotation about the Y axis, radians.
    pub yaw: f32,
    /// Local per-axis scale.
    pub scale: Vec3,
    /// Hit-testable geometry, `None` for pure grouping nodes.
    pub shape: Option<Shape>,
    /// Flat display color (linear RGB).
    pub color: [f32; 3],
    /// Interaction metadata, usually on decoration group roots.
    pub interactable: Option<Interactable>,
}

impl Node {
    /// Create a grouping node with no geometry.
    pub fn group(name: impl Into<String>, translation: Vec3) -> Self {
        Self {
            parent: None,
            name: name.into(),
            translation,
            yaw: 0.0,
            scale: Vec3::ONE,
            shape: None,
            color: [1.0, 1.0, 1.0],
            interactable: None,
        }
    }

    /// Create an axis-aligned box node.
    pub fn boxed(
        name: impl Into<String>,
        translation: Vec3,
        half_extents: Vec3,
        color: [f32; 3],
    ) -> Self {
        Self {
            parent: None,
            name: name.into(),
            translation,
            yaw: 0.0,
            scale: Vec3::ONE,
            shape: Some(Shape::Box { half_extents }),
            color,
            interactable: None,
        }
    }

    /// Local transform matrix.
    pub fn local_transform(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale,
            Quat::from_rotation_y(self.yaw),
            self.translation,
        )
    }
}

/// Flat arena of nodes for one room.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<Node>,
}

impl SceneGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a root node, returning its id.
    pub fn add_root(&mut self, node: Node) -> NodeId {
        debug_assert!(node.parent.is_none());
        self.nodes.push(node);
        NodeId(self.nodes.len() as u32 - 1)
    }

    /// Insert a child of `parent`, returning its id.
    pub fn add_child(&mut self, parent: NodeId, mut node: Node) -> NodeId {
        debug_assert!((parent.0 as usize) < self.nodes.len());
        node.parent = Some(parent);
        self.nodes.push(node);
        NodeId(self.nodes.len() as u32 - 1)
    }

    /// Borrow a node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    /// Mutably borrow a node.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize)
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true when the arena holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over `(id, node)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId(i as u32), n))
    }

    /// World transform of a node (product of the ancestor chain).
    pub fn world_transform(&self, id: NodeId) -> Mat4 {
        let mut chain = Vec::new();
        let mut cursor = Some(id);
        for _ in 0..MAX_WALK_DEPTH {
            let Some(current) = cursor else { break };
            let Some(node) = self.node(current) else {
                break;
            };
            chain.push(node.local_transform());
            cursor = node.parent;
        }
        chain
            .into_iter()
            .rev()
            .fold(Mat4::IDENTITY, |acc, local| acc * local)
    }

    /// World-space bounding box of a node's shape, if it has one.
    pub fn world_aabb(&self, id: NodeId) -> Option<Aabb> {
        let node = self.node(id)?;
        let Shape::Box { half_extents } = node.shape?;
        let transform = self.world_transform(id);
        Some(Aabb::from_transformed_box(half_extents, &transform))
    }

    /// Walk up from `start` (inclusive) to the first node carrying an
    /// [`Interactable`]. Depth-bounded; returns `None` when the chain is
    /// exhausted.
    pub fn nearest_interactable(&self, start: NodeId) -> Option<NodeId> {
        let mut cursor = Some(start);
        for _ in 0..MAX_WALK_DEPTH {
            let current = cursor?;
            let node = self.node(current)?;
            if node.interactable.is_some() {
                return Some(current);
            }
            cursor = node.parent;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_world_transform_includes_parent_translation() {
        let mut graph = SceneGraph::new();
        let root = graph.add_root(Node::group("decor", Vec3::new(2.0, 0.0, 0.0)));
        let child = graph.add_child(
            root,
            Node::boxed("part", Vec3::new(0.0, 1.0, 0.0), Vec3::splat(0.5), [1.0; 3]),
        );

        let world = graph.world_transform(child);
        let origin = world.transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(2.0, 1.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn interactable_walk_stops_at_first_carrier() {
        let mut graph = SceneGraph::new();
        let mut outer = Node::group("outer", Vec3::ZERO);
        outer.interactable = Some(Interactable::new(1, 100));
        let outer = graph.add_root(outer);

        let mut inner = Node::group("inner", Vec3::ZERO);
        inner.interactable = Some(Interactable::new(2, 200));
        let inner = graph.add_child(outer, inner);

        let leaf = graph.add_child(
            inner,
            Node::boxed("leaf", Vec3::ZERO, Vec3::ONE, [1.0; 3]),
        );

        // The nearest carrier wins, not a farther ancestor.
        assert_eq!(graph.nearest_interactable(leaf), Some(inner));
    }

    #[test]
    fn interactable_walk_returns_none_on_bare_chain() {
        let mut graph = SceneGraph::new();
        let root = graph.add_root(Node::group("root", Vec3::ZERO));
        let leaf = graph.add_child(
            root,
            Node::boxed("leaf", Vec3::ZERO, Vec3::ONE, [1.0; 3]),
        );
        assert_eq!(graph.nearest_interactable(leaf), None);
    }

    #[test]
    fn interactable_walk_terminates_on_malformed_parent_link() {
        let mut graph = SceneGraph::new();
        let a = graph.add_root(Node::group("a", Vec3::ZERO));
        // Force a self-referential parent; the depth bound must still end the walk.
        graph.node_mut(a).unwrap().parent = Some(a);
        assert_eq!(graph.nearest_interactable(a), None);
    }
}
