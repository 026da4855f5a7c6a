//! Pointer picking over a room's graph.

use crate::node::{NodeId, SceneGraph};
use crate::raycast::Ray;

/// One ray/box intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Node whose box was hit.
    pub node: NodeId,
    /// Entry distance along the ray.
    pub distance: f32,
}

/// A resolved pointer hit: the node that was struck and the interactable
/// carrier found by walking its ancestor chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerHit {
    /// Node whose geometry the ray struck.
    pub node: NodeId,
    /// Nearest ancestor (inclusive) carrying interaction metadata.
    pub target: NodeId,
    /// Entry distance along the ray.
    pub distance: f32,
}

/// Intersect a ray against every shaped node, nearest first.
pub fn pick(graph: &SceneGraph, ray: &Ray) -> Vec<Hit> {
    let mut hits: Vec<Hit> = graph
        .iter()
        .filter(|(_, node)| node.shape.is_some())
        .filter_map(|(id, _)| {
            graph
                .world_aabb(id)
                .and_then(|aabb| aabb.intersect(ray))
                .map(|distance| Hit { node: id, distance })
        })
        .collect();
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

/// Resolve a pointer ray to an interactable target.
///
/// Only the closest intersection counts: if the nearest struck node has no
/// interactable anywhere in its ancestor chain, the click lands on inert
/// geometry and resolves to nothing.
pub fn resolve(graph: &SceneGraph, ray: &Ray) -> Option<PointerHit> {
    let hits = pick(graph, ray);
    let nearest = hits.first()?;
    let target = graph.nearest_interactable(nearest.node)?;
    Some(PointerHit {
        node: nearest.node,
        target,
        distance: nearest.distance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;
    use flatwalk_core::Interactable;
    use glam::Vec3;

    fn graph_with_decor() -> (SceneGraph, NodeId, NodeId) {
        let mut graph = SceneGraph::new();
        // Inert back wall at z = -5.
        graph.add_root(Node::boxed(
            "wall",
            Vec3::new(0.0, 1.0, -5.0),
            Vec3::new(5.0, 2.0, 0.1),
            [0.9; 3],
        ));
        let mut group = Node::group("chair", Vec3::new(0.0, 0.0, -2.0));
        group.interactable = Some(Interactable::new(5, 2000));
        let group = graph.add_root(group);
        let part = graph.add_child(
            group,
            Node::boxed("seat", Vec3::new(0.0, 0.5, 0.0), Vec3::splat(0.5), [0.6; 3]),
        );
        (graph, group, part)
    }

    #[test]
    fn resolve_walks_part_up_to_group_root() {
        let (graph, group, part) = graph_with_decor();
        let ray = Ray::new(Vec3::new(0.0, 0.5, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = resolve(&graph, &ray).unwrap();
        assert_eq!(hit.node, part);
        assert_eq!(hit.target, group);
    }

    #[test]
    fn nearest_inert_geometry_shadows_decor_behind_it() {
        let (mut graph, _, _) = graph_with_decor();
        // Inert pillar in front of the chair.
        graph.add_root(Node::boxed(
            "pillar",
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.3, 2.0, 0.3),
            [0.8; 3],
        ));
        let ray = Ray::new(Vec3::new(0.0, 0.5, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(resolve(&graph, &ray).is_none());
    }

    #[test]
    fn ray_into_empty_space_resolves_to_nothing() {
        let (graph, _, _) = graph_with_decor();
        let ray = Ray::new(Vec3::new(0.0, 0.5, 5.0), Vec3::new(0.0, 1.0, 0.0));
        assert!(resolve(&graph, &ray).is_none());
    }

    #[test]
    fn pick_orders_hits_by_distance() {
        let (mut graph, _, _) = graph_with_decor();
        graph.add_root(Node::boxed(
            "pillar",
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.3, 2.0, 0.3),
            [0.8; 3],
        ));
        let ray = Ray::new(Vec3::new(0.0, 0.5, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let hits = pick(&graph, &ray);
        assert!(hits.len() >= 3);
        for pair in hits.windows(2) {
            assert!(pair[0].distance <= pair[1].distance);
        }
    }
}
