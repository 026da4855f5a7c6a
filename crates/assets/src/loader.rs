use std::collections::HashSet;
use std::fs;
use std::path::Path;

use glam::Vec3;

use flatwalk_core::Interactable;
use flatwalk_scene::{
    LightParams, Node, RoomParams, SceneCatalog, WallSide, WindowParams,
};

use crate::{AssetError, RoomDefinition, WindowSide};

/// Load room definitions from the provided JSON file path.
pub fn rooms_from_file(path: &Path) -> Result<Vec<RoomDefinition>, AssetError> {
    let data = fs::read_to_string(path)?;
    rooms_from_str(&data)
}

/// Load room definitions from an in-memory JSON string.
pub fn rooms_from_str(input: &str) -> Result<Vec<RoomDefinition>, AssetError> {
    let defs: Vec<RoomDefinition> = serde_json::from_str(input)?;
    let mut seen = HashSet::new();
    for def in &defs {
        if !seen.insert(def.id) {
            return Err(AssetError::DuplicateRoom(def.id));
        }
    }
    Ok(defs)
}

/// Build a scene catalog from room definitions, decorations included.
pub fn catalog_from_defs(defs: &[RoomDefinition]) -> Result<SceneCatalog, AssetError> {
    let params: Vec<RoomParams> = defs.iter().map(room_params).collect();
    let mut catalog = SceneCatalog::build(&params).ok_or(AssetError::Empty)?;

    for def in defs {
        for decor in &def.decor {
            let mut group = Node::group(decor.name.clone(), Vec3::from(decor.position));
            group.yaw = decor.yaw;
            group.interactable = Some(Interactable::new(decor.health_effect, decor.cooldown_ms));
            let parts = decor
                .parts
                .iter()
                .map(|part| {
                    Node::boxed(
                        part.name.clone(),
                        Vec3::from(part.offset),
                        Vec3::from(part.half_extents),
                        part.color,
                    )
                })
                .collect();
            catalog.queue_decor(def.id, group, parts);
        }
    }
    catalog.process_pending();
    Ok(catalog)
}

fn room_params(def: &RoomDefinition) -> RoomParams {
    RoomParams {
        id: def.id,
        size: def.size,
        floor_color: def.floor_color,
        wall_color: def.wall_color,
        background: def.background,
        light: LightParams {
            color: def.light.color,
            intensity: def.light.intensity,
        },
        windows: def.windows.iter().map(window_params).collect(),
    }
}

fn window_params(def: &crate::WindowDefinition) -> WindowParams {
    WindowParams {
        side: match def.side {
            WindowSide::North => WallSide::North,
            WindowSide::South => WallSide::South,
            WindowSide::East => WallSide::East,
            WindowSide::West => WallSide::West,
        },
        offset: def.offset,
        width: def.width,
        height: def.height,
        sill: def.sill,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatwalk_core::RoomId;

    const PACK: &str = r#"[
        {
            "id": "bedroom",
            "size": 10.0,
            "windows": [
                { "side": "north", "width": 2.0, "height": 1.5, "sill": 1.0 }
            ],
            "decor": [
                {
                    "name": "bed",
                    "health_effect": 20,
                    "cooldown_ms": 5000,
                    "position": [2.0, 0.0, -2.0],
                    "parts": [
                        {
                            "name": "frame",
                            "offset": [0.0, 0.25, 0.0],
                            "half_extents": [1.0, 0.25, 0.7],
                            "color": [0.45, 0.3, 0.2]
                        }
                    ]
                }
            ]
        },
        { "id": "kitchen", "size": 12.0 }
    ]"#;

    #[test]
    fn pack_parses_with_defaults_filled_in() {
        let defs = rooms_from_str(PACK).expect("pack parses");
        assert_eq!(defs.len(), 2);
        assert_eq!(defs[0].id, RoomId::Bedroom);
        assert_eq!(defs[0].decor[0].health_effect, 20);
        // Kitchen omitted its colors; defaults apply.
        assert!(defs[1].windows.is_empty());
        assert!(defs[1].floor_color[0] > 0.0);
    }

    #[test]
    fn catalog_carries_decor_with_interaction_metadata() {
        let defs = rooms_from_str(PACK).expect("pack parses");
        let catalog = catalog_from_defs(&defs).expect("catalog builds");
        assert_eq!(catalog.active_id(), RoomId::Bedroom);

        let room = catalog.room(RoomId::Bedroom).expect("bedroom exists");
        let carrier = room
            .graph
            .iter()
            .find(|(_, node)| node.interactable.is_some())
            .expect("bed attached");
        let meta = carrier.1.interactable.expect("metadata present");
        assert_eq!(meta.health_effect, 20);
        assert_eq!(meta.cooldown_ms, 5000);
        assert!(!meta.on_cooldown);
    }

    #[test]
    fn duplicate_room_ids_are_rejected() {
        let err = rooms_from_str(r#"[{ "id": "kitchen", "size": 12.0 }, { "id": "kitchen", "size": 9.0 }]"#)
            .expect_err("duplicate rejected");
        assert!(matches!(err, AssetError::DuplicateRoom(RoomId::Kitchen)));
    }

    #[test]
    fn empty_pack_yields_no_catalog() {
        let defs = rooms_from_str("[]").expect("empty array parses");
        assert!(matches!(
            catalog_from_defs(&defs),
            Err(AssetError::Empty)
        ));
    }

    #[test]
    fn malformed_json_reports_parse_error() {
        assert!(matches!(
            rooms_from_str("not json"),
            Err(AssetError::Parse(_))
        ));
    }
}
