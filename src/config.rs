use anyhow::Result;
use flatwalk_assets::{catalog_from_defs, rooms_from_file};
use flatwalk_core::{Interactable, RoomId};
use flatwalk_scene::{LightParams, Node, RoomParams, SceneCatalog, WallSide, WindowParams};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::warn;

const DEFAULT_SETTINGS_PATH: &str = "config/settings.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SettingsConfig {
    pub mouse_sensitivity: f32,
    pub invert_y: bool,
    /// Field of view in degrees.
    pub fov_degrees: f32,
    /// Walking speed in meters per second.
    pub move_speed: f32,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            // ~0.34 degrees per pixel of mouse movement
            mouse_sensitivity: 0.006,
            invert_y: false,
            fov_degrees: 60.0,
            move_speed: 3.5,
        }
    }
}

impl SettingsConfig {
    /// Load settings from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_SETTINGS_PATH))
    }

    /// Load settings from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<SettingsConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    SettingsConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_SETTINGS_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                }
                SettingsConfig::default()
            }
        }
    }

    /// Save settings to an explicit path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }
}

/// Load the apartment, falling back to the built-in layout on any error.
pub fn load_catalog_lenient(rooms_path: Option<&Path>) -> SceneCatalog {
    if let Some(path) = rooms_path {
        match rooms_from_file(path).and_then(|defs| catalog_from_defs(&defs)) {
            Ok(catalog) => return catalog,
            Err(err) => {
                warn!(
                    "Failed to load apartment pack {}: {err}. Using built-in layout",
                    path.display()
                );
            }
        }
    }
    default_catalog()
}

/// The built-in three-room apartment.
pub fn default_catalog() -> SceneCatalog {
    let params = vec![
        RoomParams {
            id: RoomId::Bedroom,
            size: 10.0,
            floor_color: [0.48, 0.36, 0.26],
            wall_color: [0.88, 0.85, 0.78],
            background: [0.07, 0.08, 0.12],
            light: LightParams {
                color: [1.0, 0.95, 0.88],
                intensity: 0.9,
            },
            windows: vec![WindowParams {
                side: WallSide::North,
                offset: -1.5,
                width: 2.0,
                height: 1.5,
                sill: 1.0,
            }],
        },
        RoomParams {
            id: RoomId::Kitchen,
            size: 12.0,
            floor_color: [0.62, 0.6, 0.55],
            wall_color: [0.92, 0.92, 0.86],
            background: [0.07, 0.09, 0.11],
            light: LightParams {
                color: [1.0, 1.0, 0.96],
                intensity: 1.0,
            },
            windows: vec![WindowParams {
                side: WallSide::East,
                offset: 0.0,
                width: 1.6,
                height: 1.2,
                sill: 1.2,
            }],
        },
        RoomParams {
            id: RoomId::LivingRoom,
            size: 15.0,
            floor_color: [0.45, 0.33, 0.24],
            wall_color: [0.85, 0.83, 0.76],
            background: [0.06, 0.08, 0.1],
            light: LightParams {
                color: [1.0, 0.92, 0.82],
                intensity: 0.85,
            },
            windows: vec![
                WindowParams {
                    side: WallSide::South,
                    offset: -3.0,
                    width: 2.5,
                    height: 1.8,
                    sill: 0.8,
                },
                WindowParams {
                    side: WallSide::South,
                    offset: 3.0,
                    width: 2.5,
                    height: 1.8,
                    sill: 0.8,
                },
            ],
        },
    ];

    let mut catalog =
        SceneCatalog::build(&params).unwrap_or_else(|| unreachable!("built-in rooms are non-empty"));

    // Bed: +20 HP, 5s cooldown.
    let mut bed = Node::group("bed", Vec3::new(-2.5, 0.0, -2.5));
    bed.interactable = Some(Interactable::new(20, 5000));
    catalog.queue_decor(
        RoomId::Bedroom,
        bed,
        vec![
            Node::boxed(
                "frame",
                Vec3::new(0.0, 0.25, 0.0),
                Vec3::new(1.0, 0.25, 1.5),
                [0.4, 0.26, 0.16],
            ),
            Node::boxed(
                "mattress",
                Vec3::new(0.0, 0.62, 0.0),
                Vec3::new(0.95, 0.12, 1.45),
                [0.92, 0.92, 0.95],
            ),
            Node::boxed(
                "pillow",
                Vec3::new(0.0, 0.8, -1.0),
                Vec3::new(0.6, 0.08, 0.3),
                [0.98, 0.98, 1.0],
            ),
        ],
    );

    // Fridge: +10 HP, 3s cooldown.
    let mut fridge = Node::group("fridge", Vec3::new(4.5, 0.0, -4.5));
    fridge.interactable = Some(Interactable::new(10, 3000));
    catalog.queue_decor(
        RoomId::Kitchen,
        fridge,
        vec![
            Node::boxed(
                "body",
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(0.5, 1.0, 0.5),
                [0.85, 0.88, 0.9],
            ),
            Node::boxed(
                "handle",
                Vec3::new(-0.45, 1.2, 0.52),
                Vec3::new(0.03, 0.3, 0.03),
                [0.35, 0.35, 0.38],
            ),
        ],
    );

    // Chair: +5 HP, 2s cooldown.
    let mut chair = Node::group("chair", Vec3::new(3.0, 0.0, 3.0));
    chair.interactable = Some(Interactable::new(5, 2000));
    catalog.queue_decor(
        RoomId::LivingRoom,
        chair,
        vec![
            Node::boxed(
                "seat",
                Vec3::new(0.0, 0.45, 0.0),
                Vec3::new(0.4, 0.06, 0.4),
                [0.5, 0.32, 0.2],
            ),
            Node::boxed(
                "back",
                Vec3::new(0.0, 0.9, -0.35),
                Vec3::new(0.4, 0.45, 0.05),
                [0.5, 0.32, 0.2],
            ),
            Node::boxed(
                "legs",
                Vec3::new(0.0, 0.2, 0.0),
                Vec3::new(0.35, 0.2, 0.35),
                [0.35, 0.22, 0.14],
            ),
        ],
    );

    catalog.process_pending();
    catalog
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_round_trip_through_toml() {
        let settings = SettingsConfig::default();
        let text = toml::to_string_pretty(&settings).expect("serializes");
        let parsed: SettingsConfig = toml::from_str(&text).expect("parses");
        assert_eq!(parsed.fov_degrees, settings.fov_degrees);
        assert_eq!(parsed.move_speed, settings.move_speed);
    }

    #[test]
    fn saved_settings_reload_from_disk() {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let path = std::env::temp_dir().join(format!("flatwalk-settings-{nanos}/settings.toml"));

        let mut settings = SettingsConfig::default();
        settings.fov_degrees = 75.0;
        settings.invert_y = true;
        settings.save_to_path(&path).expect("saves");

        let reloaded = SettingsConfig::load_from_path(&path);
        assert_eq!(reloaded.fov_degrees, 75.0);
        assert!(reloaded.invert_y);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn missing_settings_file_falls_back_to_defaults() {
        let settings = SettingsConfig::load_from_path(Path::new("/nonexistent/settings.toml"));
        assert_eq!(settings.fov_degrees, SettingsConfig::default().fov_degrees);
    }

    #[test]
    fn default_catalog_has_three_furnished_rooms() {
        let catalog = default_catalog();
        for id in RoomId::ALL {
            let room = catalog.room(id).expect("room exists");
            assert!(
                room.graph.iter().any(|(_, n)| n.interactable.is_some()),
                "{id} has clickable decor"
            );
        }
        assert_eq!(catalog.active_id(), RoomId::Bedroom);
    }

    #[test]
    fn bad_rooms_path_falls_back_to_builtin_layout() {
        let catalog = load_catalog_lenient(Some(Path::new("/nonexistent/rooms.json")));
        assert!(catalog.room(RoomId::LivingRoom).is_some());
    }
}
