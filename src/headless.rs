//! Headless driver: fixed 50ms steps, scripted pointer input, JSONL event log.
//!
//! Used by CI and smoke tests to replay a session deterministically without
//! a window or a GPU.

use anyhow::{Context, Result};
use rand::RngCore;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use flatwalk_core::{HealthModel, NullMeter, RoomId};
use flatwalk_render::Camera;
use flatwalk_scene::{screen_to_ray, ClickOutcome, SceneCatalog, Session};
use flatwalk_testkit::{EventRecord, JsonlSink};
use tracing::info;

/// Seconds-to-steps ratio of the fixed step loop.
pub const STEPS_PER_SECOND: u64 = 20;

const STEP: Duration = Duration::from_millis(1000 / STEPS_PER_SECOND);

pub struct HeadlessConfig {
    pub catalog: SceneCatalog,
    pub max_steps: u64,
    pub script: Option<PathBuf>,
    pub log: Option<PathBuf>,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Deserialize)]
struct ScriptFile {
    actions: Vec<ScriptedAction>,
}

#[derive(Debug, Clone, Deserialize)]
struct ScriptedAction {
    /// Session time the action fires, in milliseconds.
    at_ms: u64,
    /// Pointer click at pixel coordinates.
    #[serde(default)]
    click: Option<ClickTarget>,
    /// Switch to a room.
    #[serde(default)]
    switch_room: Option<RoomId>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct ClickTarget {
    x: f32,
    y: f32,
}

fn load_script(path: &Path) -> Result<Vec<ScriptedAction>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;
    let file: ScriptFile = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse script {}", path.display()))?;
    let mut actions = file.actions;
    actions.sort_by_key(|action| action.at_ms);
    Ok(actions)
}

fn default_log_path() -> PathBuf {
    let mut rng = rand::thread_rng();
    let suffix = rng.next_u64();
    std::env::temp_dir()
        .join("flatwalk_headless")
        .join(format!("run_{suffix:016x}.jsonl"))
}

pub fn run(cfg: HeadlessConfig) -> Result<()> {
    let log_path = cfg.log.unwrap_or_else(default_log_path);
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log dir {}", parent.display()))?;
    }
    let mut sink = JsonlSink::create(&log_path)
        .with_context(|| format!("failed to create event log {}", log_path.display()))?;

    let actions = match cfg.script.as_deref() {
        Some(path) => load_script(path)?,
        None => Vec::new(),
    };

    let camera = Camera::new(cfg.width as f32 / cfg.height as f32);
    let mut session = Session::new(cfg.catalog, HealthModel::new(Box::new(NullMeter)));

    info!(
        steps = cfg.max_steps,
        actions = actions.len(),
        log = %log_path.display(),
        "starting headless run"
    );

    let mut cursor = 0usize;
    let mut last_health = session.health().current();

    for step in 0..cfg.max_steps {
        let now = STEP * step as u32;
        let now_ms = now.as_millis() as u64;

        while cursor < actions.len() && actions[cursor].at_ms <= now_ms {
            let action = actions[cursor].clone();
            cursor += 1;

            if let Some(room) = action.switch_room {
                let switched = session.switch_room(room);
                sink.write(&EventRecord {
                    step,
                    kind: "switch_room",
                    payload: &format!("{room} ok={switched}"),
                })?;
            }
            if let Some(target) = action.click {
                let ray = screen_to_ray(
                    target.x,
                    target.y,
                    cfg.width as f32,
                    cfg.height as f32,
                    camera.view_matrix(),
                    camera.projection_matrix(),
                );
                let outcome = session.click(&ray, glam::Vec2::new(target.x, target.y), now);
                let payload = match outcome {
                    ClickOutcome::Miss => "miss".to_string(),
                    ClickOutcome::OnCooldown { target } => {
                        format!("cooldown room={} node={}", target.room, target.node.0)
                    }
                    ClickOutcome::Applied { effect, health, .. } => {
                        format!("applied effect={effect} health={health}")
                    }
                };
                sink.write(&EventRecord {
                    step,
                    kind: "click",
                    payload: &payload,
                })?;
            }
        }

        session.advance(now);

        let health = session.health().current();
        if health != last_health {
            sink.write(&EventRecord {
                step,
                kind: "health",
                payload: &health.to_string(),
            })?;
            last_health = health;
        }
    }

    sink.write(&EventRecord {
        step: cfg.max_steps,
        kind: "end",
        payload: &format!(
            "health={} room={}",
            session.health().current(),
            session.catalog().active_id()
        ),
    })?;

    info!(
        health = session.health().current(),
        room = %session.catalog().active_id(),
        "headless run complete"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_catalog;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("{name}-{nanos}"))
    }

    #[test]
    fn script_actions_sort_by_time() {
        let path = temp_file("flatwalk-script.json");
        std::fs::write(
            &path,
            r#"{ "actions": [
                { "at_ms": 500, "switch_room": "kitchen" },
                { "at_ms": 100, "click": { "x": 640.0, "y": 360.0 } }
            ] }"#,
        )
        .unwrap();
        let actions = load_script(&path).unwrap();
        assert_eq!(actions[0].at_ms, 100);
        assert!(actions[0].click.is_some());
        assert_eq!(actions[1].switch_room, Some(RoomId::Kitchen));
    }

    #[test]
    fn decay_only_run_writes_health_events() {
        let log = temp_file("flatwalk-headless.jsonl");
        run(HeadlessConfig {
            catalog: default_catalog(),
            max_steps: 3 * STEPS_PER_SECOND,
            script: None,
            log: Some(log.clone()),
            width: 1280,
            height: 720,
        })
        .unwrap();

        let contents = std::fs::read_to_string(&log).unwrap();
        // Two whole seconds elapse strictly inside the run.
        assert!(contents.contains("\"kind\":\"health\""));
        assert!(contents.contains("\"payload\":\"98\""));
        assert!(contents.lines().last().unwrap().contains("\"kind\":\"end\""));
    }
}
