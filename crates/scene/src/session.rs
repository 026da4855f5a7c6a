//! The explorer session: one context struct owning the catalog, the health
//! meter, the cooldown and pulse bookkeeping, and the popup feed.
//!
//! All mutation flows through [`Session::click`] and [`Session::advance`],
//! both parameterized on the session clock, so a headless driver can replay
//! the same inputs and land on the same state.

use std::time::Duration;

use flatwalk_core::{HealthModel, RoomId};
use glam::Vec2;
use tracing::{debug, info};

use crate::catalog::SceneCatalog;
use crate::cooldown::CooldownTracker;
use crate::node::NodeKey;
use crate::pulse::PulseSystem;
use crate::raycast::Ray;
use crate::resolver::resolve;

/// How long a reward popup stays on screen.
pub const POPUP_LIFETIME: Duration = Duration::from_millis(1000);

/// Interval between health decay ticks.
const DECAY_INTERVAL: Duration = Duration::from_secs(1);

/// What a click did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickOutcome {
    /// The ray hit nothing interactable.
    Miss,
    /// The target is still cooling down; nothing changed.
    OnCooldown {
        /// The gated target.
        target: NodeKey,
    },
    /// The effect was applied.
    Applied {
        /// The triggered target.
        target: NodeKey,
        /// Signed health delta that was requested.
        effect: i32,
        /// Health after clamping.
        health: i32,
    },
}

/// A floating reward message.
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    /// Display text, e.g. `+20 HP`.
    pub text: String,
    /// Screen anchor, in pixels.
    pub at: Vec2,
    /// Session time the popup appeared.
    pub spawned: Duration,
}

impl Popup {
    /// Remaining lifetime as a 1.0 -> 0.0 fade fraction.
    pub fn fade(&self, now: Duration) -> f32 {
        let age = now.saturating_sub(self.spawned);
        1.0 - (age.as_secs_f32() / POPUP_LIFETIME.as_secs_f32()).clamp(0.0, 1.0)
    }
}

/// Owns all mutable exploration state.
pub struct Session {
    catalog: SceneCatalog,
    health: HealthModel,
    cooldowns: CooldownTracker,
    pulses: PulseSystem,
    popups: Vec<Popup>,
    next_decay: Duration,
}

impl Session {
    /// Create a session over a built catalog.
    pub fn new(catalog: SceneCatalog, health: HealthModel) -> Self {
        Self {
            catalog,
            health,
            cooldowns: CooldownTracker::new(),
            pulses: PulseSystem::new(),
            popups: Vec::new(),
            next_decay: DECAY_INTERVAL,
        }
    }

    /// Borrow the room catalog.
    pub fn catalog(&self) -> &SceneCatalog {
        &self.catalog
    }

    /// Mutably borrow the room catalog.
    pub fn catalog_mut(&mut self) -> &mut SceneCatalog {
        &mut self.catalog
    }

    /// Borrow the health meter.
    pub fn health(&self) -> &HealthModel {
        &self.health
    }

    /// Live popups, oldest first.
    pub fn popups(&self) -> &[Popup] {
        &self.popups
    }

    /// True when `target` is cooling down.
    pub fn is_cooling(&self, target: NodeKey) -> bool {
        self.cooldowns.is_cooling(target)
    }

    /// Switch the active room. Health, cooldowns and pending pulses are
    /// untouched; a cooldown armed in the old room still re-arms on schedule.
    pub fn switch_room(&mut self, id: RoomId) -> bool {
        let switched = self.catalog.set_active(id);
        if switched {
            info!(room = %id, "entered room");
        }
        switched
    }

    /// Handle a pointer click against the active room. `at` is the click's
    /// screen position, carried through to the reward popup.
    pub fn click(&mut self, ray: &Ray, at: Vec2, now: Duration) -> ClickOutcome {
        let room_id = self.catalog.active_id();
        let Some(hit) = resolve(&self.catalog.active().graph, ray) else {
            return ClickOutcome::Miss;
        };
        let target = NodeKey {
            room: room_id,
            node: hit.target,
        };

        let room = self.catalog.active_mut();
        let Some(node) = room.graph.node_mut(hit.target) else {
            return ClickOutcome::Miss;
        };
        let Some(meta) = node.interactable else {
            return ClickOutcome::Miss;
        };

        if meta.on_cooldown || self.cooldowns.is_cooling(target) {
            debug!(?target, "click gated by cooldown");
            return ClickOutcome::OnCooldown { target };
        }

        let base_scale = node.scale;
        if let Some(meta) = node.interactable.as_mut() {
            meta.on_cooldown = true;
        }
        self.cooldowns
            .try_trigger(target, Duration::from_millis(meta.cooldown_ms), now);
        self.pulses.start(target, base_scale, now);
        self.health.apply_delta(meta.health_effect);
        let health = self.health.current();

        self.popups.push(Popup {
            text: format!("{:+} HP", meta.health_effect),
            at,
            spawned: now,
        });

        info!(
            ?target,
            effect = meta.health_effect,
            health,
            "applied interaction"
        );
        ClickOutcome::Applied {
            target,
            effect: meta.health_effect,
            health,
        }
    }

    /// Advance the session to `now`: decay health, re-arm expired cooldowns,
    /// step pulses into the graph and retire dead popups.
    pub fn advance(&mut self, now: Duration) {
        while self.next_decay <= now {
            self.health.tick();
            self.next_decay += DECAY_INTERVAL;
        }

        for key in self.cooldowns.expire_due(now) {
            if let Some(room) = self.catalog.room_mut(key.room) {
                if let Some(meta) = room
                    .graph
                    .node_mut(key.node)
                    .and_then(|n| n.interactable.as_mut())
                {
                    meta.on_cooldown = false;
                    debug!(?key, "cooldown cleared");
                }
            }
        }

        for (key, scale) in self.pulses.advance(now) {
            if let Some(room) = self.catalog.room_mut(key.room) {
                if let Some(node) = room.graph.node_mut(key.node) {
                    node.scale = scale;
                }
                room.bump_revision();
            }
        }

        self.popups
            .retain(|popup| now.saturating_sub(popup.spawned) < POPUP_LIFETIME);
    }

    /// Drop all transient effects for a room: pending cooldowns are cancelled
    /// (their targets re-arm immediately) and in-flight pulses snap back to
    /// their base scale. Used for teardown, not for room switches.
    pub fn cancel_room_effects(&mut self, id: RoomId) {
        let dropped = self.cooldowns.cancel_room(id);
        if let Some(room) = self.catalog.room_mut(id) {
            let keys: Vec<NodeKey> = room
                .graph
                .iter()
                .map(|(node, _)| NodeKey { room: id, node })
                .collect();
            for key in keys {
                if let Some(base) = self.pulses.cancel(key) {
                    if let Some(node) = room.graph.node_mut(key.node) {
                        node.scale = base;
                    }
                    room.bump_revision();
                }
                if let Some(meta) = room
                    .graph
                    .node_mut(key.node)
                    .and_then(|n| n.interactable.as_mut())
                {
                    meta.on_cooldown = false;
                }
            }
        }
        if dropped > 0 {
            debug!(room = %id, dropped, "cancelled room cooldowns");
        }
    }
}
