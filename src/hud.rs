//! In-game overlay: health bar, room buttons, reward popups, apartment map.

use std::time::Duration;

use flatwalk_core::RoomId;
use flatwalk_scene::Session;

/// Overlay state that survives between frames.
#[derive(Debug, Default)]
pub struct Hud {
    /// Whether the apartment map overlay is open.
    pub map_open: bool,
}

impl Hud {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle the apartment map.
    pub fn toggle_map(&mut self) {
        self.map_open = !self.map_open;
    }

    /// Draw the overlay. Returns a room the player asked to switch to.
    pub fn draw(
        &mut self,
        ctx: &egui::Context,
        session: &Session,
        now: Duration,
        cursor_captured: bool,
    ) -> Option<RoomId> {
        let mut switch_request = None;

        self.draw_health_bar(ctx, session);
        switch_request = self.draw_room_buttons(ctx, session).or(switch_request);
        self.draw_popups(ctx, session, now);
        if self.map_open {
            switch_request = self.draw_map(ctx, session).or(switch_request);
        }
        if cursor_captured {
            draw_crosshair(ctx);
        }

        switch_request
    }

    fn draw_health_bar(&self, ctx: &egui::Context, session: &Session) {
        egui::Area::new("health_bar")
            .anchor(egui::Align2::LEFT_TOP, [16.0, 16.0])
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("HP").color(egui::Color32::WHITE).strong());

                    let percent = session.health().percent() / 100.0;
                    let fill_color = if percent > 0.5 {
                        egui::Color32::from_rgb(60, 200, 80)
                    } else if percent > 0.25 {
                        egui::Color32::from_rgb(230, 200, 50)
                    } else {
                        egui::Color32::from_rgb(220, 60, 50)
                    };

                    let bar_width = 220.0;
                    let bar_height = 20.0;
                    let (rect, _) = ui.allocate_exact_size(
                        egui::vec2(bar_width, bar_height),
                        egui::Sense::hover(),
                    );

                    ui.painter()
                        .rect_filled(rect, 3.0, egui::Color32::from_rgb(35, 35, 40));

                    let fill_rect = egui::Rect::from_min_size(
                        rect.min,
                        egui::vec2(bar_width * percent, bar_height),
                    );
                    ui.painter().rect_filled(fill_rect, 3.0, fill_color);

                    ui.painter().rect_stroke(
                        rect,
                        3.0,
                        egui::Stroke::new(1.0, egui::Color32::WHITE),
                    );

                    let text = format!("{}/{}", session.health().current(), session.health().max());
                    ui.painter().text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        text,
                        egui::FontId::proportional(13.0),
                        egui::Color32::WHITE,
                    );
                });
            });
    }

    fn draw_room_buttons(&self, ctx: &egui::Context, session: &Session) -> Option<RoomId> {
        let mut request = None;
        let active = session.catalog().active_id();

        egui::Area::new("room_buttons")
            .anchor(egui::Align2::RIGHT_TOP, [-16.0, 16.0])
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    for id in RoomId::ALL {
                        let selected = id == active;
                        if ui.selectable_label(selected, id.label()).clicked() && !selected {
                            request = Some(id);
                        }
                    }
                });
            });

        request
    }

    fn draw_popups(&self, ctx: &egui::Context, session: &Session, now: Duration) {
        for (i, popup) in session.popups().iter().enumerate() {
            let fade = popup.fade(now);
            if fade <= 0.0 {
                continue;
            }
            // Popups drift upward from the click point as they fade.
            let rise = (1.0 - fade) * 40.0;
            egui::Area::new(egui::Id::new(("hp_popup", i)))
                .fixed_pos(egui::pos2(popup.at.x, popup.at.y - 30.0 - rise))
                .interactable(false)
                .show(ctx, |ui| {
                    let alpha = (fade * 255.0) as u8;
                    ui.label(
                        egui::RichText::new(&popup.text)
                            .size(26.0)
                            .strong()
                            .color(egui::Color32::from_rgba_unmultiplied(120, 255, 140, alpha)),
                    );
                });
        }
    }

    fn draw_map(&self, ctx: &egui::Context, session: &Session) -> Option<RoomId> {
        let mut request = None;
        let active = session.catalog().active_id();

        egui::Window::new("Apartment")
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Pick a room to walk to:");
                ui.add_space(6.0);
                for id in RoomId::ALL {
                    let selected = id == active;
                    let size = session
                        .catalog()
                        .room(id)
                        .map(|room| room.size)
                        .unwrap_or_default();
                    let text = format!("{} ({:.0}m)", id.label(), size);
                    if ui.selectable_label(selected, text).clicked() && !selected {
                        request = Some(id);
                    }
                }
                ui.add_space(6.0);
                ui.label("M closes the map");
            });

        request
    }
}

fn draw_crosshair(ctx: &egui::Context) {
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Foreground,
        egui::Id::new("crosshair"),
    ));
    let center = ctx.screen_rect().center();
    painter.circle_stroke(center, 3.0, egui::Stroke::new(1.5, egui::Color32::WHITE));
}
