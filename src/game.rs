//! Windowed game loop: walks the apartment, clicks decor, draws the HUD.

use anyhow::Result;
use std::time::Instant;

use flatwalk_core::{HealthModel, NullMeter};
use flatwalk_render::{
    Camera, InputState, RenderContext, RoomMeshCache, ScenePipeline, UiManager, WindowConfig,
    WindowManager,
};
use flatwalk_scene::{screen_to_ray, SceneCatalog, Session};
use glam::Vec3;
use tracing::{info, warn};
use winit::{
    event::{Event, MouseButton, WindowEvent},
    keyboard::KeyCode,
};

use crate::config::SettingsConfig;
use crate::hud::Hud;

/// Windowed session options.
#[derive(Debug, Clone)]
pub struct GameOptions {
    pub width: u32,
    pub height: u32,
}

/// Create the window and run the interactive session until the player quits.
pub fn run(settings: SettingsConfig, catalog: SceneCatalog, options: GameOptions) -> Result<()> {
    let window_manager = WindowManager::new(WindowConfig {
        title: "flatwalk".to_string(),
        width: options.width,
        height: options.height,
    })?;
    let window = window_manager.window();

    let mut ctx = pollster::block_on(RenderContext::new(window.clone()))?;
    let mut pipeline = ScenePipeline::new(&ctx)?;
    let mut mesh_cache = RoomMeshCache::new();
    let mut ui = UiManager::new(&ctx.device, ctx.config.format, &window);

    let mut input = InputState::new();
    let mut camera = Camera::new(ctx.aspect_ratio());
    camera.fov = settings.fov_degrees.to_radians();

    let mut session = Session::new(catalog, HealthModel::new(Box::new(NullMeter)));
    let mut hud = Hud::new();

    let start = Instant::now();
    info!("Entering the apartment");

    window_manager.run(move |event, window| {
        match event {
            Event::WindowEvent { event, .. } => {
                match &event {
                    WindowEvent::CloseRequested => {
                        info!("Window close requested");
                        return false;
                    }
                    WindowEvent::Resized(size) => {
                        ctx.resize((size.width, size.height));
                        pipeline.resize(&ctx.device, (size.width, size.height));
                        camera.set_aspect(ctx.aspect_ratio());
                    }
                    _ => {}
                }

                let consumed = ui.handle_event(window, &event);
                if !consumed {
                    input.handle_event(&event);
                }

                if matches!(event, WindowEvent::RedrawRequested) {
                    let now = start.elapsed();

                    // Input that flips modes first.
                    if input.is_key_just_pressed(KeyCode::Tab) {
                        if let Err(err) = input.toggle_cursor_grab(window) {
                            warn!(%err, "cursor grab toggle failed");
                        }
                    }
                    if input.is_key_just_pressed(KeyCode::Escape) && input.cursor_captured {
                        if let Err(err) = input.set_cursor_capture(window, false) {
                            warn!(%err, "cursor release failed");
                        }
                    }
                    if input.is_key_just_pressed(KeyCode::KeyM) {
                        hud.toggle_map();
                    }
                    for (key, room) in [
                        (KeyCode::Digit1, flatwalk_core::RoomId::Bedroom),
                        (KeyCode::Digit2, flatwalk_core::RoomId::Kitchen),
                        (KeyCode::Digit3, flatwalk_core::RoomId::LivingRoom),
                    ] {
                        if input.is_key_just_pressed(key) {
                            session.switch_room(room);
                        }
                    }

                    if input.cursor_captured {
                        // Mouse look.
                        let (dx, dy) = input.raw_mouse_delta;
                        let pitch_sign = if settings.invert_y { 1.0 } else { -1.0 };
                        camera.rotate(
                            dx as f32 * settings.mouse_sensitivity,
                            dy as f32 * settings.mouse_sensitivity * pitch_sign,
                        );

                        // Walking, clamped to the active room.
                        let mut step = Vec3::ZERO;
                        if input.is_key_pressed(KeyCode::KeyW) {
                            step += camera.walk_forward();
                        }
                        if input.is_key_pressed(KeyCode::KeyS) {
                            step -= camera.walk_forward();
                        }
                        if input.is_key_pressed(KeyCode::KeyD) {
                            step += camera.right();
                        }
                        if input.is_key_pressed(KeyCode::KeyA) {
                            step -= camera.right();
                        }
                        if step != Vec3::ZERO {
                            // Redraws arrive at display rate; a fixed small
                            // step keeps speed roughly constant.
                            let half = session.catalog().active().size / 2.0;
                            camera.walk(
                                step.normalize() * settings.move_speed * (1.0 / 60.0),
                                half,
                            );
                        }
                    }

                    // Clicks: crosshair when captured, cursor otherwise.
                    if input.is_mouse_clicked(MouseButton::Left) {
                        let (width, height) = (ctx.size.0 as f32, ctx.size.1 as f32);
                        let (sx, sy) = if input.cursor_captured {
                            (width / 2.0, height / 2.0)
                        } else {
                            (input.mouse_pos.0 as f32, input.mouse_pos.1 as f32)
                        };
                        let ray = screen_to_ray(
                            sx,
                            sy,
                            width,
                            height,
                            camera.view_matrix(),
                            camera.projection_matrix(),
                        );
                        session.click(&ray, glam::Vec2::new(sx, sy), now);
                    }

                    session.advance(now);

                    let frame = match ctx.surface.get_current_texture() {
                        Ok(frame) => frame,
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            ctx.resize(ctx.size);
                            input.reset_frame();
                            return true;
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            warn!("GPU surface out of memory, quitting");
                            return false;
                        }
                        Err(err) => {
                            warn!(%err, "dropped frame");
                            input.reset_frame();
                            return true;
                        }
                    };
                    let view = frame
                        .texture
                        .create_view(&wgpu::TextureViewDescriptor::default());
                    let mut encoder =
                        ctx.device
                            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                                label: Some("Frame Encoder"),
                            });

                    {
                        let room = session.catalog().active();
                        pipeline.update_camera(&ctx.queue, &camera);
                        pipeline.update_room(&ctx.queue, &room.light);
                        let data = mesh_cache.get_or_mesh(&ctx.device, room);

                        let mut pass =
                            pipeline.begin_render_pass(&mut encoder, &view, room.background);
                        pass.set_pipeline(pipeline.pipeline());
                        pass.set_bind_group(0, pipeline.bind_group(), &[]);
                        pass.set_vertex_buffer(0, data.vertex_buffer.slice(..));
                        pass.set_index_buffer(data.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                        pass.draw_indexed(0..data.index_count, 0, 0..1);
                    }

                    let mut switch_request = None;
                    let screen_descriptor = egui_wgpu::ScreenDescriptor {
                        size_in_pixels: [ctx.size.0, ctx.size.1],
                        pixels_per_point: window.scale_factor() as f32,
                    };
                    ui.render(
                        &ctx.device,
                        &ctx.queue,
                        &mut encoder,
                        &view,
                        screen_descriptor,
                        window,
                        |egui_ctx| {
                            switch_request =
                                hud.draw(egui_ctx, &session, now, input.cursor_captured);
                        },
                    );

                    ctx.queue.submit(std::iter::once(encoder.finish()));
                    frame.present();

                    if let Some(room) = switch_request {
                        session.switch_room(room);
                    }
                    input.reset_frame();
                }
            }
            Event::DeviceEvent { event, .. } => {
                input.handle_device_event(&event);
            }
            Event::AboutToWait => {
                window.request_redraw();
            }
            _ => {}
        }
        true
    })
}
