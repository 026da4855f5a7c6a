//! Window management and event handling with winit.

use anyhow::Result;
use std::collections::HashSet;
use tracing::warn;
use winit::{
    event::{DeviceEvent, Event, MouseButton, WindowEvent},
    event_loop::EventLoop,
    keyboard::KeyCode,
    window::{Window, WindowBuilder},
};

/// Window configuration.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Initial width
    pub width: u32,
    /// Initial height
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "flatwalk".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Window manager wrapping winit.
pub struct WindowManager {
    window: std::sync::Arc<Window>,
    event_loop: Option<EventLoop<()>>,
}

impl WindowManager {
    /// Create a new window with the given configuration.
    pub fn new(config: WindowConfig) -> Result<Self> {
        let event_loop = EventLoop::new()?;

        let window = WindowBuilder::new()
            .with_title(config.title)
            .with_inner_size(winit::dpi::PhysicalSize::new(config.width, config.height))
            .build(&event_loop)?;

        Ok(Self {
            window: std::sync::Arc::new(window),
            event_loop: Some(event_loop),
        })
    }

    /// Get Arc reference to the window.
    pub fn window(&self) -> std::sync::Arc<Window> {
        self.window.clone()
    }

    /// Get the current window size.
    pub fn size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }

    /// Run the event loop with a callback.
    ///
    /// The callback receives events and returns whether to continue running.
    pub fn run<F>(mut self, mut callback: F) -> Result<()>
    where
        F: FnMut(Event<()>, &Window) -> bool + 'static,
    {
        let event_loop = self
            .event_loop
            .take()
            .ok_or_else(|| anyhow::anyhow!("Event loop already consumed"))?;

        let window = self.window;

        event_loop.run(move |event, elwt| {
            let should_continue = callback(event, &window);

            if !should_continue {
                elwt.exit();
            }
        })?;

        Ok(())
    }
}

/// Input state tracking.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Keys currently pressed
    pub keys_pressed: HashSet<KeyCode>,
    /// Keys pressed this frame
    pub keys_just_pressed: HashSet<KeyCode>,
    /// Mouse position (x, y) in pixels
    pub mouse_pos: (f64, f64),
    /// Raw mouse delta reported by DeviceEvents
    pub raw_mouse_delta: (f64, f64),
    /// Mouse buttons clicked this frame
    pub mouse_clicks: HashSet<MouseButton>,
    /// Whether cursor is currently captured/hidden
    pub cursor_captured: bool,
}

impl InputState {
    /// Create a new input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a key is currently pressed.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if a key went down this frame.
    pub fn is_key_just_pressed(&self, key: KeyCode) -> bool {
        self.keys_just_pressed.contains(&key)
    }

    /// Check if a mouse button was clicked this frame.
    pub fn is_mouse_clicked(&self, button: MouseButton) -> bool {
        self.mouse_clicks.contains(&button)
    }

    /// Reset per-frame state (mouse delta and clicks).
    pub fn reset_frame(&mut self) {
        self.raw_mouse_delta = (0.0, 0.0);
        self.mouse_clicks.clear();
        self.keys_just_pressed.clear();
    }

    /// Handle a window event and update state.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        use winit::event::ElementState;
        use winit::keyboard::PhysicalKey;

        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => {
                            self.keys_pressed.insert(keycode);
                            self.keys_just_pressed.insert(keycode);
                        }
                        ElementState::Released => {
                            self.keys_pressed.remove(&keycode);
                        }
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if *state == ElementState::Pressed {
                    self.mouse_clicks.insert(*button);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse_pos = (position.x, position.y);
            }
            _ => {}
        }
    }

    /// Handle device-level events (raw mouse motion for look control).
    pub fn handle_device_event(&mut self, event: &DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.raw_mouse_delta.0 += delta.0;
            self.raw_mouse_delta.1 += delta.1;
        }
    }

    /// Toggle cursor grab state.
    pub fn toggle_cursor_grab(&mut self, window: &Window) -> Result<()> {
        let capture = !self.cursor_captured;
        self.set_cursor_capture(window, capture)
    }

    /// Explicitly set cursor capture state.
    pub fn set_cursor_capture(&mut self, window: &Window, capture: bool) -> Result<()> {
        use winit::window::CursorGrabMode;

        if capture {
            // Locked breaks DeviceEvent delivery on some Linux compositors;
            // Confined keeps CursorMoved working everywhere we care about.
            #[cfg(target_os = "linux")]
            let grab_result = window.set_cursor_grab(CursorGrabMode::Confined);

            #[cfg(not(target_os = "linux"))]
            let grab_result = {
                let locked = window.set_cursor_grab(CursorGrabMode::Locked);
                if locked.is_err() {
                    window.set_cursor_grab(CursorGrabMode::Confined)
                } else {
                    locked
                }
            };

            if let Err(err) = grab_result {
                warn!("Failed to capture cursor: {err}");
                self.cursor_captured = false;
                return Ok(());
            }
            window.set_cursor_visible(false);
            self.cursor_captured = true;
        } else {
            if let Err(err) = window.set_cursor_grab(CursorGrabMode::None) {
                warn!("Failed to release cursor grab: {err}");
            }
            window.set_cursor_visible(true);
            self.cursor_captured = false;
        }

        Ok(())
    }
}
