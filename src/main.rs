use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use glam::Vec2;
use log::{debug, info, warn};
use pollster::block_on;
use winit::application::ApplicationHandler;
use winit::event::{
    ElementState, KeyEvent, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent,
};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

use sphere_editor::render::native::Overlay;
use sphere_editor::{
    show_panel, ClickTracker, DragMode, EditorConfig, EditorSession, MouseButton, OrbitCamera,
    PointerState, RenderLoopDriver, Renderer,
};

/// Lines of zoom per pixel of touchpad scroll.
const PIXELS_PER_LINE: f32 = 40.0;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = EditorConfig::default();
    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = EditorApp::new(config);
    event_loop
        .run_app(&mut app)
        .context("event loop execution failed")?;
    app.shutdown();

    match app.last_error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct Graphics {
    renderer: Renderer,
    egui_state: egui_winit::State,
}

struct EditorApp {
    config: EditorConfig,
    session: EditorSession,
    camera: OrbitCamera,
    pointer: PointerState,
    clicks: ClickTracker,
    driver: RenderLoopDriver,
    egui_ctx: egui::Context,
    graphics: Option<Graphics>,
    last_error: Option<anyhow::Error>,
}

impl EditorApp {
    fn new(config: EditorConfig) -> Self {
        Self {
            session: EditorSession::new(&config),
            camera: OrbitCamera::new(&config.camera),
            pointer: PointerState::new(),
            clicks: ClickTracker::new(config.double_click_interval, config.double_click_distance),
            driver: RenderLoopDriver::new(),
            egui_ctx: egui::Context::default(),
            graphics: None,
            last_error: None,
            config,
        }
    }

    fn init_graphics(&self, event_loop: &ActiveEventLoop) -> Result<Graphics> {
        let attributes = Window::default_attributes()
            .with_title(self.config.window_title.as_str())
            .with_maximized(true);
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .context("failed to create window")?,
        );
        let renderer = block_on(Renderer::new(
            Arc::clone(&window),
            self.config.sphere_segments,
        ))?;
        let egui_state = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &*window,
            Some(window.scale_factor() as f32),
            window.theme(),
            None,
        );
        Ok(Graphics {
            renderer,
            egui_state,
        })
    }

    fn close(&mut self, event_loop: &ActiveEventLoop) {
        self.shutdown();
        self.graphics = None;
        event_loop.exit();
    }

    fn shutdown(&mut self) {
        let teardown = self.session.shutdown();
        debug!("teardown: {teardown:?}");
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        self.last_error = Some(err);
        self.close(event_loop);
    }

    fn handle_mouse_button(&mut self, state: ElementState, button: WinitMouseButton, consumed: bool) {
        let button = map_mouse_button(button);
        match state {
            ElementState::Pressed if !consumed => {
                self.pointer.set_button_down(button);
                if button == MouseButton::LEFT
                    && self.clicks.press(self.pointer.position(), Instant::now())
                {
                    self.double_click();
                }
            }
            ElementState::Pressed => self.clicks.reset(),
            ElementState::Released => self.pointer.set_button_up(button),
        }
    }

    fn double_click(&mut self) {
        let Some(graphics) = self.graphics.as_ref() else {
            return;
        };
        let size = graphics.renderer.size();
        let viewport = Vec2::new(size.width as f32, size.height as f32);
        let camera = self.camera.params(graphics.renderer.aspect());
        if self
            .session
            .double_activate_at(self.pointer.position(), viewport, &camera)
            .is_none()
        {
            debug!("double click at {:?} hit nothing", self.pointer.position());
        }
    }

    fn handle_cursor_moved(&mut self, position: Vec2) {
        let delta = self.pointer.move_to(position);
        match self.pointer.drag_mode() {
            Some(DragMode::Orbit) => self.camera.orbit(delta),
            Some(DragMode::Pan) => self.camera.pan(delta),
            None => {}
        }
    }

    fn redraw(&mut self) -> Result<()> {
        let Some(graphics) = self.graphics.as_mut() else {
            return Ok(());
        };

        let raw_input = graphics.egui_state.take_egui_input(graphics.renderer.window());
        let mut commands = Vec::new();
        let output = self.egui_ctx.run(raw_input, |ctx| {
            commands = show_panel(ctx, self.session.panel());
        });
        graphics
            .egui_state
            .handle_platform_output(graphics.renderer.window(), output.platform_output);

        for command in commands {
            if let Err(err) = self.session.apply(command) {
                warn!("ignored panel command {command:?}: {err}");
            }
        }

        let jobs = self.egui_ctx.tessellate(output.shapes, output.pixels_per_point);
        graphics.renderer.queue_overlay(Overlay {
            jobs,
            textures_delta: output.textures_delta,
            pixels_per_point: output.pixels_per_point,
        });

        let camera = self.camera.params(graphics.renderer.aspect());
        match self
            .driver
            .tick(self.session.scene(), camera, &mut graphics.renderer)
        {
            Ok(()) => Ok(()),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                graphics.renderer.reconfigure();
                Ok(())
            }
            Err(wgpu::SurfaceError::OutOfMemory) => Err(anyhow!("GPU is out of memory")),
            Err(err) => {
                info!("surface error ({err}); retrying next frame");
                Ok(())
            }
        }
    }
}

impl ApplicationHandler for EditorApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_some() {
            return;
        }
        match self.init_graphics(event_loop) {
            Ok(graphics) => {
                info!("editor window ready; double-click a sphere to remove it");
                self.graphics = Some(graphics);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(graphics) = self.graphics.as_mut() else {
            return;
        };
        if window_id != graphics.renderer.window_id() {
            return;
        }
        let response = graphics
            .egui_state
            .on_window_event(graphics.renderer.window(), &event);

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Named(NamedKey::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => self.close(event_loop),
            WindowEvent::Resized(size) => graphics.renderer.resize(size),
            WindowEvent::ModifiersChanged(modifiers) => {
                self.pointer.set_shift(modifiers.state().shift_key());
            }
            WindowEvent::Focused(false) | WindowEvent::CursorLeft { .. } => {
                self.pointer.release_all();
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.handle_cursor_moved(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.handle_mouse_button(state, button, response.consumed);
            }
            WindowEvent::MouseWheel { delta, .. } if !response.consumed => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(offset) => offset.y as f32 / PIXELS_PER_LINE,
                };
                self.camera.zoom(lines);
            }
            WindowEvent::RedrawRequested => {
                if let Err(err) = self.redraw() {
                    self.fail(event_loop, err);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(graphics) = self.graphics.as_ref() {
            graphics.renderer.window().request_redraw();
        }
    }
}

fn map_mouse_button(button: WinitMouseButton) -> MouseButton {
    let index = match button {
        WinitMouseButton::Left => 0,
        WinitMouseButton::Right => 1,
        WinitMouseButton::Middle => 2,
        WinitMouseButton::Back => 3,
        WinitMouseButton::Forward => 4,
        WinitMouseButton::Other(value) => value.min(u8::MAX as u16) as u8,
    };
    MouseButton::new(index)
}
