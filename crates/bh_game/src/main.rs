//! Boxhop: a one-screen platformer with a menu, a pause overlay, and a box
//! that jumps. This binary owns the window, the GPU canvas, and the frame
//! loop; everything the player sees lives in the screen modules.

mod assets;
mod gameplay;
mod menu;
mod pause;
mod player;
mod screen;
mod state;
#[cfg(test)]
mod testing;

use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use bh_core::input::{InputState, Key};
use bh_core::layout::{compute_layout, CanvasLayout};
use bh_core::save::SaveStore;
use bh_core::time::FrameClock;
use bh_platform::{create_window, PlatformConfig};
use bh_render::{Canvas, GpuContext, Surface};

use crate::assets::{AssetStore, LoadState};
use crate::gameplay::{GameplayScreen, BACKGROUND_IMAGE, PLAYER_IMAGE};
use crate::menu::MenuScreen;
use crate::pause::PauseScreen;
use crate::screen::{Screen, UpdateCtx};
use crate::state::{GameState, StateManager};

const FONT_BYTES: &[u8] = include_bytes!("../../../assets/fonts/main.ttf");
const SAVE_PATH: &str = "save/boxhop.json";

struct EngineState {
    window: Arc<Window>,
    gpu: GpuContext,
    canvas: Canvas,
    clock: FrameClock,
    input: InputState,
    states: StateManager,
    layout: CanvasLayout,
    assets: AssetStore,
    save: SaveStore,

    menu: MenuScreen,
    gameplay: GameplayScreen,
    pause: PauseScreen,
}

impl EngineState {
    fn new(event_loop: &ActiveEventLoop) -> Self {
        let window = create_window(event_loop, &PlatformConfig::default());
        let gpu = GpuContext::new(window.clone());
        let layout = compute_layout(gpu.size.0 as f32);
        let canvas = Canvas::new(
            &gpu.device,
            &gpu.queue,
            gpu.surface_format,
            gpu.size,
            FONT_BYTES.to_vec(),
        )
        .expect("Failed to create canvas");

        let mut states = StateManager::new();
        states.on_change(|next| log::info!("state -> {}", next.name()));

        let gameplay = GameplayScreen::new(&layout);

        Self {
            window,
            gpu,
            canvas,
            clock: FrameClock::new(),
            input: InputState::new(),
            states,
            layout,
            assets: AssetStore::new(),
            save: SaveStore::open(std::path::Path::new(SAVE_PATH)),
            menu: MenuScreen,
            gameplay,
            pause: PauseScreen,
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let old_layout = self.layout;
        self.layout = compute_layout(width as f32);
        self.gpu.resize(width, height);
        self.canvas.resize(&self.gpu.queue, width, height);
        self.gameplay.apply_layout(&old_layout, &self.layout);
    }

    /// Decoded images ready on the CPU side get their GPU upload here, once.
    fn upload_ready_images(&mut self) {
        for id in [PLAYER_IMAGE, BACKGROUND_IMAGE] {
            if self.canvas.has_image(id) {
                continue;
            }
            if let Some(img) = self.assets.image(id) {
                self.canvas.register_image(
                    &self.gpu.device,
                    &self.gpu.queue,
                    id,
                    &img.pixels,
                    img.width,
                    img.height,
                );
            }
        }
    }

    fn frame(&mut self) {
        self.clock.begin_frame();

        if self.states.current() == GameState::Gameplay
            && self.gameplay.asset_phase() != LoadState::Ready
        {
            self.gameplay.enter(&mut self.assets);
            self.upload_ready_images();
        }

        // The state is re-read before every step, so a transition taken in
        // one step redirects the remaining steps of the same frame. The
        // frame then renders whichever screen ran last (on a zero-step frame,
        // whichever is current).
        let now_ms = self.clock.now_ms();
        let window_size = self.gpu.size;
        let mut active = self.states.current();

        while self.clock.should_step() {
            active = self.states.current();
            let mut ctx = UpdateCtx {
                input: &mut self.input,
                states: &mut self.states,
                layout: &self.layout,
                window_size,
                now_ms,
                save: &mut self.save,
            };
            update_active(active, &mut self.menu, &mut self.gameplay, &mut self.pause, &mut ctx);
        }

        let Some((frame, view)) = self.gpu.begin_frame() else {
            return;
        };

        self.canvas.begin_frame(self.layout.width, self.layout.height);
        render_active(
            active,
            &mut self.menu,
            &mut self.gameplay,
            &mut self.pause,
            &mut self.canvas,
        );

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });
        if let Err(message) =
            self.canvas
                .flush(&self.gpu.device, &self.gpu.queue, &mut encoder, &view, wgpu::Color::BLACK)
        {
            log::error!("canvas flush failed: {message}");
        }
        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        frame.present();

        // Edge input survives zero-step frames so a fast click or tap is
        // seen by the next simulation step instead of vanishing.
        if self.clock.steps_this_frame > 0 {
            self.input.end_frame();
        }
    }

    fn shutdown(&mut self) {
        self.menu.cleanup();
        self.gameplay.cleanup();
        self.pause.cleanup();
        log::info!("shutting down after {} frames", self.clock.frame_count);
    }
}

fn update_active(
    active: GameState,
    menu: &mut MenuScreen,
    gameplay: &mut GameplayScreen,
    pause: &mut PauseScreen,
    ctx: &mut UpdateCtx<'_>,
) {
    match active {
        GameState::Menu => menu.update(ctx),
        GameState::Gameplay => gameplay.update(ctx),
        GameState::Pause => pause.update(ctx),
    }
}

fn render_active(
    active: GameState,
    menu: &mut MenuScreen,
    gameplay: &mut GameplayScreen,
    pause: &mut PauseScreen,
    surface: &mut dyn Surface,
) {
    match active {
        GameState::Menu => menu.render(surface),
        GameState::Gameplay => gameplay.render(surface),
        GameState::Pause => {
            // The frozen playfield stays visible under the translucent
            // overlay.
            gameplay.render(surface);
            pause.render(surface);
        }
    }
}

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::ArrowLeft => Some(Key::Left),
        KeyCode::ArrowRight => Some(Key::Right),
        KeyCode::ArrowUp => Some(Key::Up),
        KeyCode::KeyA => Some(Key::A),
        KeyCode::KeyD => Some(Key::D),
        KeyCode::KeyW => Some(Key::W),
        KeyCode::Space => Some(Key::Space),
        KeyCode::Escape => Some(Key::Escape),
        _ => None,
    }
}

#[derive(Default)]
struct App {
    engine: Option<EngineState>,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.engine.is_none() {
            self.engine = Some(EngineState::new(event_loop));
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                engine.shutdown();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                engine.resize(size.width, size.height);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    if let Some(key) = map_key(code) {
                        match event.state {
                            ElementState::Pressed => engine.input.key_down(key),
                            ElementState::Released => engine.input.key_up(key),
                        }
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                engine.input.mouse_position = (position.x, position.y);
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                let (x, y) = engine.input.mouse_position;
                engine.input.press_click(x, y);
            }
            WindowEvent::RedrawRequested => {
                engine.frame();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(engine) = &self.engine {
            engine.window.request_redraw();
        }
    }
}


fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::default();
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("event loop error: {e}");
    }
}
