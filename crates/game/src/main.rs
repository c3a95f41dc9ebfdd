//! Flaneur: wander an endless park, dodge the lizards, grab a baguette.

use std::sync::Arc;

use anyhow::Result;
use audio::AudioSystem;
use engine_core::{Soundtrack, Time};
use game::hud::TitleHud;
use game::scene::SceneLedger;
use game::{GameConfig, Io, WorldState};
use input::InputState;
use procgen::ChunkGenerator;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

/// Everything alive while the window is open.
struct GameState {
    window: Arc<Window>,
    config: GameConfig,
    time: Time,
    input: InputState,
    world: WorldState,
    scene: SceneLedger,
    audio: Option<AudioSystem>,
    title: TitleHud,
    running: bool,
}

impl GameState {
    fn new(window: Arc<Window>, config: GameConfig) -> Self {
        let mut time = Time::new();
        time.set_fixed_rate(config.tick_rate as f64);

        let mut audio = match AudioSystem::new() {
            Ok(audio) => Some(audio),
            Err(e) => {
                log::warn!("Audio unavailable, running silent: {:#}", e);
                None
            }
        };
        if let Some(track) = config.music_path.as_deref() {
            audio.play_background_music(track, config.music_volume);
        }

        let mut state = Self {
            window,
            world: new_world(&config),
            config,
            time,
            input: InputState::new(),
            scene: SceneLedger::new(),
            audio,
            title: TitleHud::new(),
            running: true,
        };
        let mut io = Io {
            scene: &mut state.scene,
            soundtrack: &mut state.audio,
            hud: &mut state.title,
        };
        state.world.begin(&mut io);
        state.sync_title();
        state
    }

    /// Handle a window event. Returns true if the app should exit.
    fn handle_window_event(&mut self, event: WindowEvent) -> bool {
        match event {
            WindowEvent::CloseRequested => {
                self.running = false;
                true
            }
            WindowEvent::Focused(false) => {
                self.input.release_all();
                if let Some(audio) = &mut self.audio {
                    audio.pause();
                }
                false
            }
            WindowEvent::Focused(true) => {
                if let Some(audio) = &mut self.audio {
                    audio.resume();
                }
                false
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    self.input.process_keyboard(key, event.state);
                }
                false
            }
            WindowEvent::RedrawRequested => {
                self.update();
                !self.running
            }
            _ => false,
        }
    }

    /// Drain the tick accumulator.
    fn update(&mut self) {
        self.time.update();
        while self.time.should_fixed_update() {
            if self.input.is_quit_pressed() {
                self.running = false;
                return;
            }
            let mut io = Io {
                scene: &mut self.scene,
                soundtrack: &mut self.audio,
                hud: &mut self.title,
            };
            let was_over = self.world.is_game_over();
            self.world.tick(&self.input, &mut io);
            if was_over && self.input.is_restart_pressed() {
                self.restart();
            }
            self.input.end_tick();
        }
        self.sync_title();
    }

    /// Throw the finished world away and start a fresh one.
    fn restart(&mut self) {
        self.world.teardown(&mut self.scene);
        self.world = new_world(&self.config);
        let mut io = Io {
            scene: &mut self.scene,
            soundtrack: &mut self.audio,
            hud: &mut self.title,
        };
        self.world.begin(&mut io);
        log::info!("Restarted");
    }

    fn sync_title(&mut self) {
        if let Some(text) = self.title.take_update() {
            self.window.set_title(text);
        }
    }
}

fn new_world(config: &GameConfig) -> WorldState {
    let seed = config.world_seed.unwrap_or_else(rand::random);
    log::info!("World seed {}", seed);
    WorldState::new(config, ChunkGenerator::new(config.chunk_gen(seed)))
}

/// Application handler for winit.
struct App {
    state: Option<GameState>,
}

impl App {
    fn new() -> Self {
        Self { state: None }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let config = GameConfig::load();
        let window_attrs = Window::default_attributes()
            .with_title("Flaneur")
            .with_inner_size(winit::dpi::LogicalSize::new(config.window_width, config.window_height));

        let window = match event_loop.create_window(window_attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };
        window.request_redraw();
        self.state = Some(GameState::new(window, config));
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(state) = &mut self.state {
            if state.handle_window_event(event) || !state.running {
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("Flaneur");
    println!("  Arrows / WASD  move      Space  jump");
    println!("  M              mute      R / Enter  restart after game over");
    println!("  Escape         quit");

    log::info!("Starting Flaneur");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app)?;

    Ok(())
}
