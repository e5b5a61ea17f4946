//! Ray Maze entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent};

    use glam::Vec2;
    use ray_maze::audio::{AudioManager, SoundEffect};
    use ray_maze::besttimes::{BestTimes, format_time};
    use ray_maze::consts::*;
    use ray_maze::renderer::{RenderState, build_scene};
    use ray_maze::settings::Settings;
    use ray_maze::sim::{GamePhase, GameState, RayHit, TickEvent, TickInput, sweep, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        settings: Settings,
        best_times: BestTimes,
        audio: AudioManager,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        /// Per-frame ray sweep buffer, reused across frames
        ray_hits: Vec<Option<RayHit>>,
        /// Canvas client size for pointer mapping
        canvas_size: (f32, f32),
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        /// Leaderboard rank earned by the last win, for the win screen
        last_rank: Option<usize>,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let settings = Settings::load();
            let mut audio = AudioManager::new();
            audio.set_master_volume(settings.master_volume);
            audio.set_sfx_volume(settings.sfx_volume);

            Self {
                state: GameState::new(seed),
                render_state: None,
                settings,
                best_times: BestTimes::load(),
                audio,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                ray_hits: Vec::new(),
                canvas_size: (0.0, 0.0),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                last_rank: None,
            }
        }

        fn set_canvas_size(&mut self, w: f32, h: f32) {
            self.canvas_size = (w, h);
        }

        /// Convert a client-pixel position to world units (inverse of the
        /// renderer's letterboxed world-to-NDC mapping)
        fn pos_to_world(&self, x: f32, y: f32) -> Vec2 {
            let (w, h) = self.canvas_size;
            if w <= 0.0 || h <= 0.0 {
                return SPAWN;
            }
            let aspect = w / h;

            let mut nx = x / w * 2.0 - 1.0;
            let mut ny = 1.0 - y / h * 2.0;
            if aspect > 1.0 {
                nx *= aspect;
            } else {
                ny /= aspect;
            }

            Vec2::new((nx + 1.0) * WORLD_SIZE / 2.0, (1.0 - ny) * WORLD_SIZE / 2.0)
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input;
                if let Some(event) = tick(&mut self.state, &input) {
                    self.handle_event(event);
                }
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.click = false;
                self.input.pause = false;
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// React to a sim transition: sounds, leaderboard
        fn handle_event(&mut self, event: TickEvent) {
            match event {
                TickEvent::Started => self.audio.play(SoundEffect::Start),
                TickEvent::LevelCleared => self.audio.play(SoundEffect::LevelClear),
                TickEvent::WallTouched => self.audio.play(SoundEffect::WallTouch),
                TickEvent::Won => {
                    self.audio.play(SoundEffect::Win);

                    let time_secs = self.state.elapsed_secs();
                    let rank =
                        self.best_times
                            .add_time(time_secs, self.state.resets, js_sys::Date::now());
                    if rank.is_some() {
                        self.best_times.save();
                        self.audio.play(SoundEffect::BestTime);
                        log::info!(
                            "New best time: {} (rank {})",
                            format_time(time_secs),
                            rank.unwrap_or(0)
                        );
                    }
                    self.last_rank = rank;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = if self.state.phase == GamePhase::Start {
                // Start screen is just the HUD overlay on black
                Vec::new()
            } else {
                sweep(
                    self.state.particle,
                    &self.state.walls,
                    self.settings.ray_count(),
                    &mut self.ray_hits,
                );
                build_scene(&self.state, &self.ray_hits, self.settings.glow_enabled())
            };

            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            // Level
            if let Some(el) = document.query_selector("#hud-level .hud-value").ok().flatten() {
                el.set_text_content(Some(&format!(
                    "{}/{}",
                    self.state.level_index + 1,
                    LEVEL_COUNT
                )));
            }

            // Run timer
            if let Some(el) = document.query_selector("#hud-time .hud-value").ok().flatten() {
                el.set_text_content(Some(&format_time(self.state.elapsed_secs())));
            }

            // Resets
            if let Some(el) = document
                .query_selector("#hud-resets .hud-value")
                .ok()
                .flatten()
            {
                el.set_text_content(Some(&self.state.resets.to_string()));
            }

            // Best time
            if let Some(el) = document.query_selector("#hud-best .hud-value").ok().flatten() {
                let text = match self.best_times.best() {
                    Some(best) => format_time(best),
                    None => "--".to_string(),
                };
                el.set_text_content(Some(&text));
            }

            // FPS
            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.settings.show_fps {
                    let _ = el.set_attribute("class", "hud-item");
                    if let Some(val) = document.query_selector("#hud-fps .hud-value").ok().flatten()
                    {
                        val.set_text_content(Some(&self.fps.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hud-item hidden");
                }
            }

            // Start prompt
            if let Some(el) = document.get_element_by_id("start-prompt") {
                if self.state.phase == GamePhase::Start {
                    let _ = el.set_attribute("class", "");
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }

            // Pause menu
            if let Some(el) = document.get_element_by_id("pause-menu") {
                if self.state.phase == GamePhase::Paused {
                    let _ = el.set_attribute("class", "");
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }

            // Win screen
            if let Some(el) = document.get_element_by_id("win-screen") {
                if self.state.phase == GamePhase::Won {
                    let _ = el.set_attribute("class", "");
                    if let Some(time_el) = document.get_element_by_id("final-time") {
                        time_el.set_text_content(Some(&format_time(self.state.elapsed_secs())));
                    }
                    if let Some(resets_el) = document.get_element_by_id("final-resets") {
                        resets_el.set_text_content(Some(&self.state.resets.to_string()));
                    }
                    if let Some(rank_el) = document.get_element_by_id("win-rank") {
                        let text = match self.last_rank {
                            Some(rank) => format!("Best time #{rank}!"),
                            None => String::new(),
                        };
                        rank_el.set_text_content(Some(&text));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }

        /// Cycle the quality preset and persist it
        fn cycle_quality(&mut self) {
            use ray_maze::QualityPreset;
            self.settings.quality = match self.settings.quality {
                QualityPreset::Low => QualityPreset::Medium,
                QualityPreset::Medium => QualityPreset::High,
                QualityPreset::High => QualityPreset::Low,
            };
            self.settings.save();
            log::info!("Quality preset: {}", self.settings.quality.as_str());
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Ray Maze starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // The glowing particle is the cursor
        let _ = canvas.style().set_property("cursor", "none");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        game.borrow_mut()
            .set_canvas_size(client_w as f32, client_h as f32);

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await;
        game.borrow_mut().render_state = Some(render_state);

        // Set up input handlers
        setup_input_handlers(&canvas, game.clone());

        // Auto-pause when the tab loses focus
        setup_auto_pause(game.clone());

        // Show HUD
        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        // Start game loop
        request_animation_frame(game);

        log::info!("Ray Maze running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse move - particle follows the cursor
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let w = canvas_clone.client_width() as f32;
                let h = canvas_clone.client_height() as f32;
                g.set_canvas_size(w, h);
                let pos = g.pos_to_world(event.offset_x() as f32, event.offset_y() as f32);
                g.input.pointer = Some(pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse click - start / restart
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.input.click = true;
                g.audio.resume();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    let w = canvas_clone.client_width() as f32;
                    let h = canvas_clone.client_height() as f32;
                    g.set_canvas_size(w, h);
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    let y = touch.client_y() as f32 - rect.top() as f32;
                    let pos = g.pos_to_world(x, y);
                    g.input.pointer = Some(pos);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start (acts as click + position)
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.input.click = true;
                g.audio.resume();
                if let Some(touch) = event.touches().get(0) {
                    let w = canvas_clone.client_width() as f32;
                    let h = canvas_clone.client_height() as f32;
                    g.set_canvas_size(w, h);
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    let y = touch.client_y() as f32 - rect.top() as f32;
                    let pos = g.pos_to_world(x, y);
                    g.input.pointer = Some(pos);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " | "Enter" => g.input.click = true,
                    "Escape" => g.input.pause = true,
                    "q" | "Q" => g.cycle_quality(),
                    "f" | "F" => {
                        g.settings.show_fps = !g.settings.show_fps;
                        g.settings.save();
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.state.phase == GamePhase::Playing {
                        g.input.pause = true;
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.state.phase == GamePhase::Playing {
                    g.input.pause = true;
                    log::info!("Auto-paused (window blur)");
                }
                if g.settings.mute_on_blur {
                    g.audio.set_muted(true);
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Unmute on focus
        {
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().audio.set_muted(false);
            });
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Ray Maze (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    println!("\nRunning sim smoke test...");
    smoke_run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless full run: click to start, then walk the particle straight onto
/// each goal. Exercises the whole sim without a browser.
#[cfg(not(target_arch = "wasm32"))]
fn smoke_run() {
    use ray_maze::sim::{GamePhase, GameState, TickEvent, TickInput, tick};

    let mut state = GameState::new(0xC0FFEE);
    let start = TickInput {
        click: true,
        ..Default::default()
    };
    assert_eq!(tick(&mut state, &start), Some(TickEvent::Started));

    for _ in 0..3 {
        let input = TickInput {
            pointer: Some(state.goal),
            ..Default::default()
        };
        let event = tick(&mut state, &input);
        assert!(matches!(
            event,
            Some(TickEvent::LevelCleared) | Some(TickEvent::Won)
        ));
    }

    assert_eq!(state.phase, GamePhase::Won);
    println!("✓ Sim smoke test passed (run time {:.3}s)", state.elapsed_secs());
}
