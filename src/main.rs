//! Impostor Hunt entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::convert::FromWasmAbi;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Document, EventTarget, HtmlCanvasElement, HtmlElement, HtmlInputElement, KeyboardEvent,
        PointerEvent, TouchEvent,
    };

    use impostor_hunt::Settings;
    use impostor_hunt::consts::*;
    use impostor_hunt::renderer::{RenderState, build_scene, vision_overlay};
    use impostor_hunt::sim::{
        Axis, ChatAuthor, GameEvent, GamePhase, GameState, STATUS_TEXT, submit_chat, tick,
    };

    /// Game instance holding all state
    struct Game {
        /// None until the start button is pressed
        state: Option<GameState>,
        settings: Settings,
        render_state: Option<RenderState>,
        accumulator: f32,
        last_time: f64,
        /// Canvas size in CSS pixels
        arena: Vec2,
        /// Chat messages already copied into the chat box
        chat_cursor: usize,
        last_phase: Option<GamePhase>,
        // FPS tracking
        frame_count: u32,
        fps_window_start: f64,
    }

    impl Game {
        fn new(settings: Settings, arena: Vec2) -> Self {
            Self {
                state: None,
                settings,
                render_state: None,
                accumulator: 0.0,
                last_time: 0.0,
                arena,
                chat_cursor: 0,
                last_phase: None,
                frame_count: 0,
                fps_window_start: 0.0,
            }
        }

        /// (Re)start with a fresh seed
        fn start(&mut self, seed: u64) {
            self.state = Some(GameState::new(seed, self.arena, self.settings.tuning.clone()));
            self.accumulator = 0.0;
            self.chat_cursor = 0;
            self.last_phase = None;
            log::info!("Game started with seed: {}", seed);
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let Some(state) = self.state.as_mut() else {
                return;
            };

            self.accumulator += dt.min(0.1);
            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                log_events(&tick(state));
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = match &self.state {
                Some(state) => build_scene(state),
                None => Vec::new(),
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

        /// Copy new chat lines, move the vision box, refresh the status line
        fn update_dom(&mut self, document: &Document) {
            let Some(state) = &self.state else {
                return;
            };

            if let Some(chat_box) = document.get_element_by_id("chatBox") {
                for message in state.chat.since(self.chat_cursor) {
                    let Ok(line) = document.create_element("div") else {
                        continue;
                    };
                    let text = match message.author {
                        ChatAuthor::System => message.text.clone(),
                        ChatAuthor::Player => format!("You: {}", message.text),
                    };
                    line.set_text_content(Some(&text));
                    let _ = chat_box.append_child(&line);
                }
                chat_box.set_scroll_top(chat_box.scroll_height());
            }
            self.chat_cursor = state.chat.len();

            if let Some(el) = document
                .get_element_by_id("visionLimit")
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            {
                let style = el.style();
                if self.settings.show_vision_overlay {
                    let _ = style.set_property("display", "block");
                    for (name, value) in vision_overlay(state).css() {
                        let _ = style.set_property(name, &value);
                    }
                } else {
                    let _ = style.set_property("display", "none");
                }
            }

            if self.last_phase != Some(state.phase) {
                self.last_phase = Some(state.phase);
                if let Some(el) = document.get_element_by_id("status") {
                    el.set_text_content(Some(status_text(state.phase)));
                }
            }
        }

        /// Track frame rate; logged once per second when enabled
        fn count_frame(&mut self, time: f64) {
            self.frame_count += 1;
            let elapsed = time - self.fps_window_start;
            if elapsed >= 1000.0 {
                if self.settings.show_fps {
                    log::info!("FPS: {}", (self.frame_count as f64 * 1000.0 / elapsed).round());
                }
                self.frame_count = 0;
                self.fps_window_start = time;
            }
        }

        fn press(&mut self, axis: Axis, dir: i8) {
            if let Some(state) = self.state.as_mut() {
                state.intent.press(axis, dir);
            }
        }

        fn release(&mut self, axis: Axis) {
            if let Some(state) = self.state.as_mut() {
                state.intent.release(axis);
            }
        }

        fn submit(&mut self, text: &str) {
            if let Some(state) = self.state.as_mut() {
                if let Some(event) = submit_chat(state, text) {
                    log_events(&[event]);
                }
            }
        }
    }

    fn status_text(phase: GamePhase) -> &'static str {
        match phase {
            GamePhase::Playing => STATUS_TEXT,
            GamePhase::Meeting => "Emergency meeting! Type a color to vote, or skip.",
            GamePhase::Ended => "Game over. Press Start to play again.",
        }
    }

    fn log_events(events: &[GameEvent]) {
        for event in events {
            log::info!("{:?}", event);
        }
    }

    fn js_err(e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    /// Register a listener for the lifetime of the page
    fn listen<E>(target: &EventTarget, event: &str, handler: impl FnMut(E) + 'static)
    where
        E: FromWasmAbi + 'static,
    {
        let closure = Closure::<dyn FnMut(E)>::new(handler);
        let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(js_err)?;

        log::info!("Impostor Hunt starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Game runs in CSS pixels; the surface in device pixels
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        let arena = Vec2::new(client_w as f32, client_h as f32);

        // Write back so stored values are sanitized and every field is present
        let settings = Settings::load();
        settings.save();
        log::info!("Vote matching: {}", settings.tuning.vote_match.as_str());
        let game = Rc::new(RefCell::new(Game::new(settings, arena)));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(js_err)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(js_err)?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, arena)
            .await
            .map_err(js_err)?;
        game.borrow_mut().render_state = Some(render_state);

        setup_direction_buttons(&document, game.clone());
        setup_keyboard(&window, game.clone());
        setup_chat_input(&document, game.clone())?;
        setup_start_button(&document, game.clone())?;

        request_animation_frame(game);

        log::info!("Impostor Hunt running!");
        Ok(())
    }

    /// Desktop and mobile buttons: hold to move, release to stop
    fn setup_direction_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        let buttons = [
            ("up", Axis::Vertical, -1),
            ("down", Axis::Vertical, 1),
            ("left", Axis::Horizontal, -1),
            ("right", Axis::Horizontal, 1),
        ];

        for (id, axis, dir) in buttons {
            for id in [id.to_string(), format!("{}Mobile", id)] {
                let Some(button) = document.get_element_by_id(&id) else {
                    continue;
                };

                {
                    let game = game.clone();
                    listen(&button, "pointerdown", move |_: PointerEvent| {
                        game.borrow_mut().press(axis, dir);
                    });
                }
                for release in ["pointerup", "pointerleave"] {
                    let game = game.clone();
                    listen(&button, release, move |_: PointerEvent| {
                        game.borrow_mut().release(axis);
                    });
                }
                {
                    let game = game.clone();
                    listen(&button, "touchstart", move |event: TouchEvent| {
                        event.prevent_default();
                        game.borrow_mut().press(axis, dir);
                    });
                }
                {
                    let game = game.clone();
                    listen(&button, "touchend", move |event: TouchEvent| {
                        event.prevent_default();
                        game.borrow_mut().release(axis);
                    });
                }
            }
        }
    }

    /// Arrow keys / WASD, ignored while typing in the chat
    fn setup_keyboard(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        fn key_axis(key: &str) -> Option<(Axis, i8)> {
            match key {
                "ArrowUp" | "w" | "W" => Some((Axis::Vertical, -1)),
                "ArrowDown" | "s" | "S" => Some((Axis::Vertical, 1)),
                "ArrowLeft" | "a" | "A" => Some((Axis::Horizontal, -1)),
                "ArrowRight" | "d" | "D" => Some((Axis::Horizontal, 1)),
                _ => None,
            }
        }

        fn typing() -> bool {
            web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.active_element())
                .is_some_and(|el| el.id() == "chatInput")
        }

        {
            let game = game.clone();
            listen(window, "keydown", move |event: KeyboardEvent| {
                if typing() {
                    return;
                }
                if let Some((axis, dir)) = key_axis(&event.key()) {
                    game.borrow_mut().press(axis, dir);
                }
            });
        }
        listen(window, "keyup", move |event: KeyboardEvent| {
            if let Some((axis, _)) = key_axis(&event.key()) {
                game.borrow_mut().release(axis);
            }
        });
    }

    /// The one chat listener; the simulation decides if a line is a vote
    fn setup_chat_input(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let input: HtmlInputElement = document
            .get_element_by_id("chatInput")
            .ok_or("no chat input")?
            .dyn_into()?;

        let input_clone = input.clone();
        listen(&input, "keydown", move |event: KeyboardEvent| {
            if event.key() != "Enter" {
                return;
            }
            let text = input_clone.value();
            input_clone.set_value("");
            game.borrow_mut().submit(&text);
        });
        Ok(())
    }

    fn setup_start_button(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let button = document
            .get_element_by_id("startGame")
            .ok_or("no start button")?;

        listen(&button, "click", move |_: web_sys::MouseEvent| {
            let seed = js_sys::Date::now() as u64;
            game.borrow_mut().start(seed);
        });
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
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

            g.update(dt);
            g.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_dom(&document);
            }
            g.count_frame(time);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        web_sys::console::error_1(&e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Impostor Hunt (native) starting...");
    log::info!("Native mode runs a scripted session - run with `trunk serve` for the web version");

    // Usage: impostor-hunt [seed] [color|coordinate]
    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let vote_match = args.next().and_then(|s| {
        let mode = impostor_hunt::VoteMatch::from_str(&s);
        if mode.is_none() {
            log::warn!("Unknown vote mode {:?}, keeping saved setting", s);
        }
        mode
    });
    headless::run(seed, vote_match);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted session: walk to every task, vote out the impostor at a meeting
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use impostor_hunt::consts::DEFAULT_ARENA;
    use impostor_hunt::{Settings, VoteMatch};
    use impostor_hunt::sim::{Axis, GamePhase, GameState, submit_chat, tick};

    /// Ten minutes of play at 60 Hz
    const MAX_TICKS: u64 = 60 * 60 * 10;

    pub fn run(seed: u64, vote_match: Option<VoteMatch>) {
        let mut tuning = Settings::load().tuning;
        if let Some(mode) = vote_match {
            tuning.vote_match = mode;
        }
        log::info!("Vote matching: {}", tuning.vote_match.as_str());

        let mut state = GameState::new(seed, DEFAULT_ARENA, tuning);
        log::info!("Game initialized with seed: {}", seed);

        while state.time_ticks < MAX_TICKS {
            match state.phase {
                GamePhase::Playing => steer_to_next_task(&mut state),
                GamePhase::Meeting => {
                    // Let the banner post first
                    if state.chat.last().is_some_and(|m| m.text.starts_with("Vote:")) {
                        let ballot = ballot(&state);
                        if let Some(event) = submit_chat(&mut state, &ballot) {
                            log::info!("{:?}", event);
                        }
                    }
                }
                GamePhase::Ended => break,
            }
            for event in tick(&mut state) {
                log::info!("{:?}", event);
            }
        }

        for message in state.chat.messages() {
            println!("[{:?}] {}", message.author, message.text);
        }

        let summary = serde_json::json!({
            "seed": seed,
            "ticks": state.time_ticks,
            "phase": state.phase,
            "tasks_done": state.tasks.iter().filter(|t| t.is_complete()).count(),
            "bots_dead": state.bots.iter().filter(|b| b.dead).count(),
        });
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Summary failed: {}", e),
        }
    }

    /// Name the impostor the way the vote mode expects
    fn ballot(state: &GameState) -> String {
        match (state.impostor_index(), state.tuning.vote_match) {
            (Some(i), VoteMatch::Color) => state.bots[i].color.to_string(),
            (Some(i), VoteMatch::Coordinate) => state.bots[i].pos.x.to_string(),
            (None, _) => "skip".to_string(),
        }
    }

    /// Hold the direction toward the closest open task, or stop
    fn steer_to_next_task(state: &mut GameState) {
        let player = state.player.pos;
        let target = state
            .tasks
            .iter()
            .filter(|t| !t.is_complete())
            .map(|t| t.pos)
            .min_by(|a, b| a.distance(player).total_cmp(&b.distance(player)));

        let Some(target) = target else {
            state.intent.release(Axis::Horizontal);
            state.intent.release(Axis::Vertical);
            return;
        };

        let delta = target - player;
        let speed = state.tuning.player_speed;
        let axis_dir = |d: f32| if d.abs() < speed { 0 } else { d.signum() as i8 };
        state.intent.press(Axis::Horizontal, axis_dir(delta.x));
        state.intent.press(Axis::Vertical, axis_dir(delta.y));
    }
}
