//! Asteroid Dodge entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlInputElement,
        HtmlSelectElement, KeyboardEvent, Window,
    };

    use asteroid_dodge::platform::now_ms;
    use asteroid_dodge::platform::storage::LocalStore;
    use asteroid_dodge::renderer::draw_frame;
    use asteroid_dodge::shell::ShellView;
    use asteroid_dodge::sim::{self, Bounds, GameEvent, GameState};
    use asteroid_dodge::{BestTime, GameSettings, MovementPolicy, SettingField};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        store: LocalStore,
        /// Pending animation frame request
        frame_id: Option<i32>,
        /// Active spawner interval and the callback it owns
        spawner: Option<(i32, Closure<dyn FnMut()>)>,
    }

    impl Game {
        /// Match the canvas to the viewport and re-centre the player
        fn fit_to_viewport(&mut self, window: &Window) {
            let Some((w, h)) = viewport_size(window) else {
                log::warn!("Viewport size unavailable");
                return;
            };
            self.canvas.set_width(w);
            self.canvas.set_height(h);
            sim::resize(&mut self.state, w as f32, h as f32);
        }

        /// Persist the best time after a run
        fn on_event(&mut self, event: GameEvent) {
            sim::record_run(&self.state, &event, &mut self.store);
        }
    }

    fn viewport_size(window: &Window) -> Option<(u32, u32)> {
        let w = window.inner_width().ok()?.as_f64()?;
        let h = window.inner_height().ok()?.as_f64()?;
        Some((w.max(0.0) as u32, h.max(0.0) as u32))
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Asteroid Dodge starting...");

        if init().is_none() {
            log::error!("No canvas or 2D context available; game not started");
        }
    }

    /// Set up the game; `None` if the page lacks a usable canvas
    fn init() -> Option<()> {
        let window = web_sys::window()?;
        let document = window.document()?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")?
            .dyn_into()
            .ok()?;
        let ctx: CanvasRenderingContext2d = canvas.get_context("2d").ok()??.dyn_into().ok()?;

        let store = LocalStore::open();
        let settings = GameSettings::load(&store);
        let best = BestTime::load(&store);

        let seed = js_sys::Date::now() as u64;
        let state = GameState::new(seed, Bounds::new(0.0, 0.0), settings, best);
        let game = Rc::new(RefCell::new(Game {
            state,
            canvas,
            ctx,
            store,
            frame_id: None,
            spawner: None,
        }));
        game.borrow_mut().fit_to_viewport(&window);

        log::info!("Game initialized with seed: {}", seed);

        setup_resize(&window, game.clone());
        setup_keyboard(&document, game.clone());
        setup_settings_inputs(&document, game.clone());
        setup_start_button(&document, game.clone());
        setup_teardown(&window, game.clone());

        update_shell(&document, &game.borrow().state);

        log::info!("Asteroid Dodge ready");
        Some(())
    }

    fn setup_resize(window: &Window, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if let Some(window) = web_sys::window() {
                game.borrow_mut().fit_to_viewport(&window);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_keyboard(document: &Document, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut g = game.borrow_mut();
            if sim::handle_key(&mut g.state, &event.key()) {
                // Arrow keys would otherwise scroll the page
                event.prevent_default();
            }
        });
        let _ =
            document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Two-way bind the modal's numeric inputs and movement selector
    fn setup_settings_inputs(document: &Document, game: Rc<RefCell<Game>>) {
        for field in SettingField::ALL {
            let Some(input) = document
                .get_element_by_id(field.input_id())
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            else {
                log::warn!("Missing input #{}", field.input_id());
                continue;
            };

            let game = game.clone();
            let input_clone = input.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                let value = field.apply(&mut g.state.settings, &input_clone.value());
                input_clone.set_value(&value.to_string());
                let g = &mut *g;
                g.state.settings.save(&mut g.store);
            });
            let _ = input.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(select) = document
            .get_element_by_id("movement")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        {
            let select_clone = select.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                if let Some(policy) = MovementPolicy::from_str(&select_clone.value()) {
                    g.state.settings.movement = policy;
                    let g = &mut *g;
                    g.state.settings.save(&mut g.store);
                    log::info!("Movement policy: {}", policy.as_str());
                }
            });
            let _ = select.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_start_button(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(btn) = document.get_element_by_id("start-btn") else {
            log::warn!("Missing #start-btn");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            start(&game);
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Cancel pending callbacks when the page goes away
    fn setup_teardown(window: &Window, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            cancel_frame(&game);
            stop_spawner(&game);
            log::info!("Torn down");
        });
        let _ =
            window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Idle/GameOver -> Running
    fn start(game: &Rc<RefCell<Game>>) {
        let started = {
            let mut g = game.borrow_mut();
            let g = &mut *g;
            g.state.settings.save(&mut g.store);
            sim::start_game(&mut g.state, now_ms())
        };
        if !started {
            return;
        }

        // Leftovers from a previous run must not keep firing
        cancel_frame(game);
        stop_spawner(game);

        start_spawner(game);
        request_animation_frame(game.clone());

        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            update_shell(&document, &game.borrow().state);
        }
    }

    fn start_spawner(game: &Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let period = game.borrow().state.settings.spawn_interval_ms;
        let game_cb = game.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            sim::spawn_tick(&mut game_cb.borrow_mut().state);
        });
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            period.min(i32::MAX as u32) as i32,
        ) {
            Ok(id) => game.borrow_mut().spawner = Some((id, closure)),
            Err(e) => log::warn!("Spawner interval failed: {:?}", e),
        }
    }

    fn stop_spawner(game: &Rc<RefCell<Game>>) {
        let spawner = game.borrow_mut().spawner.take();
        if let (Some((id, closure)), Some(window)) = (spawner, web_sys::window()) {
            window.clear_interval_with_handle(id);
            drop(closure);
        }
    }

    fn cancel_frame(game: &Rc<RefCell<Game>>) {
        let frame_id = game.borrow_mut().frame_id.take();
        if let (Some(id), Some(window)) = (frame_id, web_sys::window()) {
            let _ = window.cancel_animation_frame(id);
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let game_cb = game.clone();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game_cb);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => game.borrow_mut().frame_id = Some(id),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let still_running = {
            let mut g = game.borrow_mut();
            g.frame_id = None;
            if !g.state.is_running() {
                return;
            }

            let event = sim::tick(&mut g.state, now_ms());
            let g = &mut *g;
            draw_frame(&g.state, &mut g.ctx);
            if let Some(event) = event {
                g.on_event(event);
            }
            g.state.is_running()
        };

        if still_running {
            request_animation_frame(game);
        } else {
            stop_spawner(&game);
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                update_shell(&document, &game.borrow().state);
            }
        }
    }

    /// Push the modal view model into the DOM
    fn update_shell(document: &Document, state: &GameState) {
        let view = ShellView::from_state(state);
        if let Ok(json) = serde_json::to_string(&view) {
            log::debug!("Shell view: {}", json);
        }

        set_hidden(document, "start-modal", !view.show_modal);
        set_hidden(document, "results", !view.game_over);
        set_text(document, "modal-title", view.title);
        set_text(document, "start-btn", view.button_label);
        if let Some(t) = &view.current_time {
            set_text(document, "current-time", t);
        }
        if let Some(t) = &view.best_time {
            set_text(document, "best-time", t);
        }

        for field in SettingField::ALL {
            if let Some(input) = document
                .get_element_by_id(field.input_id())
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            {
                input.set_value(&field.get(&state.settings).to_string());
            }
        }
        if let Some(select) = document
            .get_element_by_id("movement")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        {
            select.set_value(&state.settings.movement.as_str().to_lowercase());
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            if el.class_list().toggle_with_force("hidden", hidden).is_err() {
                log::warn!("Could not toggle visibility of #{}", id);
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Asteroid Dodge (native) starting...");
    log::info!("Native mode runs a headless session - use `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(|| asteroid_dodge::platform::now_ms() as u64);
    headless::run(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted session on a fixed 800x600 field at 60 fps
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;

    use asteroid_dodge::platform::default_store;
    use asteroid_dodge::sim::{self, Bounds, Direction, GameState};
    use asteroid_dodge::{BestTime, GameSettings};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Two minutes of play
    const MAX_FRAMES: u64 = 60 * 120;
    /// Player reacts every few frames, like a human tapping keys
    const REACTION_FRAMES: u64 = 4;

    pub fn run(seed: u64) {
        let mut store = default_store();
        let settings = GameSettings::load(&*store);
        let best = BestTime::load(&*store);
        let mut state = GameState::new(seed, Bounds::new(800.0, 600.0), settings, best);

        let mut now = 0.0;
        sim::start_game(&mut state, now);
        log::info!("Headless run with seed {}", seed);

        while state.frame < MAX_FRAMES {
            now += FRAME_MS;
            sim::advance_spawner(&mut state, FRAME_MS);
            if state.frame % REACTION_FRAMES == 0 {
                if let Some(dir) = safest_direction(&state) {
                    sim::handle_key(&mut state, key_for(dir));
                }
            }
            if let Some(event) = sim::tick(&mut state, now) {
                sim::record_run(&state, &event, &mut *store);
                break;
            }
        }

        if state.is_running() {
            log::info!(
                "Survived the full {} frames with {} asteroids",
                MAX_FRAMES,
                state.asteroids.len()
            );
        }
        let survived = if state.is_game_over() {
            state.session.current_time_ms
        } else {
            state.session.elapsed_ms(now)
        };
        println!(
            "time {}  best {}  asteroids {}",
            sim::format_duration(survived),
            sim::format_duration(state.session.best.ms),
            state.asteroids.len()
        );
    }

    /// Step that maximizes distance to the nearest asteroid next frame
    fn safest_direction(state: &GameState) -> Option<Direction> {
        let clearance = |player_pos: Vec2| {
            let center = player_pos + state.player.size / 2.0;
            state
                .asteroids
                .iter()
                .map(|a| (a.pos + a.vel + a.size() / 2.0).distance(center))
                .fold(f32::INFINITY, f32::min)
        };

        let stay = clearance(state.player.pos);
        [
            Direction::Left,
            Direction::Right,
            Direction::Up,
            Direction::Down,
        ]
        .into_iter()
        .map(|dir| {
            let pos = state
                .settings
                .movement
                .step(&state.player, dir, &state.bounds);
            (dir, clearance(pos))
        })
        .filter(|(_, c)| *c > stay)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(dir, _)| dir)
    }

    fn key_for(dir: Direction) -> &'static str {
        match dir {
            Direction::Left => "ArrowLeft",
            Direction::Right => "ArrowRight",
            Direction::Up => "ArrowUp",
            Direction::Down => "ArrowDown",
        }
    }
}
