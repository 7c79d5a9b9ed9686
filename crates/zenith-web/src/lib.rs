pub mod runner;

pub use runner::WebRunner;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use zenith_pool::input::queue::custom;
use zenith_pool::{InputEvent, PoolConfig};

thread_local! {
    static RUNNER: RefCell<Option<WebRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut WebRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow.as_mut().expect("Game not initialized. Call game_init() first.");
        f(runner)
    })
}

/// Parse an optional JSON config, falling back to defaults on any error.
fn load_config(config_json: Option<String>) -> PoolConfig {
    let Some(json) = config_json else {
        return PoolConfig::default();
    };
    match PoolConfig::from_json(&json) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("rejected config, using defaults: {}", err);
            PoolConfig::default()
        }
    }
}

#[wasm_bindgen]
pub fn game_init(config_json: Option<String>) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = load_config(config_json);
    let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let runner = WebRunner::new(config, seed);

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("zenith-pool: initialized");
}

#[wasm_bindgen]
pub fn game_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn game_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn game_pointer_up(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
}

#[wasm_bindgen]
pub fn game_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn game_custom_event(kind: u32, a: f32, b: f32, c: f32) {
    with_runner(|r| r.push_input(InputEvent::Custom { kind, a, b, c }));
}

/// `mode`: 0 PvP, 1 PvE, 2 EvE.
#[wasm_bindgen]
pub fn game_start(mode: u32) {
    game_custom_event(custom::START_GAME, mode as f32, 0.0, 0.0);
}

#[wasm_bindgen]
pub fn game_reset() {
    game_custom_event(custom::RESET, 0.0, 0.0, 0.0);
}

#[wasm_bindgen]
pub fn game_set_difficulty(difficulty: f32) {
    game_custom_event(custom::SET_DIFFICULTY, difficulty, 0.0, 0.0);
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_buffer_ptr() -> *const f32 {
    with_runner(|r| r.buffer_ptr())
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats())
}

#[wasm_bindgen]
pub fn get_max_sounds() -> u32 {
    with_runner(|r| r.max_sounds())
}

#[wasm_bindgen]
pub fn get_max_events() -> u32 {
    with_runner(|r| r.max_events())
}

#[wasm_bindgen]
pub fn get_table_width() -> f32 {
    with_runner(|r| r.table_width())
}

#[wasm_bindgen]
pub fn get_table_height() -> f32 {
    with_runner(|r| r.table_height())
}

#[wasm_bindgen]
pub fn get_difficulty_label() -> String {
    with_runner(|r| {
        let difficulty = r.session().state().map_or(0.0, |s| s.ai_difficulty);
        zenith_pool::difficulty_label(difficulty).to_string()
    })
}
