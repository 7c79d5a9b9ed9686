//! Match lifecycle: menu, play and game over, plus the AI turn and the
//! fixed-rate tick driver.

use glam::Vec2;

use crate::ai::shot::{Shot, ShotSelector};
use crate::api::config::PoolConfig;
use crate::api::events::MatchEvent;
use crate::api::types::{GameMode, GameStatus};
use crate::core::rng::Rng;
use crate::core::time::{FixedTimestep, Scheduler, TimerHandle};
use crate::game::state::{Action, GameState};
use crate::input::aim::{AimGesture, AimPreview};
use crate::input::queue::{custom, InputEvent};
use crate::physics::table::Table;

/// Where the computer seat is in taking its shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiTurn {
    /// Nothing queued. Humans may aim.
    Idle,
    /// A shot is queued behind the think delay.
    Scheduled(TimerHandle),
    /// The shot was taken; waiting for the table to settle.
    Applied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingAction {
    AiShot,
}

/// Owns one table and drives matches on it.
pub struct Session {
    config: PoolConfig,
    table: Table,
    selector: ShotSelector,
    rng: Rng,
    status: GameStatus,
    state: Option<GameState>,
    ai_turn: AiTurn,
    scheduler: Scheduler<PendingAction>,
    timestep: FixedTimestep,
    aim: AimGesture,
    events: Vec<MatchEvent>,
    ticks: u64,
}

impl Session {
    pub fn new(config: PoolConfig) -> Self {
        let seed = config.ai.seed;
        Self {
            table: Table::from_config(&config),
            selector: ShotSelector::new(config.ai),
            rng: Rng::new(seed),
            status: GameStatus::Menu,
            state: None,
            ai_turn: AiTurn::Idle,
            scheduler: Scheduler::new(),
            timestep: FixedTimestep::new(config.tick.fixed_dt, config.tick.max_steps_per_frame),
            aim: AimGesture::new(config.aim),
            events: Vec::new(),
            ticks: 0,
            config,
        }
    }

    /// Replace the AI random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Rng::new(seed);
        self
    }

    // ---- Lifecycle ----

    /// Rack a fresh table and begin play. Valid from any status.
    pub fn start_game(&mut self, mode: GameMode) {
        self.cancel_ai();
        self.aim.cancel();
        self.timestep.reset();
        self.state = Some(GameState::new(mode, &self.config));
        self.status = GameStatus::Playing;
        self.events.push(MatchEvent::MatchStarted { mode });
        log::info!("match started: {:?}", mode);
        self.arm_ai();
    }

    /// Drop the match and return to the menu.
    pub fn reset(&mut self) {
        self.cancel_ai();
        self.aim.cancel();
        self.state = None;
        self.status = GameStatus::Menu;
        log::info!("session reset");
    }

    /// Clamp to [0, 1] and store on the running match.
    pub fn set_ai_difficulty(&mut self, difficulty: f32) {
        let difficulty = difficulty.clamp(0.0, 1.0);
        let Some(state) = self.state.as_mut() else {
            log::debug!("difficulty change ignored outside a match");
            return;
        };
        state.ai_difficulty = difficulty;
        self.events.push(MatchEvent::DifficultyChanged { difficulty });
    }

    // ---- Human input ----

    /// Whether a human may start aiming right now.
    pub fn can_aim(&self) -> bool {
        self.status == GameStatus::Playing
            && self.ai_turn == AiTurn::Idle
            && self
                .state
                .as_ref()
                .is_some_and(|s| s.awaiting_shot() && s.is_human_turn())
    }

    /// Returns false if input is not accepted right now.
    pub fn press(&mut self, pointer: Vec2) -> bool {
        if !self.can_aim() {
            return false;
        }
        let Some(state) = self.state.as_ref() else {
            return false;
        };
        self.aim.press(state.cue_ball.position, pointer);
        true
    }

    pub fn drag(&mut self, pointer: Vec2) {
        self.aim.drag(pointer);
    }

    /// End the aim gesture. Returns true if a shot was taken.
    pub fn release(&mut self) -> bool {
        match self.aim.release() {
            Some(shot) => self.shoot(shot),
            None => false,
        }
    }

    /// Strike for the human seat. Refused unless [`can_aim`](Self::can_aim).
    pub fn shoot(&mut self, shot: Shot) -> bool {
        if !self.can_aim() {
            return false;
        }
        self.apply(Action::Shoot(shot));
        true
    }

    pub fn handle_input(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerDown { x, y } => {
                self.press(Vec2::new(x, y));
            }
            InputEvent::PointerMove { x, y } => self.drag(Vec2::new(x, y)),
            InputEvent::PointerUp { .. } => {
                self.release();
            }
            InputEvent::Custom { kind, a, .. } => match kind {
                custom::START_GAME => match GameMode::from_code(a as u32) {
                    Some(mode) => self.start_game(mode),
                    None => log::warn!("unknown game mode code {}", a),
                },
                custom::RESET => self.reset(),
                custom::SET_DIFFICULTY => self.set_ai_difficulty(a),
                other => log::warn!("unknown custom input kind {}", other),
            },
        }
    }

    // ---- Tick driver ----

    /// Convert frame time into whole ticks and run them. Returns the tick count.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        let steps = self.timestep.accumulate(frame_dt);
        for _ in 0..steps {
            self.tick();
        }
        steps
    }

    /// Run exactly one tick: due timers, then physics and rules, then AI arming.
    pub fn tick(&mut self) {
        self.ticks += 1;

        for (handle, action) in self.scheduler.advance(self.timestep.dt()) {
            match action {
                PendingAction::AiShot => self.fire_ai(handle),
            }
        }

        if self.status == GameStatus::Playing {
            self.apply(Action::Tick);
        }

        self.arm_ai();
    }

    // ---- Readers ----

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// `None` while in the menu.
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn aim_preview(&self) -> Option<AimPreview> {
        self.aim.preview()
    }

    pub fn ai_turn(&self) -> AiTurn {
        self.ai_turn
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Ticks run since construction.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Take the events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<MatchEvent> {
        std::mem::take(&mut self.events)
    }

    // ---- Internals ----

    fn apply(&mut self, action: Action) {
        let Some(state) = self.state.as_ref() else {
            return;
        };
        let transition = state.step(action, &self.table, &self.config.audio);
        let moving = transition.state.is_moving;
        self.state = Some(transition.state);

        // A queued AI shot is only valid for a table at rest.
        if moving && matches!(self.ai_turn, AiTurn::Scheduled(_)) {
            log::debug!("table moving again, AI shot withdrawn");
            self.cancel_ai();
        }

        for event in transition.events {
            match event {
                MatchEvent::TurnChanged { player } => {
                    log::debug!("turn: {:?}", player);
                    if self.ai_turn == AiTurn::Applied {
                        self.ai_turn = AiTurn::Idle;
                    }
                }
                MatchEvent::GameOver { winner } => {
                    log::info!("game over, winner {:?}", winner);
                    self.status = GameStatus::GameOver;
                    self.cancel_ai();
                    self.aim.cancel();
                }
                _ => {}
            }
            self.events.push(event);
        }
    }

    /// Queue an AI shot if the seat to play is computer-controlled and idle.
    fn arm_ai(&mut self) {
        if self.status != GameStatus::Playing || self.ai_turn != AiTurn::Idle {
            return;
        }
        let Some(state) = self.state.as_ref() else {
            return;
        };
        if !(state.is_ai_turn() && state.awaiting_shot()) {
            return;
        }
        let handle = self
            .scheduler
            .schedule(self.config.ai.think_delay, PendingAction::AiShot);
        self.ai_turn = AiTurn::Scheduled(handle);
        log::debug!("AI shot scheduled for {:?}", state.current_player);
    }

    fn fire_ai(&mut self, handle: TimerHandle) {
        if self.ai_turn != AiTurn::Scheduled(handle) {
            return;
        }
        let Some(state) = self.state.as_ref() else {
            self.ai_turn = AiTurn::Idle;
            return;
        };
        // Idle lets arm_ai queue a fresh shot once the table settles.
        if self.status != GameStatus::Playing || !state.awaiting_shot() {
            self.ai_turn = AiTurn::Idle;
            return;
        }

        self.ai_turn = AiTurn::Applied;
        match self.selector.select(&state.cue_ball, &state.balls, &mut self.rng) {
            Some(shot) => {
                log::debug!("AI shoots: angle {:.3} power {:.2}", shot.angle, shot.power);
                self.apply(Action::Shoot(shot));
            }
            None => log::warn!("AI turn with no object ball on the table"),
        }
    }

    fn cancel_ai(&mut self) {
        if let AiTurn::Scheduled(handle) = self.ai_turn {
            self.scheduler.cancel(handle);
        }
        self.ai_turn = AiTurn::Idle;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(PoolConfig::default())
    }
}
