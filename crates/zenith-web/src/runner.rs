use zenith_pool::bridge::protocol::*;
use zenith_pool::{
    BallBuffer, GameEvent, InputEvent, InputQueue, PoolConfig, ProtocolLayout, Session, SoundCue,
};

/// Wires a [`Session`] to the shared float buffer read by TypeScript.
///
/// `lib.rs` keeps one runner in a `thread_local!` and exports free functions
/// via `#[wasm_bindgen]`, because wasm-bindgen cannot export the session directly.
pub struct WebRunner {
    session: Session,
    input: InputQueue,
    layout: ProtocolLayout,
    balls: BallBuffer,
    /// Flat frame buffer, `layout.buffer_total_floats` long.
    buffer: Vec<f32>,
    frame: u64,
}

impl WebRunner {
    pub fn new(config: PoolConfig, seed: u64) -> Self {
        let layout = ProtocolLayout::from_config(&config.bridge);
        let buffer = vec![0.0; layout.buffer_total_floats];
        let mut runner = Self {
            session: Session::new(config).with_seed(seed),
            input: InputQueue::new(),
            layout,
            balls: BallBuffer::new(),
            buffer,
            frame: 0,
        };
        runner.pack();
        runner
    }

    /// Queue an input event for the next frame.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: apply queued input, advance the simulation, repack the buffer.
    pub fn tick(&mut self, dt: f32) {
        for event in self.input.drain() {
            self.session.handle_input(&event);
        }
        self.session.advance(dt);
        self.frame += 1;
        self.pack();
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn pack(&mut self) {
        let audio = self.session.config().audio;
        let events = self.session.drain_events();

        let sounds: Vec<SoundCue> = events
            .iter()
            .filter_map(|e| e.sound(&audio))
            .take(self.layout.max_sounds)
            .collect();
        let wire: Vec<GameEvent> = events
            .iter()
            .filter_map(|e| e.to_game_event())
            .take(self.layout.max_events)
            .collect();

        match self.session.state() {
            Some(state) => self.balls.fill(state),
            None => self.balls.clear(),
        }

        let buf = &mut self.buffer;
        buf.fill(0.0);

        // Released: the frame is complete once pack returns.
        buf[HEADER_LOCK] = 0.0;

        buf[HEADER_FRAME_COUNTER] = self.frame as f32;
        buf[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        buf[HEADER_STATUS] = self.session.status().code() as f32;
        buf[HEADER_WINNER] = -1.0;
        if let Some(state) = self.session.state() {
            buf[HEADER_MODE] = state.mode.code() as f32;
            buf[HEADER_CURRENT_PLAYER] = state.current_player.index() as f32;
            buf[HEADER_SCORE_ONE] = state.scores[0] as f32;
            buf[HEADER_SCORE_TWO] = state.scores[1] as f32;
            if let Some(winner) = state.winner {
                buf[HEADER_WINNER] = winner.index() as f32;
            }
            buf[HEADER_IS_MOVING] = if state.is_moving { 1.0 } else { 0.0 };
        }
        if let Some(aim) = self.session.aim_preview() {
            buf[HEADER_AIM_ACTIVE] = 1.0;
            buf[HEADER_AIM_ANGLE] = aim.angle;
            buf[HEADER_AIM_POWER] = aim.power;
        }

        let ball_floats = self.balls.as_floats();
        let ball_floats = &ball_floats[..ball_floats.len().min(self.layout.ball_data_floats)];
        let start = self.layout.ball_data_offset;
        buf[start..start + ball_floats.len()].copy_from_slice(ball_floats);
        buf[HEADER_BALL_COUNT] = (ball_floats.len() / zenith_pool::BallInstance::FLOATS) as f32;

        let sound_floats: &[f32] = bytemuck_floats(&sounds);
        let start = self.layout.sound_data_offset;
        buf[start..start + sound_floats.len()].copy_from_slice(sound_floats);
        buf[HEADER_SOUND_COUNT] = sounds.len() as f32;

        let event_floats: &[f32] = bytemuck_floats(&wire);
        let start = self.layout.event_data_offset;
        buf[start..start + event_floats.len()].copy_from_slice(event_floats);
        buf[HEADER_EVENT_COUNT] = wire.len() as f32;
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    pub fn buffer(&self) -> &[f32] {
        &self.buffer
    }

    // ---- Capacity accessors (read by TypeScript via wasm_bindgen exports) ----

    pub fn max_sounds(&self) -> u32 {
        self.layout.max_sounds as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    pub fn table_width(&self) -> f32 {
        self.session.table().width
    }

    pub fn table_height(&self) -> f32 {
        self.session.table().height
    }
}

fn bytemuck_floats<T: bytemuck::Pod>(items: &[T]) -> &[f32] {
    bytemuck::cast_slice(items)
}
