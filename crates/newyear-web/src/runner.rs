use newyear_engine::{
    Capabilities, Command, CommandQueue, Cue, MusicCommand, ProtocolLayout, SessionClock,
    SessionConfig, SessionEvent, StageController,
};

/// Browser side effects the runner dispatches each frame.
///
/// Every call is best effort: implementations swallow host errors and the
/// session keeps going.
pub trait SessionHost {
    /// What this host can actually do. Queried once at init.
    fn capabilities(&self) -> Capabilities;

    fn play_cue(&mut self, cue: Cue);

    fn music(&mut self, command: MusicCommand);

    /// True once after the host's `play()` was rejected.
    fn take_music_blocked(&mut self) -> bool {
        false
    }

    /// Release host resources once the session has ended.
    fn teardown(&mut self) {}
}

/// Session runner that wires the stage controller to a host.
///
/// `lib.rs` keeps one runner in a `thread_local!` and exports free functions
/// via `#[wasm_bindgen]`, because wasm-bindgen cannot export generic structs
/// directly.
pub struct SessionRunner<H: SessionHost> {
    host: H,
    controller: StageController,
    commands: CommandQueue,
    clock: SessionClock,
    layout: ProtocolLayout,
    /// Flat snapshot buffer read by TypeScript.
    snapshot: Vec<f32>,
}

impl<H: SessionHost> SessionRunner<H> {
    pub fn new(config: SessionConfig, host: H) -> Self {
        let clock = SessionClock::new(config.fixed_dt);
        let layout = ProtocolLayout::from_config(&config);
        let controller = StageController::with_capabilities(config, host.capabilities());
        let mut snapshot = Vec::with_capacity(layout.buffer_total_floats);
        layout.write_snapshot(&controller, 0, &mut snapshot);

        Self {
            host,
            controller,
            commands: CommandQueue::new(),
            clock,
            layout,
            snapshot,
        }
    }

    pub fn push_command(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Run one frame: apply commands, step the clock, dispatch side effects,
    /// and rebuild the snapshot.
    pub fn tick(&mut self, dt: f32) {
        // Clear per-frame transient data
        self.controller.clear_frame_data();

        if self.host.take_music_blocked() {
            self.commands.push(Command::MusicBlocked);
        }
        for command in self.commands.drain() {
            self.controller.apply(command);
        }

        let steps = self.clock.frame(dt);
        for _ in 0..steps {
            self.controller.advance(self.clock.step());
        }

        self.dispatch();
        self.layout
            .write_snapshot(&self.controller, self.clock.frames(), &mut self.snapshot);
    }

    fn dispatch(&mut self) {
        for event in self.controller.events() {
            if event.kind == SessionEvent::MUSIC {
                if let Some(cmd) = MusicCommand::from_code(event.a as u32) {
                    self.host.music(cmd);
                }
            }
        }
        for cue in self.controller.cues().iter() {
            self.host.play_cue(*cue);
        }
    }

    /// Stop music, drop pending timers and release the host. The last snapshot stays readable.
    pub fn teardown(&mut self) {
        if self.controller.is_torn_down() {
            return;
        }
        self.controller.clear_frame_data();
        self.controller.teardown();
        self.dispatch();
        self.host.teardown();
    }

    pub fn controller(&self) -> &StageController {
        &self.controller
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    // ---- Snapshot accessors ----

    pub fn snapshot_ptr(&self) -> *const f32 {
        self.snapshot.as_ptr()
    }

    pub fn snapshot_len(&self) -> u32 {
        self.snapshot.len() as u32
    }

    pub fn snapshot(&self) -> &[f32] {
        &self.snapshot
    }

    pub fn layout(&self) -> &ProtocolLayout {
        &self.layout
    }
}
