//! Stage controller: the single owner of session state.
//!
//! Everything that changes the stage goes through `request_transition`, which
//! keeps one pending-commit slot and only accepts edges of the stage graph.
//! Views issue named commands; timers advance only through `advance(dt)`.
//! After `teardown` the controller is inert.

use std::rc::Rc;

use crate::api::config::SessionConfig;
use crate::api::types::{SessionEvent, Stage};
use crate::core::timer::TimerSlot;
use crate::input::queue::Command;
use crate::model::profile::UserProfile;
use crate::model::reflection::{Question, ReflectionData, ReflectionDraft};
use crate::session::modals::{Modal, Modals};
use crate::session::quiz::{QuizStep, ReflectionQuiz};
use crate::systems::cues::{Capabilities, Cue, CueQueue, HapticKind, StingerKind};
use crate::systems::effects::{EffectFlags, EffectKind, EffectTriggers};
use crate::systems::gate::TransitionGate;
use crate::systems::gift::{GiftBox, GiftTap};
use crate::systems::loading::LoadingSequence;
use crate::systems::music::{AmbientMusic, MusicState};

pub struct StageController {
    config: SessionConfig,
    stage: Stage,
    lite_mode: bool,
    profile: UserProfile,
    reflections: Option<Rc<ReflectionData>>,
    quiz: ReflectionQuiz,
    pending: TimerSlot<Stage>,
    gate: TransitionGate,
    effects: EffectTriggers,
    cues: CueQueue,
    music: AmbientMusic,
    loading: LoadingSequence,
    gift: GiftBox,
    dwell: TimerSlot<()>,
    celebration_requested: bool,
    modals: Modals,
    events: Vec<SessionEvent>,
    commits: u32,
    torn_down: bool,
}

impl StageController {
    pub fn new(config: SessionConfig) -> Self {
        Self::with_capabilities(config, Capabilities::default())
    }

    pub fn with_capabilities(config: SessionConfig, caps: Capabilities) -> Self {
        let t = &config.timings;
        let mut gate = TransitionGate::new(t.gate_window);
        gate.set_bypass(config.lite_mode);
        Self {
            stage: Stage::Loading,
            lite_mode: config.lite_mode,
            profile: UserProfile::default(),
            reflections: None,
            quiz: ReflectionQuiz::new(),
            pending: TimerSlot::new(),
            gate,
            effects: EffectTriggers::new(t.clone(), config.seed),
            cues: CueQueue::new(config.muted, caps),
            music: AmbientMusic::new(config.muted),
            loading: LoadingSequence::new(t.loading_rate, t.loading_outro),
            gift: GiftBox::new(t.gift_open_delay),
            dwell: TimerSlot::new(),
            celebration_requested: false,
            modals: Modals::default(),
            events: Vec::with_capacity(config.max_events),
            commits: 0,
            torn_down: false,
            config,
        }
    }

    // -- Read-only state for views --

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Target of the transition waiting to commit, if any.
    pub fn pending_transition(&self) -> Option<Stage> {
        self.pending.pending().copied()
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn user_name(&self) -> &str {
        &self.profile.name
    }

    pub fn reflections(&self) -> Option<&Rc<ReflectionData>> {
        self.reflections.as_ref()
    }

    pub fn draft(&self) -> &ReflectionDraft {
        self.quiz.draft()
    }

    pub fn current_question(&self) -> Option<Question> {
        (self.stage == Stage::Reflection).then(|| self.quiz.question()).flatten()
    }

    pub fn gate_active(&self) -> bool {
        self.gate.is_active()
    }

    pub fn effect_flags(&self) -> EffectFlags {
        self.effects.flags()
    }

    pub fn effects(&self) -> &EffectTriggers {
        &self.effects
    }

    /// Heavy backgrounds and fireworks render only outside lite mode and while no curtain is up.
    pub fn effects_enabled(&self) -> bool {
        !self.lite_mode && !self.gate.is_active()
    }

    pub fn lite_mode(&self) -> bool {
        self.lite_mode
    }

    pub fn muted(&self) -> bool {
        self.cues.is_muted()
    }

    pub fn modals(&self) -> Modals {
        self.modals
    }

    pub fn gift_taps(&self) -> u32 {
        self.gift.taps()
    }

    /// Number shown by the gift countdown overlay, `Some(0)` on its final frame.
    pub fn gift_countdown(&self) -> Option<u32> {
        (self.stage == Stage::Gift).then(|| self.gift.countdown()).flatten()
    }

    pub fn loading_progress(&self) -> f32 {
        self.loading.progress()
    }

    pub fn music_state(&self) -> MusicState {
        self.music.state()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Number of stage commits so far.
    pub fn commit_count(&self) -> u32 {
        self.commits
    }

    pub fn cues(&self) -> &CueQueue {
        &self.cues
    }

    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    /// Clear per-frame transient data (cues, events).
    pub fn clear_frame_data(&mut self) {
        self.cues.clear();
        self.events.clear();
    }

    // -- Transition pipeline --

    /// Schedule a stage change. Supersedes any transition still waiting to commit.
    /// Targets that are not an edge out of the current stage are refused.
    pub(crate) fn request_transition(&mut self, target: Stage) -> bool {
        if !self.stage.can_advance_to(target) {
            log::debug!("refused transition {} -> {}", self.stage.tag(), target.tag());
            return false;
        }
        if self.gate.raise() {
            self.events.push(SessionEvent::gate(true));
            self.cues.push(Cue::Stinger(StingerKind::Transition));
        }
        if let Some(stale) = self.pending.cancel() {
            log::debug!("transition to {} superseded by {}", stale.tag(), target.tag());
        }
        self.pending.arm(self.config.settle_delay(self.lite_mode), target);
        self.events.push(SessionEvent::transition_requested(target));
        true
    }

    fn commit(&mut self, target: Stage) {
        let from = self.stage;
        self.exit_stage(from);
        self.stage = target;
        if self.gate.is_active() {
            self.gate.lower();
            self.events.push(SessionEvent::gate(false));
        }
        self.effects.on_stage_committed(target, &mut self.events);
        self.enter_stage(target);
        self.commits += 1;
        self.events.push(SessionEvent::stage_changed(target, from));
        log::info!("stage {} -> {}", from.tag(), target.tag());
    }

    fn exit_stage(&mut self, stage: Stage) {
        match stage {
            Stage::Reflection => self.quiz.cancel_pending(),
            Stage::Gift => {
                self.gift.mark_opened();
            }
            Stage::Reveal => {
                self.dwell.cancel();
            }
            _ => {}
        }
    }

    fn enter_stage(&mut self, stage: Stage) {
        let t = &self.config.timings;
        match stage {
            Stage::Loading => self.loading.reset(),
            Stage::Reflection => self.quiz = ReflectionQuiz::new(),
            Stage::Gift => self.gift = GiftBox::new(t.gift_open_delay),
            Stage::Reveal => {
                self.celebration_requested = false;
                self.dwell.arm(t.reveal_dwell, ());
            }
            Stage::Celebration => {
                self.cues.push(Cue::Stinger(StingerKind::Celebration));
            }
            Stage::Welcome | Stage::Name => {}
        }
    }

    /// Advance every session timer by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        if self.torn_down {
            return;
        }
        if let Some(target) = self.pending.advance(dt) {
            self.commit(target);
        }
        if self.gate.advance(dt) {
            self.events.push(SessionEvent::gate(false));
        }

        match self.stage {
            Stage::Loading => {
                if self.loading.advance(dt) {
                    self.request_transition(Stage::Welcome);
                }
            }
            Stage::Reflection => {
                if let Some(step) = self.quiz.advance(dt) {
                    self.settle_answer(step);
                }
            }
            Stage::Gift => {
                if self.gift.advance(dt) {
                    self.open_gift();
                }
            }
            Stage::Reveal => {
                if self.dwell.advance(dt).is_some() {
                    log::debug!("reveal dwell elapsed");
                    self.continue_to_celebration();
                }
            }
            _ => {}
        }

        self.effects.advance(dt, &mut self.events);
    }

    // -- Commands --

    fn expect_stage(&self, expected: Stage, command: &str) -> bool {
        if self.torn_down {
            log::debug!("{} ignored after teardown", command);
            false
        } else if self.stage == expected {
            true
        } else {
            log::debug!("{} ignored on {} stage", command, self.stage.tag());
            false
        }
    }

    /// Dispatch a view command. Returns whether it had any effect.
    pub fn apply(&mut self, command: Command) -> bool {
        if self.torn_down {
            log::debug!("{:?} ignored after teardown", command);
            return false;
        }
        match command {
            Command::BeginJourney => self.begin_journey(),
            Command::SubmitName(raw) => self.submit_name(&raw),
            Command::Answer { question, option } => self.submit_reflection_answer(question, &option),
            Command::TapGift => self.tap_gift(),
            Command::OpenGift => self.open_gift(),
            Command::ContinueToCelebration => self.continue_to_celebration(),
            Command::Replay => self.replay(),
            Command::GoHome => self.go_home(),
            Command::SetMuted(muted) => {
                self.set_muted(muted);
                true
            }
            Command::SetLiteMode(lite) => {
                self.set_lite_mode(lite);
                true
            }
            Command::OpenModal(modal) => {
                self.open_modal(modal);
                true
            }
            Command::CloseModal(modal) => {
                self.close_modal(modal);
                true
            }
            Command::MusicBlocked => {
                self.music.autoplay_blocked();
                true
            }
        }
    }

    /// Welcome "start" tap. Also the gesture that unlocks ambient music.
    pub fn begin_journey(&mut self) -> bool {
        if !self.expect_stage(Stage::Welcome, "begin_journey") {
            return false;
        }
        if let Some(cmd) = self.music.start() {
            self.events.push(cmd.event());
        }
        self.cues.push(Cue::Haptic(HapticKind::Light));
        self.request_transition(Stage::Name);
        true
    }

    pub fn submit_name(&mut self, raw: &str) -> bool {
        if !self.expect_stage(Stage::Name, "submit_name") {
            return false;
        }
        self.profile = UserProfile::from_input(raw);
        self.cues.push(Cue::Haptic(HapticKind::Success));
        self.cues.push(Cue::Stinger(StingerKind::Success));
        self.request_transition(Stage::Reflection);
        true
    }

    pub fn submit_reflection_answer(&mut self, question: Question, option: &str) -> bool {
        if !self.expect_stage(Stage::Reflection, "submit_reflection_answer") {
            return false;
        }
        let debounce = self.config.timings.answer_debounce;
        if !self.quiz.answer(question, option, debounce) {
            return false;
        }
        self.cues.push(Cue::Haptic(HapticKind::Medium));
        true
    }

    fn settle_answer(&mut self, step: QuizStep) {
        self.cues.push(Cue::Haptic(HapticKind::Success));
        match step {
            QuizStep::Next(question) => {
                log::debug!("quiz advanced to {}", question.id());
            }
            QuizStep::Complete(data) => {
                self.reflections = Some(Rc::new(data));
                self.request_transition(Stage::Gift);
            }
        }
    }

    /// One tap on the gift box. The third tap schedules the countdown that ends in `open_gift`.
    pub fn tap_gift(&mut self) -> bool {
        if !self.expect_stage(Stage::Gift, "tap_gift") {
            return false;
        }
        match self.gift.tap() {
            GiftTap::Charging { haptic, .. } => {
                self.cues.push(Cue::Haptic(haptic));
                true
            }
            GiftTap::Primed => {
                self.cues.push(Cue::Haptic(HapticKind::Heavy));
                self.cues.push(Cue::Haptic(HapticKind::Success));
                self.cues.push(Cue::Stinger(StingerKind::GiftOpen));
                true
            }
            GiftTap::Ignored => false,
        }
    }

    pub fn open_gift(&mut self) -> bool {
        if !self.expect_stage(Stage::Gift, "open_gift") {
            return false;
        }
        if !self.gift.mark_opened() {
            return false;
        }
        let pieces = self.config.confetti_pieces(self.lite_mode);
        for kind in [EffectKind::Burst, EffectKind::Confetti, EffectKind::Fireworks] {
            self.effects.fire(kind, Stage::Reveal, pieces, &mut self.events);
        }
        self.cues.push(Cue::Stinger(StingerKind::Reveal));
        self.request_transition(Stage::Reveal);
        true
    }

    /// Manual "continue" or the reveal dwell timer; whichever comes first wins.
    pub fn continue_to_celebration(&mut self) -> bool {
        if !self.expect_stage(Stage::Reveal, "continue_to_celebration") {
            return false;
        }
        if self.celebration_requested {
            return false;
        }
        self.celebration_requested = true;
        self.dwell.cancel();
        self.request_transition(Stage::Celebration);
        true
    }

    /// Start over with a clean slate.
    pub fn replay(&mut self) -> bool {
        if !self.expect_stage(Stage::Celebration, "replay") {
            return false;
        }
        self.profile = UserProfile::default();
        self.reflections = None;
        self.quiz = ReflectionQuiz::new();
        self.effects.clear_all(&mut self.events);
        self.request_transition(self.config.replay_target.stage());
        true
    }

    /// Back to the welcome stage, keeping the collected name and answers.
    pub fn go_home(&mut self) -> bool {
        if !self.expect_stage(Stage::Celebration, "go_home") {
            return false;
        }
        self.request_transition(Stage::Welcome);
        true
    }

    // -- Preferences and modals --

    pub fn set_muted(&mut self, muted: bool) {
        self.cues.set_muted(muted);
        if let Some(cmd) = self.music.set_muted(muted) {
            self.events.push(cmd.event());
        }
    }

    pub fn set_lite_mode(&mut self, lite: bool) {
        self.lite_mode = lite;
        let was_active = self.gate.is_active();
        self.gate.set_bypass(lite);
        if was_active && !self.gate.is_active() {
            self.events.push(SessionEvent::gate(false));
        }
    }

    pub fn open_modal(&mut self, modal: Modal) {
        self.modals.open(modal);
    }

    pub fn close_modal(&mut self, modal: Modal) {
        self.modals.close(modal);
    }

    /// Session end: stop the music, drop every pending timer and running effect.
    /// Later ticks and commands are ignored.
    pub fn teardown(&mut self) {
        if std::mem::replace(&mut self.torn_down, true) {
            return;
        }
        if let Some(stale) = self.pending.cancel() {
            log::debug!("teardown dropped transition to {}", stale.tag());
        }
        self.dwell.cancel();
        self.quiz.cancel_pending();
        self.gift.cancel();
        self.effects.clear_all(&mut self.events);
        if self.gate.is_active() {
            self.gate.lower();
            self.events.push(SessionEvent::gate(false));
        }
        if let Some(cmd) = self.music.teardown() {
            self.events.push(cmd.event());
        }
        log::info!("session torn down on {} stage", self.stage.tag());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::ReplayTarget;
    use crate::systems::music::MusicCommand;

    const STEP: f32 = 1.0 / 60.0;

    fn run(c: &mut StageController, seconds: f32) {
        let steps = (seconds / STEP).ceil() as u32;
        for _ in 0..steps {
            c.advance(STEP);
        }
    }

    /// A controller that already sits on the welcome stage.
    fn at_welcome(config: SessionConfig) -> StageController {
        let mut c = StageController::new(config);
        run(&mut c, 4.5);
        assert_eq!(c.stage(), Stage::Welcome);
        c
    }

    fn answer_all(c: &mut StageController, answers: [&str; 4]) {
        for (q, o) in Question::ALL.iter().zip(answers) {
            assert!(c.submit_reflection_answer(*q, o));
            run(c, 0.5);
        }
    }

    #[test]
    fn starts_loading_and_auto_advances_once() {
        let mut c = StageController::new(SessionConfig::default());
        assert_eq!(c.stage(), Stage::Loading);
        run(&mut c, 3.9);
        assert_eq!(c.stage(), Stage::Loading);
        run(&mut c, 0.6);
        assert_eq!(c.stage(), Stage::Welcome);
        run(&mut c, 5.0);
        assert_eq!(c.commit_count(), 1);
    }

    #[test]
    fn linear_progression_in_canonical_order() {
        let mut c = at_welcome(SessionConfig::default());
        let mut seen = Vec::new();

        c.begin_journey();
        run(&mut c, 0.3);
        seen.push(c.stage());

        c.submit_name("Ana");
        run(&mut c, 0.3);
        seen.push(c.stage());

        answer_all(&mut c, ["love", "courage", "peace", "family"]);
        run(&mut c, 0.3);
        seen.push(c.stage());

        c.open_gift();
        run(&mut c, 0.3);
        seen.push(c.stage());

        c.continue_to_celebration();
        run(&mut c, 0.3);
        seen.push(c.stage());

        assert_eq!(
            seen,
            vec![Stage::Name, Stage::Reflection, Stage::Gift, Stage::Reveal, Stage::Celebration]
        );
    }

    #[test]
    fn newer_request_supersedes_pending_one() {
        let config = SessionConfig { replay_target: ReplayTarget::Loading, ..SessionConfig::default() };
        let mut c = at_reveal_with(config);
        c.continue_to_celebration();
        run(&mut c, 0.3);
        assert_eq!(c.stage(), Stage::Celebration);
        let commits = c.commit_count();

        assert!(c.go_home());
        run(&mut c, 0.1);
        assert!(c.replay());
        assert_eq!(c.pending_transition(), Some(Stage::Loading));

        let mut visited = Vec::new();
        for _ in 0..60 {
            c.advance(STEP);
            visited.push(c.stage());
        }
        assert!(!visited.contains(&Stage::Welcome), "superseded target must never render");
        assert_eq!(c.stage(), Stage::Loading);
        assert_eq!(c.commit_count(), commits + 1);
        assert!(!c.gate_active(), "gate must not stay stuck after the commit");
    }

    #[test]
    fn transitions_off_the_stage_graph_are_refused() {
        let mut c = StageController::new(SessionConfig::default());
        c.clear_frame_data();
        assert!(!c.request_transition(Stage::Gift));
        assert!(!c.request_transition(Stage::Celebration));
        assert_eq!(c.pending_transition(), None);
        assert!(!c.gate_active());
        assert!(c.events().is_empty());

        let mut c = at_welcome(SessionConfig::default());
        assert!(!c.request_transition(Stage::Reveal));
        assert!(!c.request_transition(Stage::Welcome));
        assert!(c.request_transition(Stage::Name));
        run(&mut c, 1.0);
        assert_eq!(c.stage(), Stage::Name);
    }

    #[test]
    fn gate_is_up_while_transition_settles() {
        let mut c = at_welcome(SessionConfig::default());
        c.clear_frame_data();
        c.begin_journey();
        assert!(c.gate_active());
        assert!(!c.effects_enabled());
        assert!(c.cues().iter().any(|cue| *cue == Cue::Stinger(StingerKind::Transition)));
        run(&mut c, 0.25);
        assert!(!c.gate_active());
        assert!(c.effects_enabled());
    }

    #[test]
    fn lite_mode_commits_fast_without_gate() {
        let config = SessionConfig { lite_mode: true, ..SessionConfig::default() };
        let mut c = at_welcome(config);
        c.clear_frame_data();
        c.begin_journey();
        assert!(!c.gate_active());
        assert!(!c.cues().iter().any(|cue| *cue == Cue::Stinger(StingerKind::Transition)));
        run(&mut c, 0.07);
        assert_eq!(c.stage(), Stage::Name);
    }

    #[test]
    fn name_fallback_and_trim() {
        for (raw, expected) in [("", "Friend"), ("   ", "Friend"), ("  Ana  ", "Ana")] {
            let mut c = at_welcome(SessionConfig::default());
            c.begin_journey();
            run(&mut c, 0.3);
            assert!(c.submit_name(raw));
            assert_eq!(c.user_name(), expected);
            assert_eq!(c.pending_transition(), Some(Stage::Reflection));
        }
    }

    #[test]
    fn commands_on_wrong_stage_are_ignored() {
        let mut c = at_welcome(SessionConfig::default());
        assert!(!c.submit_name("Eve"));
        assert!(!c.open_gift());
        assert!(!c.replay());
        assert!(!c.submit_reflection_answer(Question::Goal2026, "love"));
        assert_eq!(c.user_name(), "Friend");
        assert_eq!(c.pending_transition(), None);
    }

    #[test]
    fn four_answers_yield_complete_record_and_one_gift_request() {
        let mut c = at_welcome(SessionConfig::default());
        c.begin_journey();
        run(&mut c, 0.3);
        c.submit_name("Ana");
        run(&mut c, 0.3);
        assert_eq!(c.current_question(), Some(Question::Highlight2025));

        for (q, o) in Question::ALL.iter().zip(["travel", "balance", "health", "wisdom"]) {
            c.submit_reflection_answer(*q, o);
            // fire the debounce but not the transition that follows the last one
            for _ in 0..25 {
                c.advance(STEP);
            }
        }

        assert_eq!(c.pending_transition(), Some(Stage::Gift));
        let data = c.reflections().expect("record finalized");
        assert_eq!(**data, ReflectionData::new("travel", "balance", "health", "wisdom"));
        let gift_requests = c
            .events()
            .iter()
            .filter(|e| **e == SessionEvent::transition_requested(Stage::Gift))
            .count();
        assert_eq!(gift_requests, 1);
    }

    #[test]
    fn rapid_answer_cancels_earlier_advance() {
        let mut c = at_welcome(SessionConfig::default());
        c.begin_journey();
        run(&mut c, 0.3);
        c.submit_name("Ana");
        run(&mut c, 0.3);

        c.submit_reflection_answer(Question::Highlight2025, "travel");
        run(&mut c, 0.3);
        c.submit_reflection_answer(Question::Highlight2025, "friends");
        run(&mut c, 0.2);
        assert_eq!(c.current_question(), Some(Question::Highlight2025));
        run(&mut c, 0.3);
        assert_eq!(c.current_question(), Some(Question::Lesson2025));
        assert_eq!(c.draft().answer(Question::Highlight2025), Some("friends"));
    }

    #[test]
    fn reflection_draft_changes_identity_per_answer() {
        let mut c = at_welcome(SessionConfig::default());
        c.begin_journey();
        run(&mut c, 0.3);
        c.submit_name("");
        run(&mut c, 0.3);
        let before = c.draft().clone();
        c.submit_reflection_answer(Question::Highlight2025, "growth");
        assert_ne!(&before, c.draft());
        assert_eq!(before.answered_count(), 0);
    }

    fn at_reveal() -> StageController {
        at_reveal_with(SessionConfig::default())
    }

    fn at_reveal_with(config: SessionConfig) -> StageController {
        let mut c = at_welcome(config);
        c.begin_journey();
        run(&mut c, 0.3);
        c.submit_name("Ana");
        run(&mut c, 0.3);
        answer_all(&mut c, ["health", "resilience", "success", "adventure"]);
        run(&mut c, 0.3);
        c.open_gift();
        run(&mut c, 0.3);
        assert_eq!(c.stage(), Stage::Reveal);
        c
    }

    #[test]
    fn manual_continue_then_dwell_commits_once() {
        let mut c = at_reveal();
        let commits = c.commit_count();
        run(&mut c, 10.5);
        assert_eq!(c.pending_transition(), None, "dwell must not have fired yet");
        assert!(c.continue_to_celebration());
        run(&mut c, 0.5);
        assert!(!c.continue_to_celebration());
        run(&mut c, 15.0);
        assert_eq!(c.stage(), Stage::Celebration);
        assert_eq!(c.commit_count(), commits + 1);
    }

    #[test]
    fn dwell_then_manual_continue_commits_once() {
        let mut c = at_reveal();
        let commits = c.commit_count();
        c.clear_frame_data();
        let mut waited = 0.0;
        while c.pending_transition().is_none() && waited < 12.0 {
            c.advance(STEP);
            waited += STEP;
        }
        assert!(waited > 10.5, "dwell fired early at {waited}");
        assert_eq!(c.pending_transition(), Some(Stage::Celebration));
        // tap lands while the dwell-triggered transition is still settling
        assert!(!c.continue_to_celebration());
        run(&mut c, 1.0);
        assert_eq!(c.stage(), Stage::Celebration);
        assert_eq!(c.commit_count(), commits + 1);
        let requests = c
            .events()
            .iter()
            .filter(|e| **e == SessionEvent::transition_requested(Stage::Celebration))
            .count();
        assert_eq!(requests, 1);
    }

    #[test]
    fn open_gift_fires_effects_that_self_clear() {
        let mut c = at_welcome(SessionConfig::default());
        c.begin_journey();
        run(&mut c, 0.3);
        c.submit_name("Ana");
        run(&mut c, 0.3);
        answer_all(&mut c, ["career", "patience", "wealth", "happiness"]);
        run(&mut c, 0.3);
        assert_eq!(c.stage(), Stage::Gift);

        assert!(c.open_gift());
        assert!(c.effect_flags().confetti_active);
        assert!(c.effect_flags().fireworks_active);
        assert!(c.effect_flags().burst_active);
        assert_eq!(c.effects().confetti.len(), 120);
        assert!(!c.open_gift(), "second open is ignored");

        run(&mut c, 5.1);
        assert_eq!(c.stage(), Stage::Reveal);
        assert!(!c.effect_flags().confetti_active);
        assert!(!c.effect_flags().burst_active);
    }

    #[test]
    fn triple_tap_opens_gift() {
        let mut c = at_welcome(SessionConfig::default());
        c.begin_journey();
        run(&mut c, 0.3);
        c.submit_name("Ana");
        run(&mut c, 0.3);
        answer_all(&mut c, ["career", "patience", "wealth", "happiness"]);
        run(&mut c, 0.3);

        assert!(c.tap_gift());
        assert!(c.tap_gift());
        assert!(!c.effect_flags().confetti_active);
        assert!(c.tap_gift());
        assert!(!c.tap_gift());
        run(&mut c, 0.65);
        assert!(!c.effect_flags().confetti_active, "burst delay only starts the countdown");
        assert_eq!(c.gift_countdown(), None);
        run(&mut c, 0.5);
        assert_eq!(c.gift_countdown(), Some(3));
        run(&mut c, 1.0);
        assert_eq!(c.gift_countdown(), Some(2));
        run(&mut c, 2.0);
        assert_eq!(c.gift_countdown(), Some(0));
        assert_eq!(c.stage(), Stage::Gift);
        run(&mut c, 0.6);
        assert!(c.effect_flags().confetti_active);
        assert_eq!(c.gift_countdown(), None);
        run(&mut c, 0.3);
        assert_eq!(c.stage(), Stage::Reveal);
    }

    #[test]
    fn manual_open_during_countdown_opens_once() {
        let mut c = at_welcome(SessionConfig::default());
        c.begin_journey();
        run(&mut c, 0.3);
        c.submit_name("Ana");
        run(&mut c, 0.3);
        answer_all(&mut c, ["career", "patience", "wealth", "happiness"]);
        run(&mut c, 0.3);

        for _ in 0..3 {
            c.tap_gift();
        }
        run(&mut c, 1.5);
        assert!(c.gift_countdown().is_some());
        assert!(c.open_gift());
        run(&mut c, 6.0);
        assert_eq!(c.stage(), Stage::Reveal);
        let reveals = c
            .events()
            .iter()
            .filter(|e| **e == SessionEvent::transition_requested(Stage::Reveal))
            .count();
        assert_eq!(reveals, 1);
    }

    #[test]
    fn lite_mode_spawns_less_confetti() {
        let mut c = at_welcome(SessionConfig::default());
        c.begin_journey();
        run(&mut c, 0.3);
        c.submit_name("Ana");
        run(&mut c, 0.3);
        answer_all(&mut c, ["career", "patience", "wealth", "happiness"]);
        run(&mut c, 0.3);
        c.set_lite_mode(true);
        c.open_gift();
        assert_eq!(c.effects().confetti.len(), 40);
        assert!(!c.effects_enabled());
    }

    #[test]
    fn replay_resets_collected_data() {
        let mut c = at_reveal();
        c.continue_to_celebration();
        run(&mut c, 0.3);
        assert_eq!(c.stage(), Stage::Celebration);

        assert!(c.replay());
        assert_eq!(c.user_name(), "Friend");
        assert!(c.reflections().is_none());
        run(&mut c, 0.3);
        assert_eq!(c.stage(), Stage::Welcome);
        assert_eq!(c.effect_flags(), EffectFlags::default());
    }

    #[test]
    fn replay_through_loading_variant() {
        let config = SessionConfig { replay_target: ReplayTarget::Loading, ..SessionConfig::default() };
        let mut c = at_welcome(config);
        c.begin_journey();
        run(&mut c, 0.3);
        c.submit_name("Ana");
        run(&mut c, 0.3);
        answer_all(&mut c, ["career", "patience", "wealth", "happiness"]);
        run(&mut c, 0.3);
        c.open_gift();
        run(&mut c, 0.3);
        c.continue_to_celebration();
        run(&mut c, 0.3);
        c.replay();
        run(&mut c, 0.3);
        assert_eq!(c.stage(), Stage::Loading);
        assert!(c.loading_progress() < 100.0);
        run(&mut c, 4.5);
        assert_eq!(c.stage(), Stage::Welcome);
    }

    #[test]
    fn go_home_keeps_collected_data() {
        let mut c = at_reveal();
        c.continue_to_celebration();
        run(&mut c, 0.3);
        assert!(c.go_home());
        run(&mut c, 0.3);
        assert_eq!(c.stage(), Stage::Welcome);
        assert_eq!(c.user_name(), "Ana");
        assert!(c.reflections().is_some());
    }

    #[test]
    fn modals_do_not_touch_stage() {
        let mut c = at_welcome(SessionConfig::default());
        c.apply(Command::OpenModal(Modal::Gallery));
        c.apply(Command::OpenModal(Modal::Developer));
        run(&mut c, 1.0);
        assert_eq!(c.stage(), Stage::Welcome);
        assert_eq!(c.pending_transition(), None);
        assert!(c.modals().is_open(Modal::Gallery));
        c.apply(Command::CloseModal(Modal::Gallery));
        assert!(!c.modals().is_open(Modal::Gallery));
        assert!(c.modals().is_open(Modal::Developer));
    }

    #[test]
    fn muted_session_queues_no_audio() {
        let config = SessionConfig { muted: true, ..SessionConfig::default() };
        let mut c = at_welcome(config);
        c.clear_frame_data();
        c.begin_journey();
        assert!(c.cues().iter().all(|cue| !cue.is_audio()));
        assert_eq!(c.music_state(), MusicState::Paused);
    }

    #[test]
    fn missing_vibration_drops_haptics() {
        let caps = Capabilities { audio: true, vibration: false };
        let mut c = StageController::with_capabilities(SessionConfig::default(), caps);
        run(&mut c, 4.5);
        c.clear_frame_data();
        c.begin_journey();
        assert!(c.cues().iter().all(|cue| cue.is_audio()));
    }

    #[test]
    fn music_start_is_idempotent_across_replays() {
        let mut c = at_reveal();
        assert_eq!(c.music_state(), MusicState::Playing);
        c.continue_to_celebration();
        run(&mut c, 0.3);
        c.go_home();
        run(&mut c, 0.3);
        c.clear_frame_data();
        c.begin_journey();
        let plays = c
            .events()
            .iter()
            .filter(|e| **e == MusicCommand::Play.event())
            .count();
        assert_eq!(plays, 0);
    }

    #[test]
    fn blocked_music_retries_on_next_start() {
        let mut c = at_welcome(SessionConfig::default());
        c.begin_journey();
        c.apply(Command::MusicBlocked);
        assert_eq!(c.music_state(), MusicState::Blocked);
        run(&mut c, 0.3);
        c.submit_name("Ana");
        // Only the welcome "start" tap retries
        assert_eq!(c.music_state(), MusicState::Blocked);
    }

    #[test]
    fn teardown_cancels_pending_work() {
        let mut c = at_welcome(SessionConfig::default());
        c.begin_journey();
        c.teardown();
        run(&mut c, 1.0);
        assert_eq!(c.stage(), Stage::Welcome);
        assert!(!c.gate_active());
        assert_eq!(c.music_state(), MusicState::Stopped);
        assert!(c.is_torn_down());
    }

    #[test]
    fn teardown_during_loading_stops_auto_advance() {
        let mut c = StageController::new(SessionConfig::default());
        run(&mut c, 1.0);
        c.teardown();
        run(&mut c, 5.0);
        assert_eq!(c.stage(), Stage::Loading);
        assert_eq!(c.commit_count(), 0);
        assert_eq!(c.pending_transition(), None);
    }

    #[test]
    fn teardown_with_primed_gift_never_opens() {
        let mut c = at_welcome(SessionConfig::default());
        c.begin_journey();
        run(&mut c, 0.3);
        c.submit_name("Ana");
        run(&mut c, 0.3);
        answer_all(&mut c, ["career", "patience", "wealth", "happiness"]);
        run(&mut c, 0.3);
        for _ in 0..3 {
            c.tap_gift();
        }
        c.teardown();
        c.clear_frame_data();
        run(&mut c, 6.0);
        assert_eq!(c.stage(), Stage::Gift);
        assert_eq!(c.effect_flags(), EffectFlags::default());
        assert!(c.cues().is_empty());
        assert!(c.events().is_empty());
    }

    #[test]
    fn teardown_clears_running_effects_and_ignores_commands() {
        let mut c = at_reveal();
        assert!(c.effect_flags().fireworks_active);
        c.teardown();
        assert_eq!(c.effect_flags(), EffectFlags::default());
        assert!(c.effects().confetti.is_empty());
        assert!(!c.continue_to_celebration());
        assert!(!c.apply(Command::SetMuted(true)));
        run(&mut c, 15.0);
        assert_eq!(c.stage(), Stage::Reveal);
        c.clear_frame_data();
        c.teardown();
        assert!(c.events().is_empty(), "second teardown is a no-op");
    }

    #[test]
    fn maya_scenario() {
        let mut c = at_welcome(SessionConfig::default());
        assert!(c.apply(Command::BeginJourney));
        run(&mut c, 0.3);
        assert!(c.apply(Command::SubmitName("Maya".into())));
        run(&mut c, 0.3);
        for (question, option) in Question::ALL.iter().zip(["career", "patience", "wealth", "happiness"]) {
            assert!(c.apply(Command::Answer { question: *question, option: option.to_string() }));
            run(&mut c, 0.5);
        }
        run(&mut c, 0.3);
        assert!(c.apply(Command::OpenGift));
        run(&mut c, 0.3);
        assert_eq!(c.stage(), Stage::Reveal);
        run(&mut c, 12.0);

        assert_eq!(c.stage(), Stage::Celebration);
        assert_eq!(c.user_name(), "Maya");
        assert_eq!(
            c.reflections().map(|r| (**r).clone()),
            Some(ReflectionData::new("career", "patience", "wealth", "happiness"))
        );
    }
}
