use std::time::Duration;

use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::layout::SlotLayout;
use crate::presenter::{MessageKind, Presenter};
use crate::session::{Phase, SessionState, ThemeSelection};
use crate::speech::Speaker;
use crate::util::shuffle;

pub const CHECK_LABEL: &str = "Check";
pub const NEXT_LABEL: &str = "Next Word";
pub const CORRECT_MESSAGE: &str = "✅ Correct!";
pub const WRONG_MESSAGE: &str = "❌ Wrong, try again";
pub const REVEALED_MESSAGE: &str = "Answer revealed. Moving to next word.";

pub fn length_mismatch_message(expected: usize) -> String {
    format!("Please type all {expected} characters")
}

/// Result of checking an answer for the current word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// No word is awaiting input; nothing changed.
    Rejected,
    LengthMismatch { expected: usize },
    Incorrect,
    Correct { first_try: bool },
}

/// Result of the context-sensitive action (check while typing, advance once solved)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Checked(CheckOutcome),
    Advanced,
    Rejected,
}

/// Owns one drill session and drives the presentation and speech collaborators.
pub struct SessionController<P: Presenter, S: Speaker> {
    catalog: Catalog,
    state: SessionState,
    presenter: P,
    speaker: S,
    rng: StdRng,
}

impl<P: Presenter, S: Speaker> SessionController<P, S> {
    pub fn new(catalog: Catalog, presenter: P, speaker: S) -> Self {
        Self::with_rng(catalog, presenter, speaker, StdRng::from_entropy())
    }

    pub fn with_rng(catalog: Catalog, mut presenter: P, speaker: S, rng: StdRng) -> Self {
        presenter.clear_word_display();
        Self {
            catalog,
            state: SessionState::default(),
            presenter,
            speaker,
            rng,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn speaker(&self) -> &S {
        &self.speaker
    }

    /// Start a new session for the selection, or clear everything for the blank option.
    pub fn select_theme(&mut self, selection: ThemeSelection) {
        self.speaker.cancel();
        self.state.stopwatch.reset();
        self.state.typed_since_session_start = false;
        self.presenter
            .set_timer_display(&self.state.stopwatch.display());
        self.state.reset_counters();
        self.emit_stats();

        self.state.cursor = 0;
        self.state.phase = Phase::AwaitingInput;
        self.state.has_attempted_current_word = false;
        self.state.input.clear();
        self.state.layout = None;

        let mut active_set = self.catalog.filter(&selection);
        shuffle(&mut active_set, &mut self.rng);
        self.state.active_set = active_set;

        info!(
            theme = %selection,
            words = self.state.active_set.len(),
            "session started"
        );
        self.state.theme = selection;
        self.presenter.set_word_count(self.state.active_set.len());

        if self.state.active_set.is_empty() {
            self.presenter.clear_word_display();
        } else {
            self.load_current_word();
        }
    }

    /// Make `active_set[cursor]` the current word and reset per-word state.
    pub fn load_current_word(&mut self) {
        let Some(entry) = self.state.active_set.get(self.state.cursor).cloned() else {
            return;
        };

        let layout = SlotLayout::for_word(&entry.word);
        self.presenter.render_word_slots(&layout);
        self.presenter.show_tip(&entry.tip);
        self.presenter.clear_translation();
        self.presenter.clear_message();

        self.state.layout = Some(layout);
        self.state.phase = Phase::AwaitingInput;
        self.state.has_attempted_current_word = false;
        self.state.input.clear();

        self.presenter.set_action_label(CHECK_LABEL);
        self.presenter.set_controls_enabled(true);
        self.presenter.set_input_enabled(true);

        if self.state.cursor == 0 {
            self.state.typed_since_session_start = false;
        }

        debug!(cursor = self.state.cursor, word = %entry.word, "word loaded");
        self.speaker.speak(&entry.word);
    }

    /// The input changed to `raw`. Starts the session timer on the first
    /// keystroke of a pass through the list.
    pub fn record_keystroke(&mut self, raw: &str) {
        let Some(layout) = self.state.layout.as_ref() else {
            return;
        };
        if self.state.phase != Phase::AwaitingInput {
            return;
        }

        self.state.input = layout.truncate(raw);
        self.presenter.render_typed_value(&self.state.input);

        if !self.state.typed_since_session_start
            && !self.state.active_set.is_empty()
            && self.state.cursor == 0
        {
            self.state.typed_since_session_start = true;
            if self.state.stopwatch.start() {
                debug!("timer started");
            }
        }
    }

    pub fn check_answer(&mut self, raw: &str) -> CheckOutcome {
        if !self.state.accepts_input() {
            return CheckOutcome::Rejected;
        }
        let Some(entry) = self.state.current_entry().cloned() else {
            return CheckOutcome::Rejected;
        };

        let first_try = !self.state.has_attempted_current_word;
        if first_try {
            self.state.attempted_word_count += 1;
            self.state.has_attempted_current_word = true;
        }

        let expected = self.state.expected_length();
        let answer = raw.trim().to_lowercase();
        let target = entry.word.to_lowercase();

        let outcome = if answer.chars().count() != expected {
            self.presenter
                .show_message(&length_mismatch_message(expected), MessageKind::Error);
            CheckOutcome::LengthMismatch { expected }
        } else if answer == target {
            if first_try {
                self.state.correct_first_try_count += 1;
            }
            self.state.phase = Phase::Correct;
            self.presenter.show_translation(&entry.translation);
            self.presenter
                .show_message(CORRECT_MESSAGE, MessageKind::Success);
            self.presenter.set_input_enabled(false);
            self.presenter.set_action_label(NEXT_LABEL);
            CheckOutcome::Correct { first_try }
        } else {
            self.presenter.show_message(WRONG_MESSAGE, MessageKind::Error);
            self.state.input.clear();
            self.presenter.render_typed_value("");
            CheckOutcome::Incorrect
        };

        debug!(word = %entry.word, ?outcome, "answer checked");
        self.emit_stats();
        outcome
    }

    /// Check whatever is currently typed.
    pub fn submit(&mut self) -> CheckOutcome {
        let input = self.state.input.clone();
        self.check_answer(&input)
    }

    /// Show the answer and mark the word solved without touching the counters.
    /// Returns false when there is nothing to reveal.
    pub fn reveal_answer(&mut self) -> bool {
        if !self.state.accepts_input() {
            return false;
        }
        let Some(entry) = self.state.current_entry().cloned() else {
            return false;
        };

        self.state.input = entry.word.clone();
        self.presenter.render_typed_value(&entry.word);
        self.presenter.show_translation(&entry.translation);
        self.presenter
            .show_message(REVEALED_MESSAGE, MessageKind::Success);
        self.state.phase = Phase::Correct;
        self.presenter.set_input_enabled(false);
        self.presenter.set_action_label(NEXT_LABEL);

        debug!(word = %entry.word, "answer revealed");
        true
    }

    /// Move to the next word, wrapping to the start. Only valid once solved.
    pub fn advance(&mut self) -> bool {
        if self.state.phase != Phase::Correct || self.state.current_entry().is_none() {
            return false;
        }

        self.state.cursor = (self.state.cursor + 1) % self.state.active_set.len();
        self.load_current_word();
        true
    }

    pub fn activate_action(&mut self) -> ActionOutcome {
        if self.state.current_entry().is_none() {
            return ActionOutcome::Rejected;
        }

        let phase = self.state.phase;
        match phase {
            Phase::AwaitingInput => ActionOutcome::Checked(self.submit()),
            Phase::Correct if self.advance() => ActionOutcome::Advanced,
            Phase::Correct => ActionOutcome::Rejected,
        }
    }

    /// Pronounce the current word again.
    pub fn speak_current(&mut self) {
        if let Some(entry) = self.state.current_entry() {
            self.speaker.speak(&entry.word);
        }
    }

    pub fn on_tick(&mut self, elapsed: Duration) {
        if self.state.stopwatch.on_tick(elapsed) {
            self.presenter
                .set_timer_display(&self.state.stopwatch.display());
        }
    }

    fn emit_stats(&mut self) {
        self.presenter.set_stats(
            self.state.correct_first_try_count,
            self.state.attempted_word_count,
            self.state.accuracy(),
        );
    }
}
