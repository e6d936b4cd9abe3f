use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::catalog::VocabularyEntry;
use crate::layout::SlotLayout;
use crate::timer::Stopwatch;
use crate::util::accuracy_percent;

/// Whether the current word still accepts checking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display)]
pub enum Phase {
    #[default]
    AwaitingInput,
    Correct,
}

/// A theme picker value: the blank placeholder, every theme, or one theme
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ThemeSelection {
    #[default]
    Blank,
    All,
    Named(String),
}

impl FromStr for ThemeSelection {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "" => ThemeSelection::Blank,
            "all" => ThemeSelection::All,
            theme => ThemeSelection::Named(theme.to_string()),
        })
    }
}

impl fmt::Display for ThemeSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeSelection::Blank => Ok(()),
            ThemeSelection::All => f.write_str("all"),
            ThemeSelection::Named(theme) => f.write_str(theme),
        }
    }
}

/// Everything that changes during one drill session
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub theme: ThemeSelection,
    pub active_set: Vec<VocabularyEntry>,
    pub cursor: usize,
    pub phase: Phase,
    pub has_attempted_current_word: bool,
    pub correct_first_try_count: u32,
    pub attempted_word_count: u32,
    pub typed_since_session_start: bool,
    pub stopwatch: Stopwatch,
    // Typing state for the current word
    pub input: String,
    pub layout: Option<SlotLayout>,
}

impl SessionState {
    pub fn current_entry(&self) -> Option<&VocabularyEntry> {
        self.layout.as_ref()?;
        self.active_set.get(self.cursor)
    }

    pub fn accuracy(&self) -> u32 {
        accuracy_percent(self.correct_first_try_count, self.attempted_word_count)
    }

    pub fn expected_length(&self) -> usize {
        self.layout
            .as_ref()
            .map(SlotLayout::expected_length)
            .unwrap_or(0)
    }

    pub fn accepts_input(&self) -> bool {
        self.current_entry().is_some() && self.phase == Phase::AwaitingInput
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.stopwatch.elapsed_seconds()
    }

    pub fn timer_active(&self) -> bool {
        self.stopwatch.is_running()
    }

    pub(crate) fn reset_counters(&mut self) {
        self.correct_first_try_count = 0;
        self.attempted_word_count = 0;
    }
}
