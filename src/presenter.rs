use crate::layout::SlotLayout;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum MessageKind {
    Success,
    Error,
}

/// Presentation boundary driven by the session controller.
/// Implementations only reflect state; they never call back into the session.
pub trait Presenter {
    fn render_word_slots(&mut self, layout: &SlotLayout);
    fn render_typed_value(&mut self, typed: &str);
    fn show_message(&mut self, text: &str, kind: MessageKind);
    fn clear_message(&mut self);
    fn show_translation(&mut self, text: &str);
    fn clear_translation(&mut self);
    fn show_tip(&mut self, text: &str);
    fn set_word_count(&mut self, count: usize);
    fn set_timer_display(&mut self, clock: &str);
    fn set_stats(&mut self, correct: u32, total: u32, accuracy: u32);
    fn set_action_label(&mut self, label: &str);
    fn set_controls_enabled(&mut self, enabled: bool);
    fn set_input_enabled(&mut self, enabled: bool);
    /// Remove the word, tip, translation and message, and disable all controls.
    fn clear_word_display(&mut self);
}

/// Plain-data presenter: holds whatever the controller last asked to show.
#[derive(Debug, Clone, PartialEq)]
pub struct DrillView {
    pub layout: Option<SlotLayout>,
    pub slots: Vec<Vec<Option<char>>>,
    pub typed: String,
    pub message: Option<(String, MessageKind)>,
    pub translation: String,
    pub tip: String,
    pub word_count: usize,
    pub timer: String,
    pub correct: u32,
    pub total: u32,
    pub accuracy: u32,
    pub action_label: String,
    pub controls_enabled: bool,
    pub input_enabled: bool,
}

impl Default for DrillView {
    fn default() -> Self {
        Self {
            layout: None,
            slots: Vec::new(),
            typed: String::new(),
            message: None,
            translation: String::new(),
            tip: String::new(),
            word_count: 0,
            timer: "00:00".to_string(),
            correct: 0,
            total: 0,
            accuracy: 0,
            action_label: String::new(),
            controls_enabled: false,
            input_enabled: false,
        }
    }
}

impl Presenter for DrillView {
    fn render_word_slots(&mut self, layout: &SlotLayout) {
        self.slots = layout.fill("");
        self.layout = Some(layout.clone());
        self.typed.clear();
    }

    fn render_typed_value(&mut self, typed: &str) {
        if let Some(layout) = &self.layout {
            self.typed = layout.truncate(typed);
            self.slots = layout.fill(&self.typed);
        }
    }

    fn show_message(&mut self, text: &str, kind: MessageKind) {
        self.message = Some((text.to_string(), kind));
    }

    fn clear_message(&mut self) {
        self.message = None;
    }

    fn show_translation(&mut self, text: &str) {
        self.translation = text.to_string();
    }

    fn clear_translation(&mut self) {
        self.translation.clear();
    }

    fn show_tip(&mut self, text: &str) {
        self.tip = text.to_string();
    }

    fn set_word_count(&mut self, count: usize) {
        self.word_count = count;
    }

    fn set_timer_display(&mut self, clock: &str) {
        self.timer = clock.to_string();
    }

    fn set_stats(&mut self, correct: u32, total: u32, accuracy: u32) {
        self.correct = correct;
        self.total = total;
        self.accuracy = accuracy;
    }

    fn set_action_label(&mut self, label: &str) {
        self.action_label = label.to_string();
    }

    fn set_controls_enabled(&mut self, enabled: bool) {
        self.controls_enabled = enabled;
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }

    fn clear_word_display(&mut self) {
        self.layout = None;
        self.slots.clear();
        self.typed.clear();
        self.tip.clear();
        self.translation.clear();
        self.message = None;
        self.controls_enabled = false;
        self.input_enabled = false;
    }
}
