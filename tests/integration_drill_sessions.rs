use std::collections::HashMap;

use assert_matches::assert_matches;
use rand::{rngs::StdRng, SeedableRng};
use wordbox::layout::SlotLayout;
use wordbox::{
    Catalog, CheckOutcome, DrillView, MessageKind, Phase, SessionController, SilentSpeaker,
    ThemeSelection, VocabularyEntry,
};

/// Integration tests for whole drill sessions: theme filtering, counting,
/// accuracy, wraparound and the slot layout rules.

type Drill = SessionController<DrillView, SilentSpeaker>;

fn drill(catalog: Catalog, seed: u64) -> Drill {
    SessionController::with_rng(
        catalog,
        DrillView::default(),
        SilentSpeaker,
        StdRng::seed_from_u64(seed),
    )
}

fn small_catalog() -> Catalog {
    Catalog::from(vec![
        VocabularyEntry::new("cat", "猫", "Purrs", "animals"),
        VocabularyEntry::new("dog", "狗", "Barks", "animals"),
        VocabularyEntry::new("sky", "天空", "Blue", "nature"),
    ])
}

fn counts<'a>(words: impl Iterator<Item = &'a VocabularyEntry>) -> HashMap<&'a str, usize> {
    let mut map = HashMap::new();
    for entry in words {
        *map.entry(entry.word.as_str()).or_insert(0) += 1;
    }
    map
}

fn current_word(d: &Drill) -> String {
    d.state().current_entry().unwrap().word.clone()
}

#[test]
fn active_set_matches_theme_for_every_theme() {
    let catalog = Catalog::embedded().unwrap();
    let themes: Vec<String> = catalog.themes().iter().map(|t| t.to_string()).collect();

    for (seed, theme) in themes.iter().enumerate() {
        let mut d = drill(catalog.clone(), seed as u64);
        d.select_theme(ThemeSelection::Named(theme.clone()));

        let expected = catalog.entries().iter().filter(|e| &e.theme == theme);
        assert_eq!(counts(d.state().active_set.iter()), counts(expected));
    }

    let mut d = drill(catalog.clone(), 99);
    d.select_theme(ThemeSelection::All);
    assert_eq!(
        counts(d.state().active_set.iter()),
        counts(catalog.entries().iter())
    );
    assert_eq!(d.presenter().word_count, catalog.len());
}

#[test]
fn shuffle_varies_order_between_sessions() {
    let catalog = Catalog::embedded().unwrap();
    let mut orders = std::collections::HashSet::new();

    for seed in 0..5 {
        let mut d = drill(catalog.clone(), seed);
        d.select_theme(ThemeSelection::All);
        let order: Vec<String> = d
            .state()
            .active_set
            .iter()
            .map(|e| e.word.clone())
            .collect();
        orders.insert(order);
    }

    assert!(orders.len() > 1);
}

#[test]
fn animals_scenario() {
    let mut d = drill(small_catalog(), 11);
    d.select_theme(ThemeSelection::Named("animals".into()));

    let mut words: Vec<&str> = d
        .state()
        .active_set
        .iter()
        .map(|e| e.word.as_str())
        .collect();
    words.sort_unstable();
    assert_eq!(words, vec!["cat", "dog"]);
    assert_eq!(d.presenter().word_count, 2);

    let word = current_word(&d);
    assert_eq!(
        d.check_answer(&word),
        CheckOutcome::Correct { first_try: true }
    );
    assert_eq!(d.state().correct_first_try_count, 1);
    assert_eq!(d.state().attempted_word_count, 1);
    assert_eq!(d.state().accuracy(), 100);

    // next word: too long an answer is a length mismatch
    assert!(d.advance());
    assert_eq!(
        d.check_answer("catt"),
        CheckOutcome::LengthMismatch { expected: 3 }
    );
    assert_eq!(d.state().attempted_word_count, 2);
    assert_eq!(d.state().phase, Phase::AwaitingInput);
    assert_matches!(d.presenter().message, Some((_, MessageKind::Error)));

    assert_matches!(d.check_answer("cat!"), CheckOutcome::LengthMismatch { .. });
    assert_eq!(d.state().attempted_word_count, 2);
    assert_eq!(d.presenter().accuracy, 50);
}

#[test]
fn three_of_four_is_seventy_five_percent() {
    let catalog = Catalog::from(vec![
        VocabularyEntry::new("one", "", "", "numbers"),
        VocabularyEntry::new("two", "", "", "numbers"),
        VocabularyEntry::new("six", "", "", "numbers"),
        VocabularyEntry::new("ten", "", "", "numbers"),
    ]);
    let mut d = drill(catalog, 5);
    d.select_theme(ThemeSelection::All);

    for i in 0..4 {
        let word = current_word(&d);
        if i == 2 {
            assert_eq!(d.check_answer("xxx"), CheckOutcome::Incorrect);
        }
        assert_matches!(d.check_answer(&word), CheckOutcome::Correct { .. });
        d.advance();
    }

    assert_eq!(d.state().attempted_word_count, 4);
    assert_eq!(d.state().correct_first_try_count, 3);
    assert_eq!(d.state().accuracy(), 75);
    assert_eq!(
        (d.presenter().correct, d.presenter().total, d.presenter().accuracy),
        (3, 4, 75)
    );
}

#[test]
fn cyclic_wraparound_returns_to_start() {
    let mut d = drill(Catalog::embedded().unwrap(), 2);
    d.select_theme(ThemeSelection::Named("food".into()));
    let n = d.state().active_set.len();
    let first = current_word(&d);

    for step in 1..=n {
        d.reveal_answer();
        assert!(d.advance());
        assert_eq!(d.state().cursor, step % n);
    }

    assert_eq!(d.state().cursor, 0);
    assert_eq!(current_word(&d), first);
    // revealing never counts
    assert_eq!(d.state().attempted_word_count, 0);
}

#[test]
fn two_row_phrase_is_checked_with_its_space() {
    let catalog = Catalog::from(vec![VocabularyEntry::new(
        "international student",
        "留学生",
        "",
        "school",
    )]);
    let mut d = drill(catalog, 0);
    d.select_theme(ThemeSelection::All);

    assert_eq!(d.presenter().slots.len(), 2);
    assert_eq!(d.presenter().slots[0].len(), 13);
    assert_eq!(d.presenter().slots[1].len(), 7);
    assert_eq!(d.state().expected_length(), 21);

    assert_eq!(
        d.check_answer("internationalstudent"),
        CheckOutcome::LengthMismatch { expected: 21 }
    );
    assert_eq!(
        d.check_answer("International Student"),
        CheckOutcome::Correct { first_try: false }
    );
}

#[test]
fn slot_layout_scenarios() {
    assert_eq!(SlotLayout::for_word("big dog").row_lengths(), vec![7]);
    assert_eq!(
        SlotLayout::for_word("international student").row_lengths(),
        vec![13, 7]
    );
}

#[test]
fn restarting_a_theme_starts_a_fresh_session() {
    let mut d = drill(small_catalog(), 8);
    d.select_theme(ThemeSelection::Named("nature".into()));
    d.record_keystroke("s");
    d.check_answer("sky");
    assert!(d.state().timer_active());

    d.select_theme(ThemeSelection::Named("nature".into()));

    let state = d.state();
    assert_eq!(state.attempted_word_count, 0);
    assert_eq!(state.phase, Phase::AwaitingInput);
    assert!(!state.timer_active());
    assert!(!state.typed_since_session_start);
    assert!(state.input.is_empty());
}
