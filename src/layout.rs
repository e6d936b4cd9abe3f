/// Phrases of exactly two sub-words longer than this are split across two rows.
pub const SPLIT_THRESHOLD: usize = 13;

/// Shown in a space slot while nothing (or a space) has been typed into it.
pub const SPACE_PLACEHOLDER: char = '·';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    Letter,
    Space,
}

/// How the letter slots for a word are arranged on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotLayout {
    /// One slot per character, spaces included.
    SingleRow(Vec<SlotKind>),
    /// One row per sub-word, no slot for the separating space.
    TwoRows { first: usize, second: usize },
}

impl SlotLayout {
    pub fn for_word(word: &str) -> Self {
        let parts: Vec<&str> = word.split(' ').collect();
        let total = word.chars().count();

        if parts.len() == 2 && total > SPLIT_THRESHOLD {
            return SlotLayout::TwoRows {
                first: parts[0].chars().count(),
                second: parts[1].chars().count(),
            };
        }

        SlotLayout::SingleRow(
            word.chars()
                .map(|c| if c == ' ' { SlotKind::Space } else { SlotKind::Letter })
                .collect(),
        )
    }

    /// Number of characters the user has to type, separating space included.
    pub fn expected_length(&self) -> usize {
        match self {
            SlotLayout::SingleRow(slots) => slots.len(),
            SlotLayout::TwoRows { first, second } => first + second + 1,
        }
    }

    /// Slot count per row.
    pub fn row_lengths(&self) -> Vec<usize> {
        match self {
            SlotLayout::SingleRow(slots) => vec![slots.len()],
            SlotLayout::TwoRows { first, second } => vec![*first, *second],
        }
    }

    /// Drop anything typed past the expected length.
    pub fn truncate(&self, raw: &str) -> String {
        raw.chars().take(self.expected_length()).collect()
    }

    /// Distribute typed characters over the slots, row by row.
    pub fn fill(&self, typed: &str) -> Vec<Vec<Option<char>>> {
        let typed: Vec<char> = typed.chars().take(self.expected_length()).collect();

        match self {
            SlotLayout::SingleRow(slots) => {
                let row = slots
                    .iter()
                    .enumerate()
                    .map(|(idx, kind)| match (kind, typed.get(idx)) {
                        (SlotKind::Space, None) | (SlotKind::Space, Some(' ')) => {
                            Some(SPACE_PLACEHOLDER)
                        }
                        (_, c) => c.copied(),
                    })
                    .collect();
                vec![row]
            }
            SlotLayout::TwoRows { first, second } => {
                // the character typed at the separator position has no slot
                let row1 = (0..*first).map(|idx| typed.get(idx).copied()).collect();
                let row2 = (0..*second)
                    .map(|idx| typed.get(first + 1 + idx).copied())
                    .collect();
                vec![row1, row2]
            }
        }
    }
}
