use rand::Rng;

/// In-place Fisher–Yates: walk from the last index down to 1, swapping each
/// element with a uniformly chosen one at or below it.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// First-try accuracy as a whole percentage, rounding halves up.
pub fn accuracy_percent(correct: u32, attempted: u32) -> u32 {
    match attempted {
        0 => 0,
        total => ((200 * correct as u64 + total as u64) / (2 * total as u64)) as u32,
    }
}

/// `mm:ss`, minutes uncapped.
pub fn format_clock(total_secs: u64) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}
