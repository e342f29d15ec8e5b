//! Level math over an ascending XP threshold table.

/// Level for a total XP amount.
///
/// Scans the table from the top and returns the 1-indexed position of the
/// highest threshold that `xp` meets. Never below 1, even for an empty table.
pub fn level_for_xp(xp: u64, thresholds: &[u64]) -> u32 {
    for (i, &threshold) in thresholds.iter().enumerate().rev() {
        if xp >= threshold {
            return i as u32 + 1;
        }
    }
    1
}

/// XP at which `level` starts.
pub fn level_floor_xp(level: u32, thresholds: &[u64]) -> u64 {
    thresholds
        .get(level.saturating_sub(1) as usize)
        .copied()
        .unwrap_or(0)
}

/// Whether `level` is the last entry of the table.
pub fn is_max_level(level: u32, thresholds: &[u64]) -> bool {
    level as usize >= thresholds.len()
}

/// Percent of the way from the current level to the next, in `[0, 100]`.
///
/// The top level reports 100.
pub fn progress_to_next_level(xp: u64, level: u32, thresholds: &[u64]) -> f64 {
    if is_max_level(level, thresholds) {
        return 100.0;
    }
    let current = level_floor_xp(level, thresholds);
    let next = thresholds[level as usize];
    if next <= current {
        return 100.0;
    }
    let gained = xp.saturating_sub(current) as f64;
    let span = (next - current) as f64;
    (gained / span * 100.0).clamp(0.0, 100.0)
}

/// XP still needed to reach the next level, or `None` at the top.
pub fn xp_to_next_level(xp: u64, level: u32, thresholds: &[u64]) -> Option<u64> {
    thresholds
        .get(level as usize)
        .map(|&next| next.saturating_sub(xp))
}
