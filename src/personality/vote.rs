//! Majority vote over per-post labels.

/// Most frequent label in `labels`.
///
/// Counts are tallied in first-seen order and a label must strictly exceed
/// the current leader to replace it, so on an exact tie the label that was
/// seen first wins. Returns `None` for an empty slice.
pub fn majority_label(labels: &[f64]) -> Option<f64> {
    let mut tally: Vec<(f64, usize)> = Vec::new();
    for &label in labels {
        match tally.iter_mut().find(|(seen, _)| *seen == label) {
            Some((_, count)) => *count += 1,
            None => tally.push((label, 1)),
        }
    }

    let mut leader: Option<(f64, usize)> = None;
    for (label, count) in tally {
        if leader.map_or(true, |(_, best)| count > best) {
            leader = Some((label, count));
        }
    }
    leader.map(|(label, _)| label)
}
