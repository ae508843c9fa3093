//! Cumulative demand leveling across closures.

/// Folds demand forward through non-working runs in one left-to-right pass.
///
/// `cumulative[0] = adjusted[0]`; afterwards the accumulator restarts
/// whenever the *previous* day was a working day and keeps growing while
/// the previous day was closed. The first day behaves as if preceded by a
/// working day.
///
/// Both slices must have the same length.
///
/// # Examples
///
/// ```
/// use pick_plan::plan::leveling::cumulative_demand;
///
/// // Mon works, Tue is closed, Wed works.
/// let cum = cumulative_demand(&[10, 10, 10], &[true, false, true]);
/// assert_eq!(cum, vec![10, 10, 20]);
/// ```
pub fn cumulative_demand(adjusted: &[u64], is_working: &[bool]) -> Vec<u64> {
    debug_assert_eq!(adjusted.len(), is_working.len());

    let mut cumulative = Vec::with_capacity(adjusted.len());
    let mut previous_working = true;
    let mut running = 0_u64;
    for (&demand, &working) in adjusted.iter().zip(is_working) {
        running = if previous_working {
            demand
        } else {
            running.saturating_add(demand)
        };
        cumulative.push(running);
        previous_working = working;
    }
    cumulative
}
