/// Length of the longest contiguous run of non-working days.
///
/// Returns 0 for an empty series or one without closures.
///
/// # Examples
///
/// ```
/// use pick_plan::plan::run_length::max_run;
///
/// let flags = [true, false, false, true, false, true, true, false, false, false];
/// assert_eq!(max_run(&flags), 3);
/// ```
pub fn max_run(is_working: &[bool]) -> usize {
    let mut current = 0_usize;
    let mut longest = 0_usize;
    for &working in is_working {
        if working {
            current = 0;
        } else {
            current += 1;
            longest = longest.max(current);
        }
    }
    longest
}
