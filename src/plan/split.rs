//! Leave-buffer reserve and baseline/surplus split.

/// Default share of cumulative demand held back as leave buffer.
pub const DEFAULT_LEAVE_BUFFER_RATIO: f64 = 0.15;

/// Buffer, baseline and surplus for one day.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Split {
    pub leave_buffer: f64,
    pub min_pick_qty: f64,
    pub extra_qty: f64,
}

/// Computes the buffer/split figures for every day.
///
/// On working days:
/// - `leave_buffer[i] = cumulative[i] * ratio`
/// - `min_pick_qty[i] = (cumulative[i] + leave_buffer[i + 1]) / 2`
/// - `extra_qty[i] = cumulative[i] - min_pick_qty[i]`
///
/// The look-ahead buffer is 0 past the last day and on a non-working next
/// day, because non-working days carry no buffer. All figures are 0 on
/// non-working days.
pub fn split(cumulative: &[u64], is_working: &[bool], ratio: f64) -> Vec<Split> {
    debug_assert_eq!(cumulative.len(), is_working.len());

    let buffers: Vec<f64> = cumulative
        .iter()
        .zip(is_working)
        .map(|(&cum, &working)| if working { cum as f64 * ratio } else { 0.0 })
        .collect();

    (0..cumulative.len())
        .map(|i| {
            if !is_working[i] {
                return Split::default();
            }
            let cum = cumulative[i] as f64;
            let next_buffer = buffers.get(i + 1).copied().unwrap_or(0.0);
            let min_pick_qty = (cum + next_buffer) / 2.0;
            Split {
                leave_buffer: buffers[i],
                min_pick_qty,
                extra_qty: cum - min_pick_qty,
            }
        })
        .collect()
}
