use super::types::CapacityRecord;

/// A day is a working day iff its combined capacity is positive.
pub fn is_working(picking_capacity: i64, packing_capacity: i64) -> bool {
    picking_capacity.saturating_add(packing_capacity) > 0
}

/// Classifies a possibly missing capacity record; no record means closed.
pub fn classify(record: Option<&CapacityRecord>) -> bool {
    record.is_some_and(|r| is_working(r.picking_capacity, r.packing_capacity))
}
