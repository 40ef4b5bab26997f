//! Capacity growth schedule.
//!
//! Small buffers grow through a fixed table of tiers so that the very
//! common case of a handful of elements wastes little memory. From
//! [`TIER_LIMIT`] upward, capacity rounds to the next power of two,
//! which keeps appends amortised O(1).

/// Ascending capacity tiers used below [`TIER_LIMIT`].
pub const GROWTH_TIERS: [u16; 24] = [
    0, 2, 4, 6, 8, 10, 12, 14, 16, 20, 24, 28, 32, 40, 48, 64, 96, 128, 192, 256, 384, 512, 768,
    1024,
];

/// First element count handled by power-of-two rounding instead of the tier table.
pub const TIER_LIMIT: usize = 1024;

/// The next capacity strictly greater than `desired_minimum`.
///
/// Below [`TIER_LIMIT`] this is the smallest entry of [`GROWTH_TIERS`]
/// greater than the input; from there on it is the smallest power of two
/// greater than the input (so a power of two doubles). Saturates at
/// `usize::MAX` instead of overflowing.
pub fn next_size(desired_minimum: usize) -> usize {
    if desired_minimum < TIER_LIMIT {
        return next_tier(desired_minimum as u16);
    }
    desired_minimum
        .checked_add(1)
        .and_then(usize::checked_next_power_of_two)
        .unwrap_or(usize::MAX)
}

fn next_tier(value: u16) -> usize {
    // The last tier equals TIER_LIMIT, so an exact match always has a successor.
    let index = match GROWTH_TIERS.binary_search(&value) {
        Ok(exact) => exact + 1,
        Err(insert_at) => insert_at,
    };
    GROWTH_TIERS[index] as usize
}
