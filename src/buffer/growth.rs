//! Capacity growth policy for [`ByteBuffer`](super::ByteBuffer) appends.

/// Computes the capacity to allocate when an append needs `required` bytes.
///
/// The policy is a plain function so it can be swapped in tests and compared
/// across implementations. Results smaller than `required` are raised to
/// `required`; `None` means the computation overflowed.
#[derive(Clone, Copy, Debug)]
pub struct GrowthPolicy {
    grow: fn(usize) -> Option<usize>,
}

fn three_halves(required: usize) -> Option<usize> {
    required.checked_add(2)?.checked_mul(3).map(|n| n / 2)
}

fn exact(required: usize) -> Option<usize> {
    Some(required)
}

impl GrowthPolicy {
    /// `((required + 2) * 3) / 2`: amortized ~1.5x growth.
    pub const THREE_HALVES: Self = Self { grow: three_halves };

    /// Allocate exactly what is required. Appends become O(n) each.
    pub const EXACT: Self = Self { grow: exact };

    /// Custom policy.
    pub const fn new(grow: fn(usize) -> Option<usize>) -> Self {
        Self { grow }
    }

    /// Capacity to allocate for `required` bytes.
    pub fn next_capacity(&self, required: usize) -> Option<usize> {
        (self.grow)(required).map(|cap| cap.max(required))
    }
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self::THREE_HALVES
    }
}
