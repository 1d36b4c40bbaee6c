use std::{cmp::Ordering, ops::Add};

/// A path distance with total ordering, usable as a heap priority.
///
/// `f32` is only `PartialOrd`, so distances are wrapped and compared with
/// [`f32::total_cmp`]. Unreached vertices carry [`TotalF32::INFINITY`].
#[derive(Debug, Copy, Clone)]
#[repr(transparent)]
pub struct TotalF32(pub f32);

impl TotalF32 {
    pub const ZERO: TotalF32 = TotalF32(0.0);
    pub const INFINITY: TotalF32 = TotalF32(f32::INFINITY);
}

impl PartialEq for TotalF32 {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for TotalF32 {}

impl PartialOrd for TotalF32 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TotalF32 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Add<f32> for TotalF32 {
    type Output = TotalF32;

    fn add(self, rhs: f32) -> TotalF32 {
        TotalF32(self.0 + rhs)
    }
}

impl From<f32> for TotalF32 {
    fn from(x: f32) -> Self {
        TotalF32(x)
    }
}
