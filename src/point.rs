use bytemuck::{Pod, Zeroable};

/// Value stored in a slot that no input point occupies.
pub const MISSING: f64 = f64::NAN;

/// A single measurement on the time axis.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct Point {
    pub value: f64,
    pub timestamp: u32,
    pub _pad0: u32,
}

impl Point {
    #[inline(always)]
    pub fn new(value: f64, timestamp: u32) -> Self {
        Self {
            value,
            timestamp,
            _pad0: 0,
        }
    }

    /// A gap marker for the slot at `timestamp`.
    #[inline(always)]
    pub fn missing(timestamp: u32) -> Self {
        Self::new(MISSING, timestamp)
    }

    #[inline(always)]
    pub fn is_missing(&self) -> bool {
        self.value.is_nan()
    }
}

impl From<(f64, u32)> for Point {
    fn from((value, timestamp): (f64, u32)) -> Self {
        Self::new(value, timestamp)
    }
}

/// Any two NaN values compare equal, whatever their bit pattern.
impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        if self.timestamp != other.timestamp {
            return false;
        }
        match (self.is_missing(), other.is_missing()) {
            (true, true) => true,
            (false, false) => self.value == other.value,
            _ => false,
        }
    }
}
