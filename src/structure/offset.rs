// Sat Oct 17 2026 - Alex

use std::fmt;
use std::ops::Add;

/// Signed byte displacement from an object to one of its subobjects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Offset {
    value: i64,
}

impl Offset {
    pub fn new(value: i64) -> Self {
        Self { value }
    }

    pub fn zero() -> Self {
        Self { value: 0 }
    }

    pub fn as_i64(&self) -> i64 {
        self.value
    }

    pub fn is_zero(&self) -> bool {
        self.value == 0
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value < 0 {
            write!(f, "-0x{:x}", self.value.unsigned_abs())
        } else {
            write!(f, "0x{:x}", self.value)
        }
    }
}

impl Add for Offset {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self { value: self.value + rhs.value }
    }
}

impl From<i64> for Offset {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<usize> for Offset {
    fn from(value: usize) -> Self {
        Self::new(value as i64)
    }
}
