// Sat Oct 17 2026 - Alex

use crate::structure::Offset;
use std::fmt;
use std::ops::{Add, Sub};

/// Address of an object (or of something inside one).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address {
    value: u64,
}

impl Address {
    pub fn new(value: u64) -> Self {
        Self { value }
    }

    pub fn zero() -> Self {
        Self { value: 0 }
    }

    pub fn from_ptr<T>(ptr: *const T) -> Self {
        Self { value: ptr as usize as u64 }
    }

    pub fn from_ref<T>(value: &T) -> Self {
        Self::from_ptr(value as *const T)
    }

    pub fn as_u64(&self) -> u64 {
        self.value
    }

    pub fn as_ptr(&self) -> *const u8 {
        self.value as usize as *const u8
    }

    pub fn is_null(&self) -> bool {
        self.value == 0
    }

    /// Moves the address by a signed byte displacement.
    pub fn offset(&self, offset: i64) -> Self {
        Self { value: self.value.wrapping_add(offset as u64) }
    }

    /// Adjusts an object address to one of its subobjects.
    pub fn adjust(&self, offset: Offset) -> Self {
        self.offset(offset.as_i64())
    }

    pub fn distance(&self, other: Self) -> i64 {
        self.value.wrapping_sub(other.value) as i64
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016x}", self.value)
    }
}

impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.value, f)
    }
}

impl Add<u64> for Address {
    type Output = Self;
    fn add(self, rhs: u64) -> Self::Output {
        Self { value: self.value.wrapping_add(rhs) }
    }
}

impl Sub<u64> for Address {
    type Output = Self;
    fn sub(self, rhs: u64) -> Self::Output {
        Self { value: self.value.wrapping_sub(rhs) }
    }
}

impl Sub<Address> for Address {
    type Output = i64;
    fn sub(self, rhs: Address) -> Self::Output {
        self.distance(rhs)
    }
}

impl From<u64> for Address {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl From<Address> for u64 {
    fn from(addr: Address) -> Self {
        addr.value
    }
}
