// Sat Oct 17 2026 - Alex

use bitflags::bitflags;

bitflags! {
    /// Controls how a type name is rendered.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NameFlags: u32 {
        /// Keep the enclosing scopes (`ns::Outer::Inner`).
        const SCOPED = 1 << 0;
        /// Follow typedefs to the underlying type first.
        const FINAL = 1 << 1;
    }
}

/// Last component of a scoped name, ignoring `::` inside template
/// argument lists.
pub fn unscoped(name: &str) -> &str {
    let bytes = name.as_bytes();
    let mut depth = 0i32;
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'<' | b'(' => depth += 1,
            b'>' | b')' => depth -= 1,
            b':' if depth == 0 && i + 1 < bytes.len() && bytes[i + 1] == b':' => {
                start = i + 2;
                i += 1;
            }
            _ => {}
        }
        i += 1;
    }
    &name[start..]
}
