//! Core shared types for Quarry.
//!
//! This crate is intentionally small and dependency-light.

use serde::{Deserialize, Serialize};

/// A half-open `[start, end)` byte range into a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// An empty span anchored at offset zero.
    #[inline]
    pub const fn zero() -> Self {
        Self { start: 0, end: 0 }
    }

    #[inline]
    pub const fn len(self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.end <= self.start
    }

    #[inline]
    pub const fn contains(self, offset: u32) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Slice `text` to this span, clamping to the text's length and
    /// rounding edges that fall inside a multibyte character down to
    /// the previous char boundary.
    pub fn slice(self, text: &str) -> &str {
        let start = floor_char_boundary(text, (self.start as usize).min(text.len()));
        let end = floor_char_boundary(text, (self.end as usize).min(text.len())).max(start);
        &text[start..end]
    }
}

fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_slice_clamps_to_text_bounds() {
        let text = "abcdef";
        assert_eq!(Span::new(1, 4).slice(text), "bcd");
        assert_eq!(Span::new(4, 100).slice(text), "ef");
        assert_eq!(Span::new(100, 200).slice(text), "");
    }

    #[test]
    fn span_slice_rounds_edges_down_to_char_boundaries() {
        // é is two bytes; offsets 3 and 3..4 land inside it.
        let text = "abécd";
        assert_eq!(Span::new(0, 3).slice(text), "ab");
        assert_eq!(Span::new(3, 6).slice(text), "écd");
        assert_eq!(Span::new(2, 4).slice(text), "é");
        assert_eq!(Span::new(3, 3).slice(text), "");
    }

    #[test]
    fn span_contains_is_half_open() {
        let span = Span::new(2, 5);
        assert!(!span.contains(1));
        assert!(span.contains(2));
        assert!(span.contains(4));
        assert!(!span.contains(5));
    }
}
