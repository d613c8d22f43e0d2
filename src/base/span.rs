//! Source text positions and ranges.

// Re-export from text-size for compatibility
pub use text_size::TextRange;
pub use text_size::TextSize;

/// Build a range from raw byte offsets.
#[inline]
pub(crate) fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(TextSize::from(start), TextSize::from(end))
}
