use std::borrow::Cow;

mod palette;

pub use palette::{
    nearest_index, palette_from_bytes, Palette, QUAKE_PALETTE,
    TRANSPARENT_INDEX,
};


/// Slice of a fixed-size name up to (not including) the first null byte.  A
/// name with no terminator uses the whole slice.
pub fn trim_name(slice: &[u8]) -> &[u8] {
    let len = slice.iter().position(|&b| b == 0u8).unwrap_or(slice.len());
    &slice[..len]
}

/// Name for display, with invalid UTF-8 replaced
pub fn name_to_string(slice: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(trim_name(slice))
}
