mod repr;

pub use repr::{Image, TextureRecord};

/// Lump type tags used by WAD2 directory entries
pub mod kind {
    pub const PALETTE: u8 = 0x40;
    pub const SBAR: u8 = 0x42;
    pub const MIPTEX: u8 = 0x44;
    pub const FLAT: u8 = 0x45;

    /// Human readable name for a lump type tag
    pub fn describe(kind: u8) -> &'static str {
        match kind {
            PALETTE => "palette",
            SBAR => "status bar picture",
            MIPTEX => "mip texture",
            FLAT => "console picture",
            _ => "unknown",
        }
    }
}
