//! Regenerate the reduced mip levels of paletted textures in Quake WAD2
//! archives and BSP levels.
//!
//! Every texture record carries its full-size image plus three pre-shrunk
//! copies.  The copies are rebuilt from the full-size image with bilinear
//! filtering and written back over the old ones without moving any data, so
//! every offset and the file length stay the same.

pub mod bsp;
pub mod container;
pub mod error;
pub mod lump;
pub mod mip;
pub mod wad;

mod common;

pub use common::{
    name_to_string, nearest_index, palette_from_bytes, trim_name, Palette,
    QUAKE_PALETTE, TRANSPARENT_INDEX,
};

pub use container::{process_file, process_stream, Options};
pub use error::{Error as RemipError, Result as RemipResult};
