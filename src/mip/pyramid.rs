use super::reduce;
use crate::common::Palette;
use crate::error::{Error, Result};
use crate::lump::{Image, TextureRecord};
use std::ops::Range;

/// How many mip levels a texture has, counting the full-size image
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MipConfig {
    levels: usize,
}

impl MipConfig {
    pub const MIN_LEVELS: usize = 2;
    pub const MAX_LEVELS: usize = TextureRecord::MIP_COUNT;

    pub fn new(levels: usize) -> Result<Self> {
        if !(Self::MIN_LEVELS..=Self::MAX_LEVELS).contains(&levels) {
            return Err(Error::InvalidConfig(format!(
                "Mip level count must be in [{}..{}], got {levels}",
                Self::MIN_LEVELS,
                Self::MAX_LEVELS,
            )));
        }

        Ok(MipConfig { levels })
    }

    pub fn levels(&self) -> usize {
        self.levels
    }

    /// Levels that get regenerated (everything but the base)
    pub fn reduced_levels(&self) -> Range<usize> {
        1..self.levels
    }

    /// Whether a `width` x `height` base image is large enough for every
    /// level to have at least one pixel
    pub fn fits(&self, width: u32, height: u32) -> bool {
        let shift = self.levels - 1;
        width >> shift > 0 && height >> shift > 0
    }
}

impl Default for MipConfig {
    fn default() -> Self {
        MipConfig {
            levels: Self::MAX_LEVELS,
        }
    }
}

/// Generate every reduced mip level for `base`.  Element `i` of the result is
/// level `i + 1`, sized `(width >> (i + 1), height >> (i + 1))`.  Each level
/// is filtered straight from the base image rather than from the previous
/// level.
pub fn build_pyramid(
    base: &Image,
    config: &MipConfig,
    palette: &Palette,
) -> Result<Vec<Image>> {
    let (width, height) = (base.width(), base.height());

    if !config.fits(width, height) {
        return Err(Error::TextureTooSmall { width, height });
    }

    Ok(config
        .reduced_levels()
        .map(|level| reduce(base, width >> level, height >> level, palette))
        .collect())
}
