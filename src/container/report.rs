use super::Kind;
use crate::lump::kind;
use std::fmt;

/// What happened to one texture
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TextureOutcome {
    /// All reduced mip levels were regenerated
    Processed,
    /// Archive lump isn't a mip texture
    WrongType(u8),
    /// Archive lump is compressed and can't be patched in place
    Compressed,
    /// BSP texture slot with no embedded data
    Missing,
    TooSmall { width: u32, height: u32 },
}

impl fmt::Display for TextureOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureOutcome::Processed => write!(f, "generated new mips"),
            TextureOutcome::WrongType(tag) => write!(
                f,
                "not a miptex lump ({}, {tag:#04x})",
                kind::describe(*tag)
            ),
            TextureOutcome::Compressed => write!(f, "lump is compressed"),
            TextureOutcome::Missing => write!(f, "texture is not embedded"),
            TextureOutcome::TooSmall { width, height } => {
                write!(f, "{width}x{height} is too small for mips")
            }
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TextureReport {
    pub name: String,
    pub outcome: TextureOutcome,
}

/// Outcome of every texture in one file, in file order
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ProcessingReport {
    pub kind: Kind,
    pub textures: Vec<TextureReport>,
}

impl ProcessingReport {
    pub fn new(kind: Kind) -> Self {
        ProcessingReport {
            kind,
            textures: Vec::new(),
        }
    }

    /// Number of textures that got new mips
    pub fn processed(&self) -> usize {
        self.textures
            .iter()
            .filter(|tex| tex.outcome == TextureOutcome::Processed)
            .count()
    }

    /// Number of textures left untouched
    pub fn skipped(&self) -> usize {
        self.textures.len() - self.processed()
    }
}
