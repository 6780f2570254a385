//! Format-agnostic processing of a file's texture records.
//!
//! Both container formats boil down to a list of [`Candidate`]s, each either
//! pointing at a [`TextureRecord`](crate::lump::TextureRecord) or already
//! known to be skipped.  A [`Session`] owns the open file for the duration of
//! one run and drives the mip generation for every candidate.

mod report;
mod session;

pub use report::{ProcessingReport, TextureOutcome, TextureReport};
pub use session::{process_file, process_stream, Options, Session};

use crate::error::{Error, Result};
use crate::{bsp, wad};
use std::fmt;

/// Container format, identified by the first four bytes of a file
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Kind {
    /// WAD2 texture archive
    Archive,
    /// BSP level with an embedded texture lump
    Embedded,
}

impl Kind {
    pub fn from_magic(magic: [u8; 4]) -> Result<Kind> {
        if magic == wad::MAGIC {
            Ok(Kind::Archive)
        } else if u32::from_le_bytes(magic) == bsp::BSP_VERSION {
            Ok(Kind::Embedded)
        } else {
            Err(Error::UnknownSignature(magic))
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Archive => write!(f, "WAD"),
            Kind::Embedded => write!(f, "BSP"),
        }
    }
}

/// Where a candidate texture lives, or why it won't be touched
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Location {
    /// Texture record at absolute position `base`.  The record and all of
    /// its mips must end at or before `end`.
    Record { base: u64, end: u64 },
    Skip(TextureOutcome),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Candidate {
    /// Name from the container's own directory, if it has one
    pub name: Option<[u8; 16]>,
    pub location: Location,
}

/// A located set of texture candidates in one container file
pub trait Container {
    fn kind(&self) -> Kind;

    /// Candidates in file order
    fn candidates(&self) -> &[Candidate];
}
