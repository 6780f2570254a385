use super::{Entry, EntryOffset, Head};
use crate::container::{Candidate, Container, Kind, Location, TextureOutcome};
use crate::error::{Error, Result};
use std::io::{Read, Seek, SeekFrom};
use std::mem::size_of;
use tracing::debug;

/// Relative offset marking a texture that isn't stored in the BSP
const MISSING_TEXTURE: i32 = -1;

/// Texture lump of a BSP: a texture count, then that many offsets (relative to
/// the lump) of texture records
#[derive(Clone, Debug)]
pub struct Embedded {
    lump: Entry,
    candidates: Vec<Candidate>,
}

impl Embedded {
    /// Read the BSP header and texture lump index of a `file_length` byte file
    pub fn locate(
        cursor: &mut (impl Read + Seek),
        file_length: u64,
    ) -> Result<Self> {
        cursor.rewind().map_err(Error::Unreadable)?;
        let mut header_bytes = [0u8; size_of::<Head>()];
        cursor
            .read_exact(&mut header_bytes[..])
            .map_err(Error::from_read)?;
        let header = Head::try_from(header_bytes)?;

        let lump = header.entry(EntryOffset::Textures);
        let Entry { offset, length } = lump;

        if u64::from(offset) + u64::from(length) > file_length {
            return Err(Error::MalformedDirectory(format!(
                "Texture lump ({length} bytes at {offset}) extends past end of file"
            )));
        }

        let offsets = if length == 0 {
            Vec::new()
        } else {
            read_texture_offsets(cursor, offset, length)?
        };

        debug!(textures = offsets.len(), offset, length, "Read BSP texture lump");

        let candidates = offsets
            .into_iter()
            .map(|relative| -> Result<Candidate> {
                let location = if relative == MISSING_TEXTURE {
                    Location::Skip(TextureOutcome::Missing)
                } else {
                    let relative = u32::try_from(relative)
                        .ok()
                        .filter(|&relative| relative < length)
                        .ok_or_else(|| {
                            Error::MalformedDirectory(format!(
                                "Texture offset {relative} outside of texture lump"
                            ))
                        })?;

                    Location::Record {
                        base: u64::from(offset) + u64::from(relative),
                        end: u64::from(offset) + u64::from(length),
                    }
                };

                Ok(Candidate {
                    name: None,
                    location,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Embedded { lump, candidates })
    }

    /// Location of the texture lump
    pub fn lump(&self) -> Entry {
        self.lump
    }
}

impl Container for Embedded {
    fn kind(&self) -> Kind {
        Kind::Embedded
    }

    fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }
}

fn read_texture_offsets(
    cursor: &mut (impl Read + Seek),
    offset: u32,
    length: u32,
) -> Result<Vec<i32>> {
    let mut word = [0u8; size_of::<i32>()];

    cursor
        .seek(SeekFrom::Start(offset.into()))
        .map_err(Error::from_read)?;
    cursor.read_exact(&mut word).map_err(Error::from_read)?;

    let count = i32::from_le_bytes(word);

    // Count and offsets have to fit in the lump
    let capacity = u64::from(length) / size_of::<i32>() as u64;
    let fits = u64::try_from(count).map_or(false, |count| count < capacity);

    if !fits {
        return Err(Error::MalformedDirectory(format!(
            "Bad texture count {count} for a {length} byte lump"
        )));
    }

    let mut offsets = Vec::with_capacity(count as usize);

    for _ in 0..count {
        cursor.read_exact(&mut word).map_err(Error::from_read)?;
        offsets.push(i32::from_le_bytes(word));
    }

    Ok(offsets)
}
