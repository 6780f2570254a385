use super::{Entry, Head};
use crate::container::{Candidate, Container, Kind, Location, TextureOutcome};
use crate::error::{Error, Result};
use crate::lump::kind;
use std::io::{Read, Seek, SeekFrom};
use std::mem::size_of;
use tracing::debug;

/// WAD2 archive directory.  Only uncompressed mip texture lumps become
/// texture records, everything else is skipped.
#[derive(Clone, Debug)]
pub struct Archive {
    entries: Vec<Entry>,
    candidates: Vec<Candidate>,
}

impl Archive {
    /// Read the header and lump directory of a `file_length` byte archive
    pub fn locate(
        cursor: &mut (impl Read + Seek),
        file_length: u64,
    ) -> Result<Self> {
        let entries = read_directory(cursor, file_length)?;

        let candidates = entries
            .iter()
            .map(|entry| {
                let location = if entry.kind() != kind::MIPTEX {
                    Location::Skip(TextureOutcome::WrongType(entry.kind()))
                } else if entry.compression() != 0 {
                    Location::Skip(TextureOutcome::Compressed)
                } else {
                    let base = u64::from(entry.offset());

                    Location::Record {
                        base,
                        end: base + u64::from(entry.length()),
                    }
                };

                Candidate {
                    name: Some(entry.name()),
                    location,
                }
            })
            .collect();

        Ok(Archive {
            entries,
            candidates,
        })
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }
}

impl Container for Archive {
    fn kind(&self) -> Kind {
        Kind::Archive
    }

    fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }
}

fn read_directory(
    cursor: &mut (impl Read + Seek),
    file_length: u64,
) -> Result<Vec<Entry>> {
    const WAD_ENTRY_SIZE: usize = size_of::<Entry>();

    cursor.rewind().map_err(Error::Unreadable)?;
    let mut header_bytes = [0u8; size_of::<Head>()];
    cursor
        .read_exact(&mut header_bytes[..])
        .map_err(Error::from_read)?;
    let header = Head::try_from(header_bytes)?;
    let entry_ct = header.entry_count();
    let dir_offset = header.directory_offset();

    let dir_end = u64::from(entry_ct) * WAD_ENTRY_SIZE as u64
        + u64::from(dir_offset);

    if dir_end > file_length {
        return Err(Error::MalformedDirectory(format!(
            "{entry_ct} entries at offset {dir_offset} extend past end of file"
        )));
    }

    debug!(entries = entry_ct, offset = dir_offset, "Reading WAD directory");

    cursor
        .seek(SeekFrom::Start(dir_offset.into()))
        .map_err(Error::from_read)?;

    // Bounded by the file length check above
    let mut entries = Vec::<Entry>::with_capacity(entry_ct as usize);

    for _ in 0..entry_ct {
        let mut entry_bytes = [0u8; WAD_ENTRY_SIZE];
        cursor
            .read_exact(&mut entry_bytes[0..WAD_ENTRY_SIZE])
            .map_err(Error::from_read)?;
        entries.push(entry_bytes.into());
    }

    Ok(entries)
}
