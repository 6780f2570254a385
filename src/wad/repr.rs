use std::mem::size_of;

use crate::common::name_to_string;
use crate::error::Error;

pub const MAGIC: [u8; 4] = *b"WAD2";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(C, packed)]
pub struct Head {
    magic: [u8; 4],
    entry_count: u32,
    directory_offset: u32,
}

impl Head {
    pub fn new(entry_count: u32, directory_offset: u32) -> Self {
        Head {
            magic: MAGIC,
            entry_count,
            directory_offset,
        }
    }

    pub fn entry_count(&self) -> u32 {
        self.entry_count
    }

    pub fn directory_offset(&self) -> u32 {
        self.directory_offset
    }
}

impl TryFrom<[u8; size_of::<Head>()]> for Head {
    type Error = Error;

    fn try_from(bytes: [u8; size_of::<Head>()]) -> Result<Self, Self::Error> {
        let mut chunks = bytes
            .chunks_exact(4usize)
            .map(|chunk| <[u8; 4]>::try_from(chunk).unwrap());

        let magic = chunks.next().unwrap();

        if magic != MAGIC {
            return Err(Error::UnknownSignature(magic));
        }

        let entry_count = u32::from_le_bytes(chunks.next().unwrap());
        let directory_offset = u32::from_le_bytes(chunks.next().unwrap());

        Ok(Head::new(entry_count, directory_offset))
    }
}

/// Provides the location of a lump within a WAD archive, length of the lump,
/// name (16 bytes, null-terminated), lump kind, and compression
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(C, packed)]
pub struct Entry {
    offset: u32,
    length: u32,
    uncompressed_length: u32,
    lump_kind: u8,
    compression: u8, // 0 - uncompressed
    _padding: u16,
    name: [u8; 16],
}

impl Entry {
    pub fn new(offset: u32, length: u32, lump_kind: u8, name: [u8; 16]) -> Self {
        Entry {
            offset,
            length,
            uncompressed_length: length,
            lump_kind,
            compression: 0u8,
            _padding: 0u16,
            name,
        }
    }

    /// Name for display
    pub fn name_to_string(&self) -> String {
        let name = self.name;
        name_to_string(&name).into_owned()
    }

    /// Name in raw bytes
    pub fn name(&self) -> [u8; 16] {
        self.name
    }

    /// WAD offset of lump
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Length of lump in bytes
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Length of lump once decompressed
    pub fn uncompressed_length(&self) -> u32 {
        self.uncompressed_length
    }

    /// Lump kind as a byte
    pub fn kind(&self) -> u8 {
        self.lump_kind
    }

    pub fn compression(&self) -> u8 {
        self.compression
    }
}

impl From<[u8; size_of::<Entry>()]> for Entry {
    fn from(bytes: [u8; size_of::<Entry>()]) -> Self {
        let word = |at: usize| {
            u32::from_le_bytes(<[u8; 4]>::try_from(&bytes[at..at + 4]).unwrap())
        };

        Entry {
            offset: word(0),
            length: word(4),
            uncompressed_length: word(8),
            lump_kind: bytes[12],
            compression: bytes[13],
            _padding: u16::from_le_bytes([bytes[14], bytes[15]]),
            name: <[u8; 16]>::try_from(&bytes[16..]).unwrap(),
        }
    }
}
