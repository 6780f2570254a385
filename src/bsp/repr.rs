use crate::error::Error;
use std::mem::size_of;

pub const BSP_VERSION: u32 = 29;
pub const ENTRY_COUNT: usize = 15;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(usize)]
pub enum EntryOffset {
    Entities = 0,
    Planes,
    Textures,
    Vertices,
    Vis,
    Nodes,
    TexInfo,
    Faces,
    Light,
    ClipNodes,
    Leaves,
    MarkSurfaces,
    Edges,
    SurfEdges,
    Models,
}

impl From<EntryOffset> for usize {
    fn from(offset: EntryOffset) -> Self {
        offset as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C, packed)]
pub struct Entry {
    pub offset: u32,
    pub length: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C, packed)]
pub struct Head {
    version: u32,
    entries: [Entry; ENTRY_COUNT],
}

impl Head {
    pub fn entry(&self, offset: EntryOffset) -> Entry {
        let idx: usize = offset.into();
        let entries = self.entries;
        entries[idx]
    }

    pub fn version(&self) -> u32 {
        self.version
    }
}

impl TryFrom<[u8; size_of::<Head>()]> for Head {
    type Error = Error;

    fn try_from(bytes: [u8; size_of::<Head>()]) -> Result<Head, Error> {
        let magic = <[u8; 4]>::try_from(&bytes[..4]).unwrap();
        let version = u32::from_le_bytes(magic);

        if version != BSP_VERSION {
            return Err(Error::UnknownSignature(magic));
        }

        let mut entries = [Entry {
            offset: 0,
            length: 0,
        }; ENTRY_COUNT];

        for (entry, chunk) in entries
            .iter_mut()
            .zip(bytes[4..].chunks_exact(size_of::<Entry>()))
        {
            *entry = Entry {
                offset: u32::from_le_bytes(
                    <[u8; 4]>::try_from(&chunk[..4]).unwrap(),
                ),
                length: u32::from_le_bytes(
                    <[u8; 4]>::try_from(&chunk[4..]).unwrap(),
                ),
            };
        }

        Ok(Head { version, entries })
    }
}
