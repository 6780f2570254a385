use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// File could not be opened, sought, or read
    #[error("Could not read file: {0}")]
    Unreadable(#[source] io::Error),

    /// First four bytes match neither a WAD2 archive nor a BSP
    #[error(
        "File signature {} does not match the signature for either WAD or BSP",
        signature(.0)
    )]
    UnknownSignature([u8; 4]),

    /// Counts or offsets point outside the file
    #[error("Malformed directory: {0}")]
    MalformedDirectory(String),

    /// Texture can't be halved enough times to fill every mip level
    #[error("Texture too small for mips ({width}x{height})")]
    TextureTooSmall { width: u32, height: u32 },

    /// A mip slot write did not complete.  The file may be partially updated.
    #[error("Failed to write mip data, file may be partially updated: {0}")]
    WriteFailure(#[source] io::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Classify an error that happened while reading.  Running off the end of
    /// the file means some count or offset was bad, not that the file was
    /// unreadable.
    pub fn from_read(err: io::Error) -> Error {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Error::MalformedDirectory(err.to_string())
        } else {
            Error::Unreadable(err)
        }
    }

    /// Whether processing of the current file must stop
    pub fn is_file_fatal(&self) -> bool {
        !matches!(self, Error::TextureTooSmall { .. })
    }
}

fn signature(magic: &[u8; 4]) -> String {
    format!("{:#010x}", u32::from_le_bytes(*magic))
}

pub type Result<T> = std::result::Result<T, Error>;
