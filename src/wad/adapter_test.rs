use super::Archive;
use crate::container::{Container, Kind, Location, TextureOutcome};
use crate::error::Error;
use crate::lump::kind;
use std::io::Cursor;
use std::iter::repeat;
use std::vec::Vec;

fn entry_bytes(
    offset: u32,
    length: u32,
    kind: u8,
    compression: u8,
    name: [u8; 16],
) -> Vec<u8> {
    let mut entry = Vec::new();

    entry.extend(offset.to_le_bytes());
    entry.extend(length.to_le_bytes());
    entry.extend(length.to_le_bytes());
    entry.push(kind);
    entry.push(compression);
    entry.extend([0; 2]);
    entry.extend(name);

    entry
}

fn wad_bytes() -> Vec<u8> {
    let mut wad = Vec::new();
    let lumps: [(u8, u8, &[u8; 16]); 3] = [
        (kind::PALETTE, 0, b"palette\0\0\0\0\0\0\0\0\0"),
        (kind::MIPTEX, 0, b"brick\0\0\0\0\0\0\0\0\0\0\0"),
        (kind::MIPTEX, 1, b"packed\0\0\0\0\0\0\0\0\0\0"),
    ];

    wad.extend(b"WAD2");
    wad.extend((lumps.len() as u32).to_le_bytes());
    wad.extend((12u32 + 3 * 10).to_le_bytes());
    wad.extend(repeat(0u8).take(30));

    for (idx, (lump_kind, compression, name)) in lumps.into_iter().enumerate()
    {
        wad.extend(entry_bytes(
            12 + 10 * idx as u32,
            10,
            lump_kind,
            compression,
            *name,
        ));
    }

    wad
}

#[test]
fn locate_archive_candidates() {
    let bytes = wad_bytes();
    let len = bytes.len() as u64;
    let archive = Archive::locate(&mut Cursor::new(bytes), len).unwrap();

    assert_eq!(archive.kind(), Kind::Archive);
    assert_eq!(archive.entries().len(), 3);

    let locations: Vec<_> = archive
        .candidates()
        .iter()
        .map(|candidate| candidate.location)
        .collect();

    assert_eq!(
        locations,
        [
            Location::Skip(TextureOutcome::WrongType(kind::PALETTE)),
            Location::Record { base: 22, end: 32 },
            Location::Skip(TextureOutcome::Compressed),
        ]
    );

    assert_eq!(
        archive.candidates()[1].name,
        Some(*b"brick\0\0\0\0\0\0\0\0\0\0\0")
    );
}

#[test]
fn empty_archive() {
    let mut bytes = Vec::new();
    bytes.extend(b"WAD2");
    bytes.extend(0u32.to_le_bytes());
    bytes.extend(12u32.to_le_bytes());

    let archive = Archive::locate(&mut Cursor::new(bytes), 12).unwrap();
    assert!(archive.candidates().is_empty());
}

#[test]
fn directory_past_end() {
    let mut bytes = wad_bytes();
    bytes.truncate(bytes.len() - 1);
    let len = bytes.len() as u64;

    let err = Archive::locate(&mut Cursor::new(bytes), len).unwrap_err();
    assert!(matches!(err, Error::MalformedDirectory(_)));
}

#[test]
fn absurd_entry_count() {
    let mut bytes = wad_bytes();
    bytes[4..8].copy_from_slice(&u32::MAX.to_le_bytes());
    let len = bytes.len() as u64;

    let err = Archive::locate(&mut Cursor::new(bytes), len).unwrap_err();
    assert!(matches!(err, Error::MalformedDirectory(_)));
}

#[test]
fn truncated_header() {
    let err = Archive::locate(&mut Cursor::new(b"WAD2\x01\0".to_vec()), 6)
        .unwrap_err();
    assert!(matches!(err, Error::MalformedDirectory(_)));
}
