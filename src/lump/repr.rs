use crate::common::name_to_string;
use crate::error::{Error, Result};
use std::io::{Read, Seek, SeekFrom, Write};
use std::mem::size_of;

/// Rectangle of palette indices, row-major, top to bottom
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Box<[u8]>,
}

impl Image {
    pub fn from_pixels(width: u32, pixels: Box<[u8]>) -> Self {
        let pixel_ct: u32 = pixels.len().try_into().expect("Too many pixels");

        if pixel_ct % width != 0 {
            panic!("Pixel count != width * height");
        }

        Image {
            width,
            height: pixel_ct / width,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels[..]
    }
}

/// Header of a mip texture, shared by WAD2 miptex lumps and the BSP texture
/// lump.  Mip offsets are relative to the start of the record.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(C, packed)]
pub struct TextureRecord {
    name: [u8; 16],
    width: u32,
    height: u32,
    offsets: [u32; 4],
}

impl TextureRecord {
    pub const MIP_COUNT: usize = 4;

    pub fn new(
        name: [u8; 16],
        width: u32,
        height: u32,
        offsets: [u32; Self::MIP_COUNT],
    ) -> Self {
        TextureRecord {
            name,
            width,
            height,
            offsets,
        }
    }

    /// Read a record located at absolute position `base`
    pub fn read(cursor: &mut (impl Read + Seek), base: u64) -> Result<Self> {
        let mut bytes = [0u8; size_of::<TextureRecord>()];

        cursor
            .seek(SeekFrom::Start(base))
            .map_err(Error::from_read)?;
        cursor.read_exact(&mut bytes).map_err(Error::from_read)?;

        Ok(bytes.into())
    }

    /// Name in raw bytes, not necessarily null-terminated
    pub fn name(&self) -> [u8; 16] {
        self.name
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn offsets(&self) -> [u32; Self::MIP_COUNT] {
        self.offsets
    }

    /// Byte length of mip slot `level`
    pub fn mip_length(&self, level: usize) -> u64 {
        u64::from(self.width >> level) * u64::from(self.height >> level)
    }

    /// Absolute position of mip slot `level` for a record at `base`
    pub fn mip_position(&self, base: u64, level: usize) -> Result<u64> {
        let offsets = self.offsets;

        base.checked_add(offsets[level].into()).ok_or_else(|| {
            Error::MalformedDirectory(format!("Bad offset for mip {level}"))
        })
    }

    /// Verify that the record at `base` and its mip slots fit inside the
    /// region ending at `region_end`.  Slots must follow the header in
    /// order without overlapping, so writing any of them can't clobber the
    /// header, another slot, or data outside the record.
    pub fn check_bounds(&self, base: u64, region_end: u64) -> Result<()> {
        let name = self.name;
        let malformed = |what: String| {
            Error::MalformedDirectory(format!(
                "{what} in texture `{}`",
                name_to_string(&name)
            ))
        };

        let head_len = size_of::<TextureRecord>() as u64;

        if base.saturating_add(head_len) > region_end {
            return Err(malformed(format!(
                "Header at {base} extends past end of region"
            )));
        }

        // Everything before this relative offset is already spoken for
        let mut claimed = head_len;

        for level in 0..Self::MIP_COUNT {
            let offsets = self.offsets;
            let start = u64::from(offsets[level]);

            if start < claimed {
                return Err(malformed(format!(
                    "Mip {level} at offset {start} overlaps preceding data"
                )));
            }

            claimed = start
                .checked_add(self.mip_length(level))
                .ok_or_else(|| malformed(format!("Mip {level} too large")))?;

            if base.saturating_add(claimed) > region_end {
                return Err(malformed(format!(
                    "Mip {level} extends past end of region"
                )));
            }
        }

        Ok(())
    }

    /// Read the pixels of mip slot `level`
    pub fn read_mip(
        &self,
        cursor: &mut (impl Read + Seek),
        base: u64,
        level: usize,
    ) -> Result<Image> {
        let length = usize::try_from(self.mip_length(level)).map_err(|_| {
            Error::MalformedDirectory("Texture too large".to_string())
        })?;

        let mut pixels = vec![0u8; length].into_boxed_slice();

        cursor
            .seek(SeekFrom::Start(self.mip_position(base, level)?))
            .map_err(Error::from_read)?;
        cursor.read_exact(&mut pixels).map_err(Error::from_read)?;

        Ok(Image::from_pixels(self.width >> level, pixels))
    }

    /// Overwrite mip slot `level` in place.  Writes exactly the slot's
    /// length, so `image` must have the slot's dimensions.
    pub fn write_mip(
        &self,
        cursor: &mut (impl Write + Seek),
        base: u64,
        level: usize,
        image: &Image,
    ) -> Result<()> {
        assert_eq!(
            image.pixels().len() as u64,
            self.mip_length(level),
            "Mip {level} has the wrong dimensions"
        );

        cursor
            .seek(SeekFrom::Start(self.mip_position(base, level)?))
            .map_err(Error::WriteFailure)?;
        cursor
            .write_all(image.pixels())
            .map_err(Error::WriteFailure)?;

        Ok(())
    }
}

impl From<[u8; size_of::<TextureRecord>()]> for TextureRecord {
    fn from(bytes: [u8; size_of::<TextureRecord>()]) -> Self {
        let (name, rest) = bytes.split_at(16);
        let mut words = rest
            .chunks_exact(4)
            .map(|chunk| u32::from_le_bytes(chunk.try_into().unwrap()));

        let name = <[u8; 16]>::try_from(name).unwrap();
        let width = words.next().unwrap();
        let height = words.next().unwrap();
        let offsets = [(); TextureRecord::MIP_COUNT]
            .map(|_| words.next().unwrap());

        TextureRecord::new(name, width, height, offsets)
    }
}
