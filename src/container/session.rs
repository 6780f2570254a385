use super::{
    Candidate, Container, Kind, Location, ProcessingReport, TextureOutcome,
    TextureReport,
};
use crate::common::{name_to_string, Palette, QUAKE_PALETTE};
use crate::error::{Error, Result};
use crate::lump::TextureRecord;
use crate::mip::{build_pyramid, MipConfig};
use crate::{bsp, wad};
use std::fs::OpenOptions;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use tracing::{debug, info, info_span, warn};

#[derive(Clone, Debug)]
pub struct Options {
    pub mip: MipConfig,
    pub palette: Palette,
    /// Generate mips without writing them back
    pub dry_run: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            mip: MipConfig::default(),
            palette: QUAKE_PALETTE,
            dry_run: false,
        }
    }
}

/// One open container file.  Mip slots are only ever overwritten in place, so
/// the length of the stream never changes.
#[derive(Debug)]
pub struct Session<S> {
    stream: S,
    length: u64,
}

impl<S: Read + Write + Seek> Session<S> {
    pub fn new(mut stream: S) -> Result<Self> {
        let length = stream.seek(SeekFrom::End(0)).map_err(Error::Unreadable)?;
        Ok(Session { stream, length })
    }

    /// Length of the underlying file in bytes
    pub fn length(&self) -> u64 {
        self.length
    }

    /// Identify the container format from the file signature
    pub fn sniff(&mut self) -> Result<Kind> {
        let mut magic = [0u8; 4];
        self.stream.rewind().map_err(Error::Unreadable)?;
        self.stream
            .read_exact(&mut magic)
            .map_err(Error::from_read)?;

        Kind::from_magic(magic)
    }

    /// Find every texture candidate using the adapter for this file's format
    pub fn locate(&mut self) -> Result<Box<dyn Container>> {
        let kind = self.sniff()?;
        debug!(%kind, length = self.length, "Locating textures");

        let container: Box<dyn Container> = match kind {
            Kind::Archive => {
                Box::new(wad::Archive::locate(&mut self.stream, self.length)?)
            }
            Kind::Embedded => Box::new(bsp::Embedded::locate(
                &mut self.stream,
                self.length,
            )?),
        };

        Ok(container)
    }

    /// Regenerate the mips of every texture in the file.  Textures that can't
    /// be processed are reported and skipped; any error aborts the file.
    pub fn process(&mut self, options: &Options) -> Result<ProcessingReport> {
        let container = self.locate()?;
        let mut report = ProcessingReport::new(container.kind());

        for (index, candidate) in container.candidates().iter().enumerate() {
            let texture = self.process_candidate(index, candidate, options)?;
            report.textures.push(texture);
        }

        Ok(report)
    }

    /// Flush pending writes and hand back the stream
    pub fn finish(mut self) -> Result<S> {
        self.stream.flush().map_err(Error::WriteFailure)?;
        Ok(self.stream)
    }

    fn process_candidate(
        &mut self,
        index: usize,
        candidate: &Candidate,
        options: &Options,
    ) -> Result<TextureReport> {
        let (base, end) = match candidate.location {
            Location::Record { base, end } => (base, end),
            Location::Skip(outcome) => {
                let name = display_name(index, candidate.name);
                warn!(texture = %name, "Skipping: {outcome}");
                return Ok(TextureReport { name, outcome });
            }
        };

        let record = TextureRecord::read(&mut self.stream, base)?;
        let name = display_name(index, candidate.name.or(Some(record.name())));
        let (width, height) = (record.width(), record.height());

        debug!(texture = %name, base, width, height, "Read texture record");

        if !options.mip.fits(width, height) {
            let outcome = TextureOutcome::TooSmall { width, height };
            warn!(texture = %name, "Skipping: {outcome}");
            return Ok(TextureReport { name, outcome });
        }

        // Validate the whole record before the first write
        record.check_bounds(base, end.min(self.length))?;

        let mip0 = record.read_mip(&mut self.stream, base, 0)?;
        let mips = build_pyramid(&mip0, &options.mip, &options.palette)?;

        if !options.dry_run {
            for (level, mip) in options.mip.reduced_levels().zip(&mips) {
                record.write_mip(&mut self.stream, base, level, mip)?;
            }
        }

        info!(texture = %name, dry_run = options.dry_run, "Generated new mips");

        Ok(TextureReport {
            name,
            outcome: TextureOutcome::Processed,
        })
    }
}

fn display_name(index: usize, name: Option<[u8; 16]>) -> String {
    match name {
        Some(name) => name_to_string(&name).into_owned(),
        None => format!("#{index}"),
    }
}

/// Regenerate the mips of every texture in an already open stream
pub fn process_stream<S: Read + Write + Seek>(
    stream: &mut S,
    options: &Options,
) -> Result<ProcessingReport> {
    let mut session = Session::new(stream)?;
    let report = session.process(options)?;
    session.finish()?;
    Ok(report)
}

/// Regenerate the mips of every texture in the WAD or BSP at `path`, patching
/// the file in place.  The file is closed on every exit path.
pub fn process_file(
    path: impl AsRef<Path>,
    options: &Options,
) -> Result<ProcessingReport> {
    let path = path.as_ref();
    let span = info_span!("remip", path = %path.display());
    let _enter = span.enter();

    let mut file = OpenOptions::new()
        .read(true)
        .write(!options.dry_run)
        .open(path)
        .map_err(Error::Unreadable)?;

    process_stream(&mut file, options)
}
