// Dump every mip level of every texture in a WAD or BSP to PNG, next to the
// levels this crate would regenerate, for eyeballing the difference.
//
// Usage: mipdump <file.wad|file.bsp> [out-dir]

use quake_remip::container::{Container, Kind, Location};
use quake_remip::lump::{Image, TextureRecord};
use quake_remip::mip::{build_pyramid, MipConfig};
use quake_remip::{bsp, name_to_string, wad, QUAKE_PALETTE};

use std::env::args;
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Read, Seek};
use std::path::{Path, PathBuf};

use png::{ColorType, Encoder};

fn main() {
    let mut arguments = args().skip(1);

    let Some(path) = arguments.next() else {
        panic!("No arguments");
    };

    let out_dir = PathBuf::from(arguments.next().unwrap_or("dump".into()));
    create_dir_all(&out_dir).unwrap();

    let mut file = File::open(&path).expect("Could not open file");
    let length = file.metadata().unwrap().len();

    let mut magic = [0u8; 4];
    file.read_exact(&mut magic).unwrap();

    let container: Box<dyn Container> = match Kind::from_magic(magic).unwrap() {
        Kind::Archive => Box::new(wad::Archive::locate(&mut file, length).unwrap()),
        Kind::Embedded => {
            Box::new(bsp::Embedded::locate(&mut file, length).unwrap())
        }
    };

    for candidate in container.candidates() {
        if let Location::Record { base, .. } = candidate.location {
            dump_texture(&mut file, base, &out_dir);
        }
    }
}

fn dump_texture(file: &mut (impl Read + Seek), base: u64, out_dir: &Path) {
    let record = TextureRecord::read(file, base).unwrap();
    let name = name_to_string(&record.name()).into_owned();
    let config = MipConfig::default();

    if !config.fits(record.width(), record.height()) {
        eprintln!("Skipping \"{name}\", too small");
        return;
    }

    println!("Writing texture \"{name}\"...");

    for level in 0..config.levels() {
        let image = record.read_mip(file, base, level).unwrap();
        write_png(&out_dir.join(format!("{name}.{level}.png")), &image);
    }

    let mip0 = record.read_mip(file, base, 0).unwrap();
    let mips = build_pyramid(&mip0, &config, &QUAKE_PALETTE).unwrap();

    for (level, image) in config.reduced_levels().zip(&mips) {
        write_png(&out_dir.join(format!("{name}.{level}.new.png")), image);
    }
}

fn write_png(path: &Path, image: &Image) {
    let writer = BufWriter::new(File::create(path).unwrap());
    let mut encoder = Encoder::new(writer, image.width(), image.height());
    encoder.set_color(ColorType::Rgb);
    let mut writer = encoder.write_header().unwrap();
    let colors = pixels_to_colors(image.pixels());
    writer
        .write_image_data(
            &colors.iter().flatten().copied().collect::<Vec<u8>>(),
        )
        .unwrap();
    writer.finish().unwrap();
}

fn pixels_to_colors(pixels: &[u8]) -> Box<[[u8; 3]]> {
    pixels
        .iter()
        .map(|&pixel| QUAKE_PALETTE[usize::from(pixel)])
        .collect()
}
