use super::{build_pyramid, reduce, MipConfig};
use crate::common::QUAKE_PALETTE;
use crate::error::Error;
use crate::lump::Image;

fn checkerboard(width: u32, height: u32) -> Image {
    let pixels = (0..height)
        .flat_map(|y| (0..width).map(move |x| if (x + y) % 2 == 0 { 4 } else { 12 }))
        .collect::<Vec<u8>>();

    Image::from_pixels(width, pixels.into_boxed_slice())
}

#[test]
fn default_config_has_four_levels() {
    let config = MipConfig::default();
    assert_eq!(config.levels(), 4);
    assert_eq!(config.reduced_levels(), 1..4);
}

#[test]
fn config_level_bounds() {
    assert!(matches!(MipConfig::new(1), Err(Error::InvalidConfig(_))));
    assert!(matches!(MipConfig::new(5), Err(Error::InvalidConfig(_))));
    assert_eq!(MipConfig::new(2).unwrap().reduced_levels(), 1..2);
}

#[test]
fn pyramid_level_sizes() {
    let base = checkerboard(64, 32);
    let levels =
        build_pyramid(&base, &MipConfig::default(), &QUAKE_PALETTE).unwrap();

    let sizes: Vec<_> = levels
        .iter()
        .map(|mip| (mip.width(), mip.height(), mip.pixels().len()))
        .collect();

    assert_eq!(sizes, [(32, 16, 512), (16, 8, 128), (8, 4, 32)]);
}

#[test]
fn every_level_comes_from_base() {
    let base = checkerboard(24, 16);
    let levels =
        build_pyramid(&base, &MipConfig::default(), &QUAKE_PALETTE).unwrap();

    for (idx, mip) in levels.iter().enumerate() {
        let shift = idx + 1;
        let direct = reduce(&base, 24 >> shift, 16 >> shift, &QUAKE_PALETTE);
        assert_eq!(mip, &direct);
    }
}

#[test]
fn fewer_levels() {
    let base = checkerboard(16, 16);
    let config = MipConfig::new(2).unwrap();
    let levels = build_pyramid(&base, &config, &QUAKE_PALETTE).unwrap();
    assert_eq!(levels.len(), 1);
    assert_eq!(levels[0].width(), 8);
}

#[test]
fn smallest_texture() {
    let base = checkerboard(8, 8);
    let levels =
        build_pyramid(&base, &MipConfig::default(), &QUAKE_PALETTE).unwrap();
    assert_eq!(levels[2].pixels().len(), 1);
}

#[test]
fn too_narrow_texture() {
    let base = checkerboard(4, 64);
    let err = build_pyramid(&base, &MipConfig::default(), &QUAKE_PALETTE)
        .unwrap_err();

    assert!(matches!(
        err,
        Error::TextureTooSmall {
            width: 4,
            height: 64
        }
    ));
    assert!(!err.is_file_fatal());
}

#[test]
fn too_short_texture_fits_fewer_levels() {
    let base = checkerboard(64, 4);
    let config = MipConfig::new(3).unwrap();
    assert!(build_pyramid(&base, &MipConfig::default(), &QUAKE_PALETTE).is_err());
    assert_eq!(
        build_pyramid(&base, &config, &QUAKE_PALETTE).unwrap()[1].height(),
        1
    );
}
