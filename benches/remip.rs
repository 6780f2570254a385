#![feature(test)]

extern crate test;

use test::Bencher;

use quake_remip::lump::Image;
use quake_remip::mip::{build_pyramid, reduce, MipConfig};
use quake_remip::QUAKE_PALETTE;

fn noise(width: u32, height: u32) -> Image {
    let mut state = 0x2545_f491u32;
    let pixels = (0..width * height)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state % 255) as u8
        })
        .collect::<Vec<u8>>();

    Image::from_pixels(width, pixels.into_boxed_slice())
}

#[cfg(test)]
mod benchmarks {

    use crate::*;

    #[bench]
    fn pyramid_128(bench: &mut Bencher) {
        let base = noise(128, 128);
        let config = MipConfig::default();

        bench.iter(|| build_pyramid(&base, &config, &QUAKE_PALETTE).unwrap());
    }

    #[bench]
    fn odd_reduce(bench: &mut Bencher) {
        let base = noise(96, 80);

        bench.iter(|| reduce(&base, 37, 23, &QUAKE_PALETTE));
    }
}
