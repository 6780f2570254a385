use super::reduce;
use crate::common::{nearest_index, Palette, QUAKE_PALETTE, TRANSPARENT_INDEX};
use crate::lump::Image;
use proptest::prelude::*;
use std::vec::Vec;

fn image(width: u32, pixels: &[u8]) -> Image {
    Image::from_pixels(width, pixels.into())
}

// Red ramp at 1..=3, everything else green
fn ramp_palette() -> Palette {
    let mut palette = [[0u8, 255, 0]; 256];
    palette[1] = [100, 0, 0];
    palette[2] = [200, 0, 0];
    palette[3] = [150, 0, 0];
    palette
}

#[test]
fn output_has_requested_dimensions() {
    let src = image(64, &[7u8; 64 * 32]);
    let dst = reduce(&src, 20, 7, &QUAKE_PALETTE);
    assert_eq!(dst.width(), 20);
    assert_eq!(dst.height(), 7);
    assert_eq!(dst.pixels().len(), 140);
}

#[test]
fn halving_samples_even_texels() {
    #[rustfmt::skip]
    let src = image(4, &[
        1, 2, 3, 4,
        5, 6, 7, 8,
        9, 10, 11, 12,
        13, 14, 15, 1,
    ]);

    let dst = reduce(&src, 2, 2, &QUAKE_PALETTE);
    assert_eq!(dst.pixels(), &[1, 3, 9, 11]);
}

#[test]
fn fractional_position_blends_neighbors() {
    let src = image(3, &[1, 1, 2]);
    let dst = reduce(&src, 2, 1, &ramp_palette());
    assert_eq!(dst.pixels(), &[1, 3]);
}

#[test]
fn last_column_clamps_to_edge() {
    let src = image(3, &[1, 2, 3]);
    let dst = reduce(&src, 3, 1, &ramp_palette());
    assert_eq!(dst.pixels(), &[1, 2, 3]);
}

#[test]
fn last_row_clamps_to_edge() {
    let src = image(1, &[3, 2, 1]);
    let dst = reduce(&src, 1, 3, &ramp_palette());
    assert_eq!(dst.pixels(), &[3, 2, 1]);
}

#[test]
fn transparent_neighbor_is_contagious() {
    #[rustfmt::skip]
    let src = image(4, &[
        1, 1, 1, 1,
        1, 255, 1, 1,
        1, 1, 1, 1,
        1, 1, 1, 1,
    ]);

    // (1, 1) carries zero weight for (0, 0) but is still one of its samples
    let dst = reduce(&src, 2, 2, &QUAKE_PALETTE);
    assert_eq!(dst.pixels(), &[TRANSPARENT_INDEX, 1, 1, 1]);
}

#[test]
#[should_panic]
fn zero_width_destination() {
    let src = image(8, &[0u8; 64]);
    reduce(&src, 0, 4, &QUAKE_PALETTE);
}

#[test]
#[should_panic]
fn enlarging_is_rejected() {
    let src = image(8, &[0u8; 64]);
    reduce(&src, 16, 4, &QUAKE_PALETTE);
}

// Source texels sampled for destination pixel (x, y)
fn footprint(
    (src_w, src_h): (u32, u32),
    (dst_w, dst_h): (u32, u32),
    (x, y): (u32, u32),
) -> [(u32, u32); 4] {
    let src_x = x as f32 * (src_w as f32 / dst_w as f32);
    let src_y = y as f32 * (src_h as f32 / dst_h as f32);
    let x_low = (src_x as u32).min(src_w - 1);
    let y_low = (src_y as u32).min(src_h - 1);
    let x_high = (x_low + 1).min(src_w - 1);
    let y_high = (y_low + 1).min(src_h - 1);
    [(x_low, y_low), (x_high, y_low), (x_low, y_high), (x_high, y_high)]
}

fn sized_image() -> impl Strategy<Value = (u32, u32, Vec<u8>)> {
    (1u32..=24, 1u32..=24).prop_flat_map(|(w, h)| {
        let len = (w * h) as usize;
        (Just(w), Just(h), prop::collection::vec(any::<u8>(), len))
    })
}

fn reduction() -> impl Strategy<Value = (u32, u32, Vec<u8>, u32, u32)> {
    sized_image().prop_flat_map(|(w, h, pixels)| {
        (Just(w), Just(h), Just(pixels), 1..=w, 1..=h)
    })
}

proptest! {
    #[test]
    fn reduction_is_deterministic((w, h, pixels, dw, dh) in reduction()) {
        let src = Image::from_pixels(w, pixels.into());
        let first = reduce(&src, dw, dh, &QUAKE_PALETTE);
        let second = reduce(&src, dw, dh, &QUAKE_PALETTE);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn reduction_has_exact_size((w, h, pixels, dw, dh) in reduction()) {
        let src = Image::from_pixels(w, pixels.into());
        let dst = reduce(&src, dw, dh, &QUAKE_PALETTE);
        prop_assert_eq!(dst.pixels().len(), (dw * dh) as usize);
    }

    #[test]
    fn transparency_always_wins((w, h, pixels, dw, dh) in reduction()) {
        let src = Image::from_pixels(w, pixels.into());
        let dst = reduce(&src, dw, dh, &QUAKE_PALETTE);

        for y in 0..dh {
            for x in 0..dw {
                let sampled = footprint((w, h), (dw, dh), (x, y))
                    .iter()
                    .any(|&(sx, sy)| {
                        src.pixels()[(sy * w + sx) as usize] == TRANSPARENT_INDEX
                    });

                if sampled {
                    prop_assert_eq!(
                        dst.pixels()[(y * dw + x) as usize],
                        TRANSPARENT_INDEX
                    );
                }
            }
        }
    }

    #[test]
    fn uniform_image_stays_uniform(
        color in 0u8..TRANSPARENT_INDEX,
        (w, h, dw, dh) in (1u32..=40, 1u32..=40)
            .prop_flat_map(|(w, h)| (Just(w), Just(h), 1..=w, 1..=h)),
    ) {
        let src = Image::from_pixels(w, vec![color; (w * h) as usize].into());
        let dst = reduce(&src, dw, dh, &QUAKE_PALETTE);
        let [r, g, b] = QUAKE_PALETTE[usize::from(color)];
        let expected = nearest_index(&QUAKE_PALETTE, r.into(), g.into(), b.into());
        prop_assert!(dst.pixels().iter().all(|&px| px == expected));
    }
}
