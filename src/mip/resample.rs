use crate::common::{nearest_index, Palette, TRANSPARENT_INDEX};
use crate::lump::Image;

/// Shrink a paletted image to `dst_width` x `dst_height` with bilinear
/// filtering, quantizing every blended color back into `palette`.
///
/// Each destination pixel samples the four source pixels around its scaled
/// position.  The right/bottom neighbors are clamped to the last column/row.
/// If any of the four is [`TRANSPARENT_INDEX`] the destination pixel is
/// transparent as well, so see-through texels never bleed into visible ones.
///
/// Panics if either destination dimension is zero or larger than the source.
pub fn reduce(
    src: &Image,
    dst_width: u32,
    dst_height: u32,
    palette: &Palette,
) -> Image {
    let (src_width, src_height) = (src.width(), src.height());

    assert!(
        (1..=src_width).contains(&dst_width)
            && (1..=src_height).contains(&dst_height),
        "Cannot reduce {src_width}x{src_height} to {dst_width}x{dst_height}"
    );

    let pixels = src.pixels();
    let stride = src_width as usize;
    let x_scale = src_width as f32 / dst_width as f32;
    let y_scale = src_height as f32 / dst_height as f32;
    let mut out = Vec::with_capacity(dst_width as usize * dst_height as usize);

    for y in 0..dst_height {
        let src_y = y as f32 * y_scale;
        let y_low = (src_y as u32).min(src_height - 1);
        let y_high = (y_low + 1).min(src_height - 1);
        let beta = src_y - y_low as f32;
        let row_low = &pixels[y_low as usize * stride..][..stride];
        let row_high = &pixels[y_high as usize * stride..][..stride];

        for x in 0..dst_width {
            let src_x = x as f32 * x_scale;
            let x_low = (src_x as u32).min(src_width - 1);
            let x_high = (x_low + 1).min(src_width - 1);
            let alpha = src_x - x_low as f32;

            let corners = [
                row_low[x_low as usize],
                row_low[x_high as usize],
                row_high[x_low as usize],
                row_high[x_high as usize],
            ];

            out.push(blend4(alpha, beta, corners, palette));
        }
    }

    Image::from_pixels(dst_width, out.into_boxed_slice())
}

// Corners are top-left, top-right, bottom-left, bottom-right
fn blend4(alpha: f32, beta: f32, corners: [u8; 4], palette: &Palette) -> u8 {
    if corners.contains(&TRANSPARENT_INDEX) {
        return TRANSPARENT_INDEX;
    }

    let [a, b, c, d] = corners.map(|idx| palette[usize::from(idx)]);

    // Weights sum to one, skip the float round trip
    if a == b && b == c && c == d {
        let [red, green, blue] = a;
        return nearest_index(palette, red.into(), green.into(), blue.into());
    }

    let alpha = f64::from(alpha);
    let beta = f64::from(beta);
    let weights = [
        (1.0 - alpha) * (1.0 - beta),
        alpha * (1.0 - beta),
        (1.0 - alpha) * beta,
        alpha * beta,
    ];

    let mut rgb = [0i32; 3];

    for (channel, value) in rgb.iter_mut().enumerate() {
        let blended = weights[0] * f64::from(a[channel])
            + weights[1] * f64::from(b[channel])
            + weights[2] * f64::from(c[channel])
            + weights[3] * f64::from(d[channel]);

        // truncate, not round
        *value = blended as i32;
    }

    nearest_index(palette, rgb[0], rgb[1], rgb[2])
}
