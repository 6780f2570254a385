mod pyramid;
mod resample;

pub use pyramid::{build_pyramid, MipConfig};
pub use resample::reduce;

#[cfg(test)]
mod pyramid_test;

#[cfg(test)]
mod resample_test;
