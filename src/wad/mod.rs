mod adapter;
mod repr;

pub use adapter::Archive;
pub use repr::{Entry, Head, MAGIC};

#[cfg(test)]
mod adapter_test;
