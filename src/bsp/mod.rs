mod adapter;
mod repr;

pub use adapter::Embedded;
pub use repr::{Entry, EntryOffset, Head, BSP_VERSION, ENTRY_COUNT};
