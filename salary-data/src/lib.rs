//! CSV loaders for slab tables and batches of tax inputs.

mod decimal;
pub mod input_loader;
pub mod slab_loader;

pub use input_loader::{InputLoader, InputLoaderError};
pub use slab_loader::{SlabLoader, SlabLoaderError, TaxSlabRecord};
