//! Drawing surfaces the engine renders through.

pub(crate) mod adapter;
pub(crate) mod raster;
pub(crate) mod recording;
