pub(crate) mod decode;
pub(crate) mod loader;
pub(crate) mod source;
pub(crate) mod svg_raster;
