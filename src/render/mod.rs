pub(crate) mod layer;
pub(crate) mod raster;
pub(crate) mod surface;
pub(crate) mod ticker;
