pub(crate) mod blend;
pub(crate) mod blur;
pub(crate) mod compose;
pub(crate) mod gradient;
pub(crate) mod penumbra;
pub(crate) mod pipeline;
pub(crate) mod project;
pub(crate) mod raster;
pub(crate) mod warp;
