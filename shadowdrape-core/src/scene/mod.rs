pub(crate) mod config;
pub(crate) mod light;
pub(crate) mod params;
pub(crate) mod transform;
