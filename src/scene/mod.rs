pub mod loader;
pub(crate) mod model;
