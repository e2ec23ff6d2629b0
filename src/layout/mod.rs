pub mod container;
pub mod pass;
