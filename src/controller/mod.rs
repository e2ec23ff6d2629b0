pub mod parallax;
pub mod snap;
