pub mod content_mode;
pub mod descriptor;
