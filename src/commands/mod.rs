pub mod chapters;
pub mod split;
