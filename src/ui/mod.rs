pub mod panels;
pub mod tracks;
