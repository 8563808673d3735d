pub mod countdown;
pub mod sky;
pub mod status;
