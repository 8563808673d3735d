pub mod countdown;
pub mod location;
pub mod phase;
