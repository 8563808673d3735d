pub mod console;
pub mod events;
pub mod half;
pub mod scheduler;
pub mod state;
