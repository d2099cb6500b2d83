pub mod event;
pub mod snapshot;
pub mod step;
pub mod world;
