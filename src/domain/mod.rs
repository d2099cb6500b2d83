pub mod direction;
pub mod status;
