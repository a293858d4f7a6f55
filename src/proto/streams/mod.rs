pub mod state;
pub mod token;
pub mod validate;

pub use state::StreamHttpState;
