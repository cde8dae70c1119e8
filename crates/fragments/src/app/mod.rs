//! Application layer: the fragment store and the view state machine driving it.

pub mod display;
pub mod store;
pub mod view;
