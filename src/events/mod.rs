pub mod keyboard;
pub mod pointer;

pub use keyboard::{wire_keyboard, KeyWiring};
pub use pointer::{wire_pointer_handlers, PointerWiring, UpdateSink};
