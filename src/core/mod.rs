pub mod chapter;
pub mod clock;
pub mod constants;
pub mod device;
pub mod error;
pub mod field;
pub mod keys;
pub mod note;
pub mod notify;
pub mod phase;
pub mod progress;
pub mod puzzle;
pub mod sample;
pub mod story;
pub mod trail;
pub mod wave;

pub use chapter::{ChapterConfig, ChapterMode};
pub use error::{CoreError, CoreResult};
pub use sample::{PointerSample, StrokeEvent};
pub use story::Story;
