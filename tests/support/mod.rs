// The library only builds for wasm32, so host tests compile the pure core
// sources directly inside a mirrored module tree.
#![allow(dead_code)]

pub mod core {
    pub mod constants {
        include!("../../src/core/constants.rs");
    }
    pub mod error {
        include!("../../src/core/error.rs");
    }
    pub mod sample {
        include!("../../src/core/sample.rs");
    }
    pub mod progress {
        include!("../../src/core/progress.rs");
    }
    pub mod trail {
        include!("../../src/core/trail.rs");
    }
    pub mod clock {
        include!("../../src/core/clock.rs");
    }
    pub mod field {
        include!("../../src/core/field.rs");
    }
    pub mod wave {
        include!("../../src/core/wave.rs");
    }
    pub mod phase {
        include!("../../src/core/phase.rs");
    }
    pub mod puzzle {
        include!("../../src/core/puzzle.rs");
    }
    pub mod notify {
        include!("../../src/core/notify.rs");
    }
    pub mod chapter {
        include!("../../src/core/chapter.rs");
    }
    pub mod device {
        include!("../../src/core/device.rs");
    }
    pub mod keys {
        include!("../../src/core/keys.rs");
    }
    pub mod note {
        include!("../../src/core/note.rs");
    }
    pub mod story {
        include!("../../src/core/story.rs");
    }
}
