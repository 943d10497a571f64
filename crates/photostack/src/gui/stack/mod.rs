pub mod model;
pub mod motion;
pub mod photo;
pub mod scatter;
pub mod view;

pub use model::{Deck, RotateOutcome, State, scroll_direction};
pub use motion::{Motion, Timing};
pub use photo::{Photo, PhotoError, PhotoId, PhotoName};
pub use scatter::Scatter;
pub use view::draw;

pub const REFERENCE_HEIGHT: f64 = 1080.0;
pub const PERSPECTIVE: f64 = 1000.0; // distance from the viewer to the top photo
pub const PHOTO_LOAD_SIZE: i32 = 1024;
pub const SHADOW_OFFSET: f64 = 6.0;
pub const LABEL_FONT_SIZE: f64 = 16.0;
pub const HINT_FONT_SIZE: f64 = 20.0;
