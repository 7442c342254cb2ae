pub mod audio;
pub mod balloons;
pub mod camera;
pub mod candle;
pub mod celebration;
pub mod confetti;
pub mod constants;
pub mod controls;
pub mod error;
pub mod guestbook;
pub mod interaction;
pub mod params;
pub mod scene;
pub mod session;
pub mod timeline;

pub use audio::*;
pub use balloons::*;
pub use camera::*;
pub use candle::*;
pub use celebration::*;
pub use confetti::*;
pub use constants::*;
pub use controls::*;
pub use error::*;
pub use interaction::*;
pub use params::*;
pub use scene::*;
pub use session::*;
pub use timeline::*;
