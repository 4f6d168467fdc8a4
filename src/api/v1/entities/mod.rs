pub mod channels;
pub mod videos;

pub use channels::{Channel, NewChannel};
pub use videos::{NewVideo, Video};
