pub mod controller;
pub mod runner;

pub use controller::SessionController;
pub use runner::{run_session, DetectionFrame, FrameSource, SessionReport};
