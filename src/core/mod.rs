pub mod backup;
pub mod clock;
pub mod display;
pub mod lifecycle;
pub mod log;
pub mod projection;
pub mod remaining;
pub mod timer;
