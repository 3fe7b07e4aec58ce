pub mod board;
pub mod status;
pub mod target;
pub mod timer;
pub mod track;
pub mod view;
