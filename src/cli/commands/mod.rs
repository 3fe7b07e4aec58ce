pub mod backup;
pub mod board;
pub mod config;
pub mod control;
pub mod create;
pub mod db;
pub mod del;
pub mod init;
pub mod list;
pub mod log;
pub mod track;
pub mod watch;
