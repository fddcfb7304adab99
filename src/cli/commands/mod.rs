pub mod backup;
pub mod config;
pub mod db;
pub mod export;
pub mod init;
pub mod log;
pub mod report;
pub mod task;
pub mod timer;
pub mod user;
