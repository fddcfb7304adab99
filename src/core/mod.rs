pub mod backup;
pub mod clock;
pub mod entities;
pub mod log;
pub mod presence;
pub mod timeline;
pub mod timer;
