pub mod accounts;
pub mod entries;
pub mod init;
pub mod maintenance;
pub mod misc;
pub mod recurring;
pub mod wishes;
