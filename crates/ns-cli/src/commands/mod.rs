pub mod export;
pub mod init;
pub mod query;
pub mod tx;
