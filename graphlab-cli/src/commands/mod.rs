pub mod bench;
pub mod common;
pub mod filter;
pub mod list;
pub mod replay;
pub mod run;
