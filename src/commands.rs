//! Subcommand implementations behind the CLI.
//! 命令行子命令的实现。

pub mod init;
pub mod list;
pub mod run;
