mod build;
mod info;
mod procs;
mod run;
mod sendboc;
mod shell;

pub use build::cmd_build;
pub use info::cmd_info;
pub use procs::cmd_procs;
pub use run::cmd_run;
pub use sendboc::cmd_sendboc;
pub use shell::cmd_shell;
