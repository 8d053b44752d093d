mod build;
mod check;
mod deploy;

pub use build::cmd_build;
pub use check::cmd_check;
pub use deploy::cmd_deploy;
