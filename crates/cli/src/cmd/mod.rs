mod build;
mod cc;
mod whichdo;

pub use build::cmd_build;
pub use cc::cmd_cc;
pub use whichdo::cmd_whichdo;
