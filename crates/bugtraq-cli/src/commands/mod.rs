//! Command implementations

mod check;
mod show;

pub use check::run_check;
pub use show::run_show;
