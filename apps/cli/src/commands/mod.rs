//! Subcommand implementations. Each returns the process exit code.

mod check;
mod theme;
mod validate;

use std::process::ExitCode;

pub use check::{health, responsive};
pub use theme::theme;
pub use validate::validate;

const fn exit_code(passed: bool) -> ExitCode {
    if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
