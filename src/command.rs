//! Running external programs.
//!
//! The only program we run is the vector-graphics tool that normalizes icon
//! drawings. Invocation goes through [`CommandRunner`] so that callers (and
//! tests) can substitute their own implementation.

use std::ffi::OsString;
use std::process::{Command, Output};

/// A blocking external command: arguments in, exit status and output out.
pub trait CommandRunner {
    /// Run `program` with `args`, blocking until it exits.
    ///
    /// An `Err` means the program could not be run at all; a program that
    /// runs and fails is reported through the returned [`Output`]'s status.
    fn run(&mut self, program: &str, args: &[OsString]) -> std::io::Result<Output>;
}

/// Runs commands as child processes of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, program: &str, args: &[OsString]) -> std::io::Result<Output> {
        log::trace!("running {program} {args:?}");
        Command::new(program).args(args).output()
    }
}

impl<R: CommandRunner + ?Sized> CommandRunner for &mut R {
    fn run(&mut self, program: &str, args: &[OsString]) -> std::io::Result<Output> {
        (**self).run(program, args)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn system_runner_reports_status() {
        let mut runner = SystemRunner;
        let ok = runner.run("sh", &["-c".into(), "printf hi".into()]).unwrap();
        assert!(ok.status.success());
        assert_eq!(ok.stdout, b"hi");

        let failed = runner.run("sh", &["-c".into(), "echo oops >&2; exit 3".into()]).unwrap();
        assert_eq!(failed.status.code(), Some(3));
        assert_eq!(failed.stderr, b"oops\n");
    }

    #[test]
    fn missing_program() {
        let err = SystemRunner.run("iconfx-definitely-not-a-program", &[]).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
