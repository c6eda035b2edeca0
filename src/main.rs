//! Build an icon font from a codepoint table and a directory of SVG drawings.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use iconfx::{Assembler, BuildPaths, Normalizer, SystemRunner};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The codepoint table, one `NAME = 0xHHHH` per line.
    #[arg(long, default_value = "iconfx.codepoints")]
    codepoints: PathBuf,

    /// Directory holding one `<NAME>.svg` drawing per icon.
    #[arg(long, default_value = "svg")]
    svg_dir: PathBuf,

    /// Directory for normalized drawings, reused between runs.
    #[arg(long, default_value = "build")]
    build_dir: PathBuf,

    /// The font file to write; must end in `.ttf`.
    #[arg(short, long, default_value = "iconfx.ttf")]
    output: PathBuf,

    /// The Inkscape executable used to normalize drawings.
    #[arg(long, env = "INKSCAPE", default_value = iconfx::DEFAULT_PROGRAM)]
    inkscape: String,

    /// More logging; repeat for even more.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Args {
    fn log_level(&self) -> &'static str {
        match (self.quiet, self.verbose) {
            (true, _) => "error",
            (false, 0) => "info",
            (false, 1) => "debug",
            (false, _) => "trace",
        }
    }

    fn paths(&self) -> BuildPaths {
        BuildPaths {
            codepoints: self.codepoints.clone(),
            svg_dir: self.svg_dir.clone(),
            build_dir: self.build_dir.clone(),
            output: self.output.clone(),
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level()))
        .format_timestamp(None)
        .init();

    let mut assembler = Assembler::new(Normalizer::new(&args.inkscape, SystemRunner));
    match assembler.build(&args.paths()) {
        Ok(report) => {
            log::info!(
                "{} glyphs, {} drawings normalized, {} up to date",
                report.glyphs,
                report.regenerated,
                report.fresh
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", error_chain(&e));
            ExitCode::FAILURE
        }
    }
}

/// Format an error followed by each of its sources.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
