//! Building whole icon fonts, with the external tool replaced by a copy.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Output};
use std::time::{Duration, SystemTime};

use iconfx::{Assembler, BuildPaths, BuildReport, CodepointTable, CommandRunner, Error, Normalizer};
use pretty_assertions::assert_eq;
use read_fonts::types::GlyphId;
use read_fonts::{FontRef, TableProvider};

/// "Normalizes" a drawing by copying it to the `-o` argument.
#[derive(Debug, Default)]
struct CopyRunner {
    calls: Vec<Vec<OsString>>,
}

impl CommandRunner for CopyRunner {
    fn run(&mut self, _program: &str, args: &[OsString]) -> std::io::Result<Output> {
        self.calls.push(args.to_vec());
        let out = args.iter().position(|arg| arg == "-o").unwrap() + 1;
        fs::copy(&args[0], &args[out])?;
        Ok(Output { status: ExitStatus::default(), stdout: Vec::new(), stderr: Vec::new() })
    }
}

struct Project {
    dir: tempfile::TempDir,
}

impl Project {
    /// A project with the sample drawings for `names` in `svg/`.
    fn new(names: &[&str]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("svg")).unwrap();
        for name in names {
            let file = format!("{name}.svg");
            fs::copy(Path::new("testdata/icons").join(&file), dir.path().join("svg").join(&file))
                .unwrap();
        }
        Project { dir }
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    fn assemble(
        &self,
        table: &str,
        output: &str,
        runner: &mut CopyRunner,
    ) -> Result<BuildReport, Error> {
        let table: CodepointTable = table.parse().unwrap();
        Assembler::new(Normalizer::new("inkscape", runner)).assemble(
            &table,
            &self.path("svg"),
            &self.path("build"),
            &self.path(output),
        )
    }

    fn build_dir_contents(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.path("build"))
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

const AB: &str = "A = 0xE001\nB = 0xE002\n";

#[test]
fn builds_font_from_table() {
    let project = Project::new(&["A", "B"]);
    let mut runner = CopyRunner::default();
    let report = project.assemble(AB, "iconfx.ttf", &mut runner).unwrap();

    assert_eq!(report, BuildReport { glyphs: 2, regenerated: 2, fresh: 0 });
    assert_eq!(runner.calls.len(), 2);
    assert_eq!(runner.calls[0][0], project.path("svg/A.svg").into_os_string());
    assert_eq!(project.build_dir_contents(), ["A.svg", "B.svg"]);

    let data = fs::read(project.path("iconfx.ttf")).unwrap();
    let font = FontRef::new(&data).unwrap();
    assert_eq!(font.maxp().unwrap().num_glyphs(), 3);
    let cmap = font.cmap().unwrap();
    assert_eq!(cmap.map_codepoint(0xE001u32), Some(GlyphId::new(1)));
    assert_eq!(cmap.map_codepoint(0xE002u32), Some(GlyphId::new(2)));
    let advances: Vec<u16> = font.hmtx().unwrap().h_metrics().iter().map(|m| m.advance()).collect();
    assert_eq!(advances, [500, 1000, 1000]);
}

#[test]
fn rerun_reuses_normalized_drawings() {
    let project = Project::new(&["A", "B"]);
    project.assemble(AB, "iconfx.ttf", &mut CopyRunner::default()).unwrap();
    let first = fs::read(project.path("iconfx.ttf")).unwrap();

    let mut runner = CopyRunner::default();
    let report = project.assemble(AB, "iconfx.ttf", &mut runner).unwrap();
    assert!(runner.calls.is_empty());
    assert_eq!(report, BuildReport { glyphs: 2, regenerated: 0, fresh: 2 });
    assert_eq!(fs::read(project.path("iconfx.ttf")).unwrap(), first);
}

#[test]
fn edited_drawing_is_normalized_again() {
    let project = Project::new(&["A", "B"]);
    project.assemble(AB, "iconfx.ttf", &mut CopyRunner::default()).unwrap();

    let an_hour_ago = SystemTime::now() - Duration::from_secs(3600);
    for name in ["build/A.svg", "build/B.svg"] {
        let file = fs::File::options().write(true).open(project.path(name)).unwrap();
        file.set_modified(an_hour_ago).unwrap();
    }
    let source = fs::File::options().write(true).open(project.path("svg/B.svg")).unwrap();
    source.set_modified(SystemTime::now()).unwrap();
    let a = fs::File::options().write(true).open(project.path("svg/A.svg")).unwrap();
    a.set_modified(an_hour_ago - Duration::from_secs(60)).unwrap();

    let mut runner = CopyRunner::default();
    let report = project.assemble(AB, "iconfx.ttf", &mut runner).unwrap();
    assert_eq!(report, BuildReport { glyphs: 2, regenerated: 1, fresh: 1 });
    assert_eq!(runner.calls[0][0], project.path("svg/B.svg").into_os_string());
}

#[test]
fn missing_drawing_aborts_without_output() {
    let tables = [
        "foo = 0xE000\nA = 0xE001\nB = 0xE002\n",
        "A = 0xE001\nfoo = 0xE000\nB = 0xE002\n",
        "A = 0xE001\nB = 0xE002\nfoo = 0xE000\n",
    ];
    for table in tables {
        let project = Project::new(&["A", "B"]);
        let err = project.assemble(table, "iconfx.ttf", &mut CopyRunner::default()).unwrap_err();
        match &err {
            Error::MissingSource(path) => assert_eq!(path, &project.path("svg/foo.svg")),
            other => panic!("unexpected error {other:?}"),
        }
        assert!(err.to_string().contains("foo.svg"));
        assert!(!project.path("iconfx.ttf").exists());
    }
}

#[test]
fn failed_build_keeps_previous_output() {
    let project = Project::new(&["A", "B"]);
    project.assemble(AB, "iconfx.ttf", &mut CopyRunner::default()).unwrap();
    let before = fs::read(project.path("iconfx.ttf")).unwrap();

    let table = "A = 0xE001\nB = 0xE002\nfoo = 0xE003\n";
    assert!(project.assemble(table, "iconfx.ttf", &mut CopyRunner::default()).is_err());
    assert_eq!(fs::read(project.path("iconfx.ttf")).unwrap(), before);
}

#[test]
fn unsupported_format_fails_before_any_work() {
    let project = Project::new(&["A", "B"]);
    let mut runner = CopyRunner::default();
    let err = project.assemble(AB, "iconfx.woff2", &mut runner).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat(_)));
    assert!(runner.calls.is_empty());
    assert!(!project.path("build").exists());
}

#[test]
fn unreadable_artifact_names_the_glyph() {
    let project = Project::new(&["A"]);
    fs::write(project.path("svg/B.svg"), "<html>not a drawing</html>").unwrap();
    let err = project.assemble(AB, "iconfx.ttf", &mut CopyRunner::default()).unwrap_err();
    match err {
        Error::GlyphImport { name, path, .. } => {
            assert_eq!(name, "B");
            assert_eq!(path, project.path("build/B.svg"));
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert!(!project.path("iconfx.ttf").exists());
    // the artifact produced before the failure is kept
    assert!(project.path("build/A.svg").exists());
}

#[cfg(unix)]
#[test]
fn tool_failure_aborts() {
    use std::os::unix::process::ExitStatusExt;

    struct Broken;
    impl CommandRunner for Broken {
        fn run(&mut self, _program: &str, _args: &[OsString]) -> std::io::Result<Output> {
            Ok(Output {
                status: ExitStatus::from_raw(1 << 8),
                stdout: Vec::new(),
                stderr: b"unknown action".to_vec(),
            })
        }
    }

    let project = Project::new(&["A", "B"]);
    let table: CodepointTable = AB.parse().unwrap();
    let err = Assembler::new(Normalizer::new("inkscape", Broken))
        .assemble(&table, &project.path("svg"), &project.path("build"), &project.path("out.ttf"))
        .unwrap_err();
    assert!(matches!(err, Error::ExternalTool(_)));
    assert!(err.to_string().contains("unknown action"));
    assert!(!project.path("out.ttf").exists());
}

#[test]
fn build_loads_the_table() {
    let project = Project::new(&["A", "B"]);
    fs::write(project.path("icons.codepoints"), "# icons\nA = 0xE001\nB = 0xE002\n").unwrap();
    let paths = BuildPaths {
        codepoints: project.path("icons.codepoints"),
        svg_dir: project.path("svg"),
        build_dir: project.path("build"),
        output: project.path("icons.ttf"),
    };
    let mut runner = CopyRunner::default();
    let report = Assembler::new(Normalizer::new("inkscape", &mut runner)).build(&paths).unwrap();
    assert_eq!(report.glyphs, 2);
    assert!(paths.output.exists());

    fs::write(&paths.codepoints, "A = 0xE001\nB: 0xE002\n").unwrap();
    let err = Assembler::new(Normalizer::new("inkscape", &mut runner)).build(&paths).unwrap_err();
    assert!(matches!(err, Error::LoadCodepoints { .. }));
    let cause = std::error::Error::source(&err).unwrap().to_string();
    assert_eq!(cause, "can't parse line 2: 'B: 0xE002'");
}
