use std::fmt::Display;
use std::fs;
use std::path::Path;
use std::process::{Command, ExitStatus};

use tempfile::TempDir;

pub fn binary_path() -> &'static str {
    env!("CARGO_BIN_EXE_goreg")
}

/// A `goreg` invocation with logging left at its default.
pub fn goreg() -> Command {
    let mut command = Command::new(binary_path());
    command.env_remove("RUST_LOG");
    command
}

pub trait CommandExt {
    /// Executes the command as a child process, waiting for it to finish and collecting all of its output.
    fn run(&mut self) -> Output;
}

/// Like [std::process::Output], with the output decoded and the arguments kept
pub struct Output {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
    pub arguments: String,
}

impl CommandExt for Command {
    fn run(&mut self) -> Output {
        let output = self.output().unwrap();

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        let arguments: Vec<String> = self
            .get_args()
            .map(|x| x.to_string_lossy().into_owned())
            .collect();
        let arguments = arguments.join(" ");

        Output { status: output.status, stdout, stderr, arguments }
    }
}

impl Display for Output {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "
success: {:?}
exit_code: {}
----- stdout -----
{}
----- stderr -----
{}
----- args -----
{}",
            self.status.success(),
            self.status.code().unwrap_or(1),
            self.stdout,
            self.stderr,
            self.arguments,
        ))
    }
}

pub fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// Module `example.com/app` where `models.User` has an `*other.Address` field.
pub fn app_module() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    write(root, "go.mod", "module example.com/app\n\ngo 1.21\n");
    write(
        root,
        "models/user.go",
        "package models\n\nimport \"example.com/app/other\"\n\ntype User struct {\n\tName string\n\tAddr *other.Address\n}\n",
    );
    write(
        root,
        "models/user_test.go",
        "package models\n\ntype Fixture struct{}\n",
    );
    dir
}
