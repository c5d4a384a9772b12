use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    pub fn init() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn data_dir(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    /// A `backlog` invocation rooted in this workspace, pointed at its
    /// private data directory and shielded from ambient env overrides.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("backlog").expect("binary");
        cmd.current_dir(self.dir.path());
        cmd.env_remove("BACKLOG_DATA_DIR");
        cmd.env_remove("BACKLOG_PROJECT");
        cmd.arg("--data-dir").arg(self.data_dir());
        cmd
    }

    pub fn project_file(&self, name: &str) -> PathBuf {
        self.data_dir().join(format!("{name}.json"))
    }

    pub fn read_project_file(&self, name: &str) -> String {
        fs::read_to_string(self.project_file(name)).expect("read project file")
    }

    pub fn create_project(&self, name: &str) {
        self.cmd()
            .args(["create-project", name])
            .assert()
            .success();
    }

    pub fn add_item(&self, title: &str, description: &str) -> serde_json::Value {
        let output = self
            .cmd()
            .args(["add", title, description, "--json"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&output).expect("add json")
    }
}
