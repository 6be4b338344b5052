use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub repo: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        fs::create_dir_all(&home).expect("create isolated home");

        let repo = make_fixture_repo(tmp.path());

        Self {
            _tmp: tmp,
            home,
            repo,
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("ekit").expect("ekit binary");
        cmd.env("HOME", &self.home)
            .env_remove("VERSION")
            .env_remove("PVR");
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let mut cmd = self.cmd();
        let out = cmd
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn run_json_repo(&self, args: &[&str]) -> Value {
        let mut cmd = self.cmd();
        let out = cmd
            .arg("--json")
            .arg("--repo")
            .arg(self.repo.to_str().expect("repo path utf8"))
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn pkg_dir(&self) -> PathBuf {
        self.repo.join("packages/app-misc/hello")
    }
}

pub fn make_fixture_repo(base: &Path) -> PathBuf {
    let repo = base.join("toolkit");

    fs::create_dir_all(repo.join(".ekit")).expect("create .ekit");
    fs::create_dir_all(repo.join("bin")).expect("create bin");
    fs::create_dir_all(repo.join("man")).expect("create man");
    fs::create_dir_all(repo.join("packages/app-misc/hello")).expect("create pkg dir");

    fs::write(
        repo.join(".ekit/release.toml"),
        r#"[package]
name = "fixture-tools"
description = "Fixture toolkit collection"

[tools]
fmt = ["true"]
fmt_check = ["true"]
test = ["true"]
lint = ["true"]

[stamp]
shell_scripts = ["bin/ebump"]
script_modules = ["bin/eclean"]
man_pages = [{ path = "man/ebump.1", title = "EBUMP" }]

[sdist]
include = ["bin", "man", "packages"]
"#,
    )
    .expect("write manifest");

    fs::write(
        repo.join("bin/ebump"),
        "#!/bin/sh\nVERSION=\"git\"\necho \"ebump ${VERSION}\"\n",
    )
    .expect("write ebump");
    fs::write(
        repo.join("bin/eclean"),
        "#!/usr/bin/env python\n__version__ = \"git\"\nprint(__version__)\n",
    )
    .expect("write eclean");
    fs::write(
        repo.join("man/ebump.1"),
        ".TH \"EBUMP\" \"1\" \"git\" \"Toolkit\"\n.SH NAME\nebump \\- bump release versions\n",
    )
    .expect("write man page");

    fs::write(
        repo.join("packages/app-misc/hello/metadata.xml"),
        r#"<?xml version="1.0" encoding="UTF-8"?>
<pkgmetadata>
  <maintainer type="person">
    <email>alice@example.org</email>
    <name>Alice Example</name>
  </maintainer>
  <longdescription>
    Prints a friendly greeting.
  </longdescription>
  <use>
    <flag name="async">Enables asynchronous commands</flag>
    <flag name="man">Builds manpage with <pkg>app-text/ronn</pkg> at install time</flag>
  </use>
  <upstream>
    <maintainer status="active">
      <email>bob@example.com</email>
      <name>Bob Upstream</name>
    </maintainer>
    <changelog>https://example.com/releases.atom</changelog>
    <bugs-to>mailto:bugs@example.com</bugs-to>
    <remote-id type="github">example/hello</remote-id>
  </upstream>
</pkgmetadata>
"#,
    )
    .expect("write metadata.xml");

    repo
}
