use serde_json::Value;
use std::fs;

mod common;
use common::TestEnv;

#[test]
fn trust_init_then_status_json() {
    let env = TestEnv::new();

    let init = env.run_json(&["trust", "init"]);
    assert_eq!(init["ok"], true);
    assert_eq!(init["data"], "initialized");

    let status = env.run_json(&["trust", "status"]);
    assert_eq!(status["ok"], true);
    assert!(status["data"]["trusted_key_count"].as_u64().unwrap_or(0) >= 1);
    assert_eq!(status["data"]["signature_ok"], false);
}

#[test]
fn meta_show_flattens_nested_flag_descriptions() {
    let env = TestEnv::new();
    let pkg = env.pkg_dir();

    let show = env.run_json(&["meta", "show", pkg.to_str().expect("pkg utf8")]);
    assert_eq!(show["ok"], true);
    assert_eq!(show["data"]["maintainers"][0]["email"], "alice@example.org");
    assert_eq!(show["data"]["use_flags"][0]["name"], "async");
    assert_eq!(
        show["data"]["use_flags"][1]["description"],
        "Builds manpage with app-text/ronn at install time"
    );
    assert_eq!(
        show["data"]["upstreams"][0]["remote_ids"][0]["site"],
        "github"
    );

    let maints = env.run_json(&["meta", "maintainers", pkg.to_str().expect("pkg utf8")]);
    assert_eq!(maints["data"].as_array().expect("maintainers").len(), 1);
}

#[test]
fn set_version_stamps_configured_files() {
    let env = TestEnv::new();

    let report = env.run_json_repo(&["set-version", "0.6.4"]);
    assert_eq!(report["ok"], true);
    assert_eq!(report["data"]["version"], "0.6.4");
    for entry in report["data"]["entries"].as_array().expect("entries") {
        assert_eq!(entry["status"], "stamped");
    }

    let ebump = fs::read_to_string(env.repo.join("bin/ebump")).expect("read ebump");
    assert!(ebump.contains("VERSION=\"0.6.4\""));
    let eclean = fs::read_to_string(env.repo.join("bin/eclean")).expect("read eclean");
    assert!(eclean.contains("__version__ = \"0.6.4\""));
    let man = fs::read_to_string(env.repo.join("man/ebump.1")).expect("read man page");
    assert!(man.starts_with(".TH \"EBUMP\" \"1\" \"0.6.4\""));
}

#[test]
fn set_version_of_live_tree_stamps_git() {
    let env = TestEnv::new();

    let report = env.run_json_repo(&["set-version", "9999"]);
    assert_eq!(report["data"]["version"], "git");
    let ebump = fs::read_to_string(env.repo.join("bin/ebump")).expect("read ebump");
    assert!(ebump.contains("VERSION=\"git\""));
}

#[test]
fn sdist_builds_archive_digests_and_history() {
    let env = TestEnv::new();

    let sdist = env.run_json_repo(&["sdist", "--version", "0.6.4"]);
    assert_eq!(sdist["ok"], true);
    let archive = sdist["data"]["archive"].as_str().expect("archive path");
    assert!(archive.ends_with("fixture-tools-0.6.4.tar.gz"));
    assert!(fs::metadata(archive).expect("archive exists").is_file());

    let digests = sdist["data"]["digests"].as_str().expect("digests path");
    let digests_body = fs::read_to_string(digests).expect("read digests");
    let sha256 = sdist["data"]["sha256"].as_str().expect("sha256");
    assert!(digests_body.contains(sha256));

    let history = env.run_json(&["history"]);
    let releases = history["data"].as_array().expect("history array");
    assert_eq!(releases.len(), 1);
    assert_eq!(releases[0]["version"], "0.6.4");
    assert_eq!(releases[0]["name"], "fixture-tools");
}

#[test]
fn sdist_refuses_live_tree_version() {
    let env = TestEnv::new();

    let mut cmd = env.cmd();
    let out = cmd
        .arg("--json")
        .arg("--repo")
        .arg(env.repo.to_str().expect("repo utf8"))
        .arg("sdist")
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();

    let err: Value = serde_json::from_slice(&out).expect("error json output");
    assert_eq!(err["ok"], false);
    assert_eq!(err["error"]["code"], "LIVE_VERSION");
}

#[test]
fn publish_copies_archive_to_local_destination() {
    let env = TestEnv::new();

    let _ = env.run_json_repo(&["sdist", "--version", "0.6.4"]);
    let dest = env.home.join("distfiles");

    let publish = env.run_json_repo(&[
        "publish",
        "--version",
        "0.6.4",
        "--dest",
        dest.to_str().expect("dest utf8"),
    ]);
    assert_eq!(publish["ok"], true);
    assert_eq!(publish["data"]["mechanism"], "copy");
    assert!(dest.join("fixture-tools-0.6.4.tar.gz").is_file());
    assert!(dest.join("fixture-tools-0.6.4.tar.gz.DIGESTS").is_file());
}

#[test]
fn publish_without_destination_is_a_transfer_error() {
    let env = TestEnv::new();

    let _ = env.run_json_repo(&["sdist", "--version", "0.6.4"]);
    let mut cmd = env.cmd();
    let out = cmd
        .args(["--json", "--repo", env.repo.to_str().expect("repo utf8")])
        .args(["publish", "--version", "0.6.4"])
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();

    let err: Value = serde_json::from_slice(&out).expect("error json output");
    assert_eq!(err["error"]["code"], "TRANSFER_FAILED");
}

#[test]
fn check_reports_ok_then_flags_failing_tests() {
    let env = TestEnv::new();

    let check = env.run_json_repo(&["check"]);
    assert_eq!(check["ok"], true);
    assert_eq!(check["data"]["overall"], "ok");

    let manifest = env.repo.join(".ekit/release.toml");
    let body = fs::read_to_string(&manifest).expect("read manifest");
    fs::write(&manifest, body.replace("test = [\"true\"]", "test = [\"false\"]"))
        .expect("rewrite manifest");

    let check = env.run_json_repo(&["check"]);
    assert_eq!(check["data"]["overall"], "needs_attention");
    let checks = check["data"]["checks"].as_array().expect("checks");
    assert!(checks
        .iter()
        .any(|c| c["name"] == "tests" && c["status"] == "failed"));
    let recs = check["data"]["recommendations"].as_array().expect("recs");
    assert!(recs
        .iter()
        .any(|r| r.as_str().unwrap_or("").contains("ekit test")));
}

#[test]
fn meta_validate_exits_nonzero_on_issues() {
    let env = TestEnv::new();
    let bad = env.repo.join("packages/app-misc/broken");
    fs::create_dir_all(&bad).expect("create broken pkg");
    fs::write(
        bad.join("metadata.xml"),
        r#"<pkgmetadata>
  <maintainer><name>No Mail</name></maintainer>
  <use>
    <flag name="x">one</flag>
    <flag name="x">two</flag>
  </use>
</pkgmetadata>
"#,
    )
    .expect("write broken metadata");

    let mut cmd = env.cmd();
    cmd.args(["meta", "validate", bad.to_str().expect("pkg utf8")])
        .assert()
        .failure()
        .stdout(predicates::str::contains("duplicate_flag"));

    let mut cmd = env.cmd();
    cmd.args(["meta", "validate", env.pkg_dir().to_str().expect("pkg utf8")])
        .assert()
        .success()
        .stdout(predicates::str::contains("metadata valid"));
}
