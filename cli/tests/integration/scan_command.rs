//! End-to-end scans against fake `oc` and postsubmit scripts.
//!
//! Each test writes shell stand-ins for the collaborators into a
//! `tempfile::TempDir` and points the binary at them.

#![allow(clippy::expect_used)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use chrono::{TimeDelta, Utc};
use predicates::prelude::*;
use tempfile::TempDir;

const RELEASE: &str = "quay.io/okd/scos-release:4.15.0-0.okd-scos-2024-01-18-223523";
const CONSOLE_URL: &str = "https://github.com/openshift/console";
const MARKER_OUTPUT: &str = " ❌ Failed to retrieve base SHA for branch master";

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("tempdir"),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write(&self, name: &str, content: &str) {
        std::fs::write(self.path(name), content).expect("write fixture");
    }

    fn write_executable(&self, name: &str, content: &str) {
        self.write(name, content);
        std::fs::set_permissions(self.path(name), std::fs::Permissions::from_mode(0o755))
            .expect("chmod");
    }

    /// Fake `oc`: release info from `release.json`, component `<c>` resolves
    /// to `registry/<c>`, image info from `image-<c>.json` when present.
    fn install_oc(&self, release_json: Option<&str>) {
        if let Some(json) = release_json {
            self.write("release.json", json);
        }
        let dir = self.dir.path().display();
        self.write_executable(
            "oc",
            &format!(
                r#"#!/bin/sh
if [ "$1 $2 $3" = "adm release info" ]; then
  case "$5" in
    -o)
      [ -f "{dir}/release.json" ] || {{ echo "error: unable to read image {RELEASE}: unauthorized" >&2; exit 1; }}
      cat "{dir}/release.json" ;;
    --image-for=*)
      echo "registry/${{5#--image-for=}}" ;;
  esac
  exit 0
fi
if [ "$1 $2" = "image info" ]; then
  name="${{3#registry/}}"
  [ -f "{dir}/image-$name.json" ] || {{ echo "error: manifest unknown" >&2; exit 1; }}
  cat "{dir}/image-$name.json"
  exit 0
fi
echo "unexpected: $*" >&2
exit 1
"#
            ),
        );
    }

    /// Fake postsubmit script: logs `<url> <branch>` and fails `master` with
    /// the base-SHA marker.
    fn install_trigger(&self) {
        let log = self.path("trigger.log");
        self.write_executable(
            "postsubmit.sh",
            &format!(
                r#"#!/bin/sh
echo "$1 $2" >> "{log}"
if [ "$2" = "master" ]; then
  echo "Resolving $2"
  echo "{MARKER_OUTPUT}" >&2
  exit 1
fi
echo "Triggered $1 $2"
"#,
                log = log.display()
            ),
        );
    }

    fn image(&self, component: &str, age: TimeDelta, vcs_url: &str, commit_ref: &str) {
        let created = (Utc::now() - age).to_rfc3339();
        self.write(
            &format!("image-{component}.json"),
            &serde_json::json!({
                "config": {
                    "history": [ { "created": created }, { "created": "" } ],
                    "container_config": {
                        "Labels": {
                            "vcs-url": vcs_url,
                            "io.openshift.build.commit.ref": commit_ref
                        }
                    }
                }
            })
            .to_string(),
        );
    }

    fn trigger_log(&self) -> String {
        std::fs::read_to_string(self.path("trigger.log")).unwrap_or_default()
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("release-rebuild"));
        cmd.env("NO_COLOR", "1")
            .env("RELEASE_REBUILD_CONFIG", self.path("config.yaml"))
            .env_remove("RELEASE_REBUILD_OC")
            .env_remove("RELEASE_REBUILD_TRIGGER_SCRIPT")
            .args(["--oc", &path_str(&self.path("oc"))])
            .args(["--trigger-script", &path_str(&self.path("postsubmit.sh"))])
            .args(["--trigger-delay", "0"]);
        cmd
    }
}

fn path_str(path: &Path) -> String {
    path.display().to_string()
}

fn release_json(components: &[&str]) -> String {
    let tags: Vec<_> = components
        .iter()
        .map(|name| serde_json::json!({ "name": name }))
        .collect();
    serde_json::json!({ "references": { "spec": { "tags": tags } } }).to_string()
}

#[test]
fn test_release_inspection_failure_exits_one_with_stderr() {
    let fx = Fixture::new();
    fx.install_oc(None);
    fx.install_trigger();

    fx.command()
        .args([RELEASE, "5"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to get release info"))
        .stderr(predicate::str::contains("unauthorized"));
}

#[test]
fn test_unparseable_release_json_exits_one() {
    let fx = Fixture::new();
    fx.install_oc(Some("this is not json"));
    fx.install_trigger();

    fx.command()
        .args([RELEASE, "5"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse release JSON"));
}

#[test]
fn test_scan_triggers_stale_component_and_falls_back_to_main() {
    let fx = Fixture::new();
    fx.install_oc(Some(&release_json(&["broken", "console", "etcd"])));
    fx.install_trigger();
    fx.image("console", TimeDelta::days(9), CONSOLE_URL, "master");
    fx.image("etcd", TimeDelta::hours(5), "https://github.com/openshift/etcd", "master");

    fx.command()
        .args([RELEASE, "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Component: console created: 9d 0h ago {CONSOLE_URL} master"
        )))
        .stdout(predicate::str::contains(
            "Component: etcd created: 5h ago https://github.com/openshift/etcd master",
        ))
        .stdout(predicate::str::contains("Retrying with 'main' as fallback"))
        .stdout(predicate::str::contains("Component: broken skipped"));

    assert_eq!(
        fx.trigger_log(),
        format!("{CONSOLE_URL} master\n{CONSOLE_URL} main\n")
    );
}

#[test]
fn test_branch_override_is_used_for_every_component() {
    let fx = Fixture::new();
    fx.install_oc(Some(&release_json(&["console"])));
    fx.install_trigger();
    fx.image("console", TimeDelta::days(30), CONSOLE_URL, "master");

    fx.command()
        .args([RELEASE, "5", "release-4.15"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "created: 30d 0h ago {CONSOLE_URL} release-4.15"
        )));

    assert_eq!(fx.trigger_log(), format!("{CONSOLE_URL} release-4.15\n"));
}

#[test]
fn test_fresh_components_are_not_triggered() {
    let fx = Fixture::new();
    fx.install_oc(Some(&release_json(&["console"])));
    fx.install_trigger();
    fx.image("console", TimeDelta::days(4), CONSOLE_URL, "release-4.15");

    fx.command().args([RELEASE, "5"]).assert().success();

    assert_eq!(fx.trigger_log(), "");
}

#[test]
fn test_settings_file_supplies_trigger_script() {
    let fx = Fixture::new();
    fx.install_oc(Some(&release_json(&["console"])));
    fx.install_trigger();
    fx.image("console", TimeDelta::days(6), CONSOLE_URL, "release-4.15");
    fx.write(
        "config.yaml",
        &format!(
            "trigger_script: {}\ntrigger_delay_secs: 0\n",
            fx.path("postsubmit.sh").display()
        ),
    );

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("release-rebuild"));
    cmd.env("NO_COLOR", "1")
        .env_remove("RELEASE_REBUILD_TRIGGER_SCRIPT")
        .env_remove("RELEASE_REBUILD_TRIGGER_DELAY")
        .args(["--config", &path_str(&fx.path("config.yaml"))])
        .args(["--oc", &path_str(&fx.path("oc"))])
        .args([RELEASE, "5"])
        .assert()
        .success();

    assert_eq!(fx.trigger_log(), format!("{CONSOLE_URL} release-4.15\n"));
}

#[test]
fn test_no_color_env_with_conventional_value_scans_normally() {
    let fx = Fixture::new();
    fx.install_oc(Some(&release_json(&["console"])));
    fx.install_trigger();
    fx.image("console", TimeDelta::days(6), CONSOLE_URL, "release-4.15");

    fx.command()
        .env("NO_COLOR", "1")
        .args([RELEASE, "5"])
        .assert()
        .success()
        .stderr(predicate::str::contains("--no-color").not())
        .stdout(predicate::str::contains(format!(
            "Component: console created: 6d 0h ago {CONSOLE_URL} release-4.15"
        )));

    assert_eq!(fx.trigger_log(), format!("{CONSOLE_URL} release-4.15\n"));
}

#[test]
fn test_positionals_after_branch_are_ignored() {
    let fx = Fixture::new();
    fx.install_oc(Some(&release_json(&["console"])));
    fx.install_trigger();
    fx.image("console", TimeDelta::days(30), CONSOLE_URL, "master");

    fx.command()
        .args([RELEASE, "5", "release-4.15", "extra", "more"])
        .assert()
        .success();

    assert_eq!(fx.trigger_log(), format!("{CONSOLE_URL} release-4.15\n"));
}

#[test]
fn test_quiet_keeps_skip_and_trigger_lines() {
    let fx = Fixture::new();
    fx.install_oc(Some(&release_json(&["broken", "console"])));
    fx.install_trigger();
    fx.image("console", TimeDelta::days(30), CONSOLE_URL, "release-4.15");

    fx.command()
        .args(["--quiet", RELEASE, "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Component: broken skipped"))
        .stdout(predicate::str::contains(format!(
            "Running {} {CONSOLE_URL} release-4.15",
            fx.path("postsubmit.sh").display()
        )))
        .stdout(predicate::str::contains("components scanned").not());
}
