//! Integration tests for altroot

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::os::unix::fs::symlink;
    use std::path::Path;
    use tempfile::TempDir;

    /// Command isolated from the caller's config and environment
    fn altroot(config_dir: &Path) -> Command {
        let mut cmd = cargo_bin_cmd!("altroot");
        cmd.env("ALTROOT_CONFIG", config_dir.join("config.toml"))
            .env_remove("ALTROOT_PREFIX")
            .arg("--no-local");
        cmd
    }

    /// Alternate root with /etc/foo, /etc/link -> /etc/foo and a link cycle
    fn sysroot() -> TempDir {
        let root = TempDir::new().unwrap();
        std::fs::create_dir_all(root.path().join("etc")).unwrap();
        std::fs::write(root.path().join("etc/foo"), b"guest").unwrap();
        symlink("/etc/foo", root.path().join("etc/link")).unwrap();
        symlink("loop-b", root.path().join("etc/loop-a")).unwrap();
        symlink("/etc/loop-a", root.path().join("etc/loop-b")).unwrap();
        root
    }

    fn under(root: &TempDir, path: &str) -> String {
        format!("{}{}", root.path().display(), path)
    }

    #[test]
    fn help_displays() {
        let home = TempDir::new().unwrap();
        altroot(home.path())
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("remap absolute paths"));
    }

    #[test]
    fn version_displays() {
        let home = TempDir::new().unwrap();
        altroot(home.path())
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("altroot"));
    }

    #[test]
    fn resolve_plain_output() {
        let home = TempDir::new().unwrap();
        let root = sysroot();
        let expected = format!("{}\n/etc/missing\nrelative/path\n", under(&root, "/etc/foo"));

        altroot(home.path())
            .args(["-L", root.path().to_str().unwrap()])
            .args(["resolve", "--format", "plain", "/etc/foo", "/etc/missing", "relative/path"])
            .assert()
            .success()
            .stdout(expected);
    }

    #[test]
    fn resolve_follows_absolute_symlink() {
        let home = TempDir::new().unwrap();
        let root = sysroot();

        let output = altroot(home.path())
            .args(["--prefix", root.path().to_str().unwrap()])
            .args(["resolve", "--format", "json", "/etc/link"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json[0]["requested"], "/etc/link");
        assert_eq!(json[0]["resolved"], under(&root, "/etc/foo"));
        assert_eq!(json[0]["remapped"], true);
    }

    #[test]
    fn resolve_symlink_loop_passes_through() {
        let home = TempDir::new().unwrap();
        let root = sysroot();

        altroot(home.path())
            .args(["-L", root.path().to_str().unwrap()])
            .args(["resolve", "--format", "plain", "/etc/loop-a"])
            .assert()
            .success()
            .stdout("/etc/loop-a\n");
    }

    #[test]
    fn resolve_uses_prefix_from_environment() {
        let home = TempDir::new().unwrap();
        let root = sysroot();

        altroot(home.path())
            .env("ALTROOT_PREFIX", root.path())
            .args(["resolve", "--format", "plain", "/etc/foo"])
            .assert()
            .success()
            .stdout(format!("{}\n", under(&root, "/etc/foo")));
    }

    #[test]
    fn help_lists_prefix_environment_variable() {
        let home = TempDir::new().unwrap();
        altroot(home.path())
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("ALTROOT_PREFIX"));
    }

    #[test]
    fn status_reports_environment_source() {
        let home = TempDir::new().unwrap();
        let root = sysroot();

        altroot(home.path())
            .env("ALTROOT_PREFIX", root.path())
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("Source: ALTROOT_PREFIX"));
    }

    #[test]
    fn invalid_global_config_is_named_over_local() {
        let home = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        let global = home.path().join("config.toml");
        std::fs::write(&global, "[prefix]\nmax_symlinks = \"many\"\n").unwrap();
        std::fs::write(work.path().join(".altroot.toml"), "[prefix]\nroot = \"/alt\"\n").unwrap();

        let mut cmd = cargo_bin_cmd!("altroot");
        cmd.env("ALTROOT_CONFIG", &global)
            .env_remove("ALTROOT_PREFIX")
            .current_dir(work.path())
            .arg("status")
            .assert()
            .failure()
            .stderr(
                predicate::str::contains(global.display().to_string())
                    .and(predicate::str::contains(".altroot.toml").not()),
            );
    }

    #[test]
    fn flag_overrides_environment() {
        let home = TempDir::new().unwrap();
        let root = sysroot();

        altroot(home.path())
            .env("ALTROOT_PREFIX", root.path())
            .args(["-L", "/", "resolve", "--format", "plain", "/etc/foo"])
            .assert()
            .success()
            .stdout("/etc/foo\n");
    }

    #[test]
    fn relative_prefix_is_anchored_at_current_dir() {
        let home = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        std::fs::create_dir_all(work.path().join("sysroot/lib")).unwrap();
        std::fs::write(work.path().join("sysroot/lib/ld.so"), b"").unwrap();
        let cwd = work.path().canonicalize().unwrap();

        altroot(home.path())
            .current_dir(&cwd)
            .args(["-L", "sysroot", "resolve", "--format", "plain", "/lib/ld.so"])
            .assert()
            .success()
            .stdout(format!("{}/sysroot/lib/ld.so\n", cwd.display()));
    }

    #[test]
    fn resolve_json_with_stats() {
        let home = TempDir::new().unwrap();
        let root = sysroot();

        let output = altroot(home.path())
            .args(["-L", root.path().to_str().unwrap()])
            .args(["resolve", "--format", "json", "--stats", "/etc/foo", "/etc/foo", "/nope"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["paths"].as_array().unwrap().len(), 3);
        assert_eq!(json["stats"]["misses"], 2);
        assert_eq!(json["stats"]["hits"], 1);
        assert_eq!(json["stats"]["remapped"], 1);
        assert_eq!(json["stats"]["unchanged"], 1);
    }

    #[test]
    fn resolve_table_output() {
        let home = TempDir::new().unwrap();
        let root = sysroot();

        altroot(home.path())
            .args(["-L", root.path().to_str().unwrap()])
            .args(["resolve", "--stats", "/etc/foo", "/etc/missing"])
            .assert()
            .success()
            .stdout(
                predicate::str::contains("REQUESTED")
                    .and(predicate::str::contains("remapped"))
                    .and(predicate::str::contains("unchanged"))
                    .and(predicate::str::contains("Hits")),
            );
    }

    #[test]
    fn resolve_rejects_zero_symlink_bound() {
        let home = TempDir::new().unwrap();
        std::fs::write(
            home.path().join("config.toml"),
            "[prefix]\nroot = \"/alt\"\nmax_symlinks = 0\n",
        )
        .unwrap();

        altroot(home.path())
            .args(["resolve", "/etc/foo"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("max_symlinks"));
    }

    #[test]
    fn status_without_prefix() {
        let home = TempDir::new().unwrap();
        altroot(home.path())
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("No alternate root configured"));
    }

    #[test]
    fn status_reports_missing_root() {
        let home = TempDir::new().unwrap();
        let missing = home.path().join("no-such-root");

        altroot(home.path())
            .args(["-L", missing.to_str().unwrap(), "status"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Directory: missing"));
    }

    #[test]
    fn config_path() {
        let home = TempDir::new().unwrap();
        altroot(home.path())
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let home = TempDir::new().unwrap();
        altroot(home.path())
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[prefix]"));
    }

    #[test]
    fn config_set_root_then_resolve() {
        let home = TempDir::new().unwrap();
        let root = sysroot();

        altroot(home.path())
            .args(["config", "set", "prefix.root", root.path().to_str().unwrap()])
            .assert()
            .success();

        altroot(home.path())
            .args(["resolve", "--format", "plain", "/etc/link"])
            .assert()
            .success()
            .stdout(format!("{}\n", under(&root, "/etc/foo")));
    }

    #[test]
    fn config_set_unknown_key() {
        let home = TempDir::new().unwrap();
        altroot(home.path())
            .args(["config", "set", "prefix.nope", "x"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown config key"));
    }

    #[test]
    fn invalid_config_is_reported() {
        let home = TempDir::new().unwrap();
        std::fs::write(home.path().join("config.toml"), "[prefix\n").unwrap();

        altroot(home.path())
            .arg("status")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));
    }

    #[test]
    fn completions_bash() {
        let home = TempDir::new().unwrap();
        altroot(home.path())
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("altroot"));
    }
}
