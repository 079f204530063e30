//! Integration tests for the `archforge` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Binary isolated from the user's config, cache and log settings.
fn archforge(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("archforge").unwrap();
    cmd.env("XDG_CONFIG_HOME", home.join("config"))
        .env("ARCHFORGE_TEMPLATES__CACHE_DIR", home.join("cache"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .current_dir(home);
    cmd
}

fn init_granular(home: &Path) {
    archforge(home)
        .args([
            "init",
            "shop",
            "--architecture",
            "hexagonal-multi-granular",
            "--namespace",
            "com.acme.shop",
            "--adapters-as-modules",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Project 'shop' created"));
}

#[test]
fn help_lists_commands() {
    let home = TempDir::new().unwrap();
    archforge(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("validate-templates"));
}

#[test]
fn version_flag() {
    let home = TempDir::new().unwrap();
    archforge(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn init_then_generate_components() {
    let home = TempDir::new().unwrap();
    init_granular(home.path());
    let root = home.path().join("shop");
    assert!(root.join(".archforge.yml").exists());
    assert!(root.join("settings.gradle.kts").exists());

    archforge(&root)
        .args(["generate", "entity", "User", "--fields", "name:String,email:String"])
        .assert()
        .success()
        .stdout(predicate::str::contains("User.java"));

    // Run from a subdirectory; the project root is found by walking up.
    archforge(&root.join("domain"))
        .args([
            "g",
            "output-adapter",
            "UserRepository",
            "--type",
            "redis",
            "--entity",
            "User",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("settings.gradle.kts"));

    let settings = fs::read_to_string(root.join("settings.gradle.kts")).unwrap();
    assert!(settings.contains("include(\"infrastructure:driven-adapters:user-repository\")"));
}

#[test]
fn duplicate_component_is_a_usage_error() {
    let home = TempDir::new().unwrap();
    init_granular(home.path());
    let root = home.path().join("shop");

    let entity = ["generate", "entity", "User", "--fields", "name:String"];
    archforge(&root).args(entity).assert().success();
    archforge(&root)
        .args(entity)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"))
        .stderr(predicate::str::contains("--force"));

    archforge(&root)
        .args(entity)
        .arg("--force")
        .assert()
        .success();
}

#[test]
fn granular_adapter_without_its_own_module_is_a_usage_error() {
    let home = TempDir::new().unwrap();
    archforge(home.path())
        .args(["init", "shop", "--architecture", "hexagonal-multi-granular"])
        .assert()
        .success();
    let root = home.path().join("shop");
    let root_build = fs::read_to_string(root.join("build.gradle.kts")).unwrap();

    archforge(&root)
        .args([
            "generate",
            "output-adapter",
            "UserRepository",
            "--type",
            "redis",
            "--entity",
            "User",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not inside any declared module"))
        .stderr(predicate::str::contains("--adapters-as-modules"));

    assert_eq!(fs::read_to_string(root.join("build.gradle.kts")).unwrap(), root_build);
}

#[test]
fn generate_outside_a_project_is_not_found() {
    let home = TempDir::new().unwrap();
    archforge(home.path())
        .args(["generate", "entity", "User"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("No archforge project found"))
        .stderr(predicate::str::contains("archforge init"));
}

#[test]
fn json_output_is_the_generation_report() {
    let home = TempDir::new().unwrap();
    init_granular(home.path());

    let assert = archforge(home.path())
        .args([
            "--output-format",
            "json",
            "generate",
            "use-case",
            "CreateUser",
            "--methods",
            "create:User:user:User",
            "--project-dir",
            "shop",
        ])
        .assert()
        .success();

    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["stages"].as_array().unwrap().last().unwrap(), "COMMITTED");
    assert_eq!(report["artifacts"].as_array().unwrap().len(), 2);
}

#[test]
fn quiet_init_prints_nothing() {
    let home = TempDir::new().unwrap();
    archforge(home.path())
        .args(["-q", "init", "shop"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn builtin_templates_validate() {
    let home = TempDir::new().unwrap();
    archforge(home.path())
        .args(["validate-templates", "--paradigm", "imperative"])
        .assert()
        .success()
        .stdout(predicate::str::contains("all valid"));
}

#[test]
fn missing_framework_templates_fail_validation() {
    let home = TempDir::new().unwrap();
    archforge(home.path())
        .args(["validate-templates", "--framework", "quarkus"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("template problem(s) found"))
        .stderr(predicate::str::contains("frameworks/quarkus"));
}

#[test]
fn local_template_directory_takes_precedence() {
    let home = TempDir::new().unwrap();
    let templates = home.path().join("templates");
    fs::create_dir_all(templates.join("project")).unwrap();
    fs::write(templates.join("project/gitignore.tpl"), "# custom for {{projectName}}\n").unwrap();

    archforge(home.path())
        .env("ARCHFORGE_TEMPLATES__LOCAL_DIR", &templates)
        .args(["init", "shop"])
        .assert()
        .success();

    let gitignore = fs::read_to_string(home.path().join("shop/.gitignore")).unwrap();
    assert_eq!(gitignore, "# custom for shop\n");
}

#[test]
fn cache_update_needs_a_source() {
    let home = TempDir::new().unwrap();
    archforge(home.path())
        .args(["cache", "update"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("no template directory"));
}

#[test]
fn cache_update_then_clear() {
    let home = TempDir::new().unwrap();
    let templates = home.path().join("templates");
    fs::create_dir_all(templates.join("project")).unwrap();
    fs::write(templates.join("project/gitignore.tpl"), "build/\n").unwrap();

    archforge(home.path())
        .args(["cache", "update", "--from"])
        .arg(&templates)
        .assert()
        .success()
        .stdout(predicate::str::contains("Cached 1 template(s)"));
    assert!(home.path().join("cache/project/gitignore.tpl").exists());

    archforge(home.path())
        .args(["cache", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 1 cached template(s)"));
    assert!(!home.path().join("cache").exists());

    // Idempotent.
    archforge(home.path())
        .args(["cache", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 0"));
}

#[test]
fn environment_overrides_config() {
    let home = TempDir::new().unwrap();
    archforge(home.path())
        .env("ARCHFORGE_BACKUP__DIR", ".snapshots")
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[defaults]"))
        .stdout(predicate::str::contains("dir = \".snapshots\""));
}

#[test]
fn explicit_config_file_must_exist() {
    let home = TempDir::new().unwrap();
    archforge(home.path())
        .args(["--config", "missing.toml", "config", "show"])
        .assert()
        .code(4);
}

#[test]
fn unknown_paradigm_is_rejected_by_the_parser() {
    let home = TempDir::new().unwrap();
    archforge(home.path())
        .args(["init", "shop", "--paradigm", "async"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("async"));
}

#[test]
fn shell_completions() {
    let home = TempDir::new().unwrap();
    archforge(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("archforge"));
}
