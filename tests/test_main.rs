use assert_cmd::Command;
use predicates::prelude::*;
use rstest::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

struct Shelf {
    home: TempDir,
    data: TempDir,
}

#[fixture]
fn shelf() -> Shelf {
    Shelf {
        home: tempfile::tempdir().unwrap(),
        data: tempfile::tempdir().unwrap(),
    }
}

impl Shelf {
    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("linkshelf").unwrap();
        cmd.env("HOME", self.home.path())
            .env("LINKSHELF_DATA_DIR", self.data.path())
            .env_remove("LINKSHELF_PAGE_SIZE")
            .env_remove("LINKSHELF_METADATA_PROVIDER")
            .env_remove("LINKSHELF_OPENGRAPH_APP_ID")
            .arg("--offline")
            .arg("--no-color");
        cmd
    }

    fn list_json(&self) -> Vec<Value> {
        let output = self.cmd().args(["list", "--json"]).output().unwrap();
        assert!(output.status.success());
        serde_json::from_slice(&output.stdout).unwrap()
    }

    fn add(&self, url: &str, name: &str) -> String {
        self.cmd().args(["add", url, "-n", name]).assert().success();
        self.list_json()[0]["id"].as_str().unwrap().to_string()
    }
}

#[rstest]
fn given_debug_flags_when_run_then_success(shelf: Shelf) {
    shelf
        .cmd()
        .args(["-d", "-d"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Debug mode: debug"));
}

#[rstest]
fn given_empty_shelf_when_list_then_no_bookmarks(shelf: Shelf) {
    shelf
        .cmd()
        .arg("list")
        .assert()
        .success()
        .stderr(predicate::str::contains("No bookmarks to display"));
}

#[rstest]
fn given_valid_url_when_add_then_stored_in_envelope(shelf: Shelf) {
    shelf
        .cmd()
        .args(["add", "https://www.rust-lang.org", "-n", "Rust"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added bookmark: Rust"));

    let raw: Value = serde_json::from_str(
        &fs::read_to_string(shelf.data.path().join("ph_bookmarks.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(raw["version"], 0);
    assert_eq!(raw["state"]["bookmarks"][0]["name"], "Rust");
    assert!(raw["state"]["bookmarks"][0]["lastEdited"].is_i64());
}

#[rstest]
#[case("", "Please fill in")]
#[case("not a url", "Please submit a valid URL")]
fn given_invalid_url_when_add_then_usage_error(
    shelf: Shelf,
    #[case] url: &str,
    #[case] message: &str,
) {
    shelf
        .cmd()
        .args(["add", url])
        .assert()
        .code(64)
        .stderr(predicate::str::contains(message));
}

#[rstest]
fn given_duplicate_when_add_then_rejected(shelf: Shelf) {
    shelf.add("https://docs.rs", "docs");
    shelf
        .cmd()
        .args(["add", "https://docs.rs", "-n", "docs"])
        .assert()
        .code(64)
        .stderr(predicate::str::contains("already exists"));
    assert_eq!(shelf.list_json().len(), 1);
}

#[rstest]
fn given_bookmark_when_edit_then_json_reflects_change(shelf: Shelf) {
    let id = shelf.add("https://a.example", "a");

    shelf
        .cmd()
        .args(["edit", &id[..8], "-u", "https://b.example"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated bookmark: a"));

    let list = shelf.list_json();
    assert_eq!(list[0]["url"], "https://b.example");
    assert_eq!(list[0]["name"], "a");
    assert!(list[0]["status"].is_null());
}

#[rstest]
fn given_bookmarks_when_delete_list_then_removed(shelf: Shelf) {
    let a = shelf.add("https://a.example", "a");
    let b = shelf.add("https://b.example", "b");
    shelf.add("https://c.example", "c");

    shelf
        .cmd()
        .args(["delete", &format!("{},{}", a, b)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted: a"))
        .stdout(predicate::str::contains("Deleted: b"));

    let list = shelf.list_json();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["name"], "c");
}

#[rstest]
fn given_many_bookmarks_when_list_page_then_footer(shelf: Shelf) {
    for i in 0..3 {
        shelf.add(&format!("https://{}.example", i), &format!("bm{}", i));
    }

    shelf
        .cmd()
        .env("LINKSHELF_PAGE_SIZE", "2")
        .args(["list", "-p", "2"])
        .assert()
        .success()
        .stderr(predicate::str::contains("bm0"))
        .stderr(predicate::str::contains("< 2/2"))
        .stderr(predicate::str::contains("(3 bookmarks)  prev: list -p 1"))
        .stderr(predicate::str::contains("next: list -p").not());
}

#[rstest]
fn given_bookmark_when_show_then_details(shelf: Shelf) {
    let id = shelf.add("https://a.example", "a");
    shelf
        .cmd()
        .args(["show", &id])
        .assert()
        .success()
        .stderr(predicate::str::contains("URL: https://a.example"))
        .stderr(predicate::str::contains("not fetched"));
}

#[rstest]
fn given_unknown_id_when_show_then_not_found(shelf: Shelf) {
    shelf
        .cmd()
        .args(["show", "deadbeef"])
        .assert()
        .code(64)
        .stderr(predicate::str::contains("Bookmark not found"));
}

#[rstest]
fn given_offline_when_refresh_then_usage_error(shelf: Shelf) {
    shelf
        .cmd()
        .arg("refresh")
        .assert()
        .code(64)
        .stderr(predicate::str::contains("--offline"));
}

#[rstest]
fn given_generate_config_flag_then_default_toml(shelf: Shelf) {
    shelf
        .cmd()
        .arg("--generate-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("page_size = 10"))
        .stdout(predicate::str::contains("[metadata]"));
}

#[rstest]
fn given_missing_config_file_when_run_then_usage_error(shelf: Shelf) {
    shelf
        .cmd()
        .args(["-c", "/definitely/missing/config.toml", "list"])
        .assert()
        .code(64);
}

#[rstest]
#[case("bash")]
#[case("zsh")]
#[case("fish")]
fn given_shell_when_completion_then_script_on_stdout(shelf: Shelf, #[case] shell: &str) {
    shelf
        .cmd()
        .args(["completion", shell])
        .assert()
        .success()
        .stdout(predicate::str::contains("linkshelf"));
}
