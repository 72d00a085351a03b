use assert_fs::TempDir;
use assert_fs::fixture::{FileWriteStr, PathChild};
use common::command::{init_repository_dir, run_twig_command};
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

#[rstest]
fn add_single_file_to_index_successfully(init_repository_dir: TempDir) {
    run_twig_command(init_repository_dir.path(), &["add", "hello.txt"])
        .assert()
        .success();

    run_twig_command(init_repository_dir.path(), &["ls-files"])
        .assert()
        .success()
        .stdout("100755 ce013625030ba8dba906f756967f9e9ca394464a 6\thello.txt\n");

    assert_eq!(
        common::stored_object_ids(init_repository_dir.path()),
        vec!["ce013625030ba8dba906f756967f9e9ca394464a".to_string()]
    );
}

#[rstest]
fn add_directory_stages_nested_files_with_slash_paths(init_repository_dir: TempDir) {
    run_twig_command(init_repository_dir.path(), &["add", "."])
        .assert()
        .success();

    let output = run_twig_command(init_repository_dir.path(), &["ls-files"])
        .output()
        .unwrap();
    let listed = String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|line| line.split('\t').nth(1).unwrap().to_string())
        .collect::<Vec<_>>();

    assert_eq!(listed, vec!["a/b/nested.txt".to_string(), "hello.txt".to_string()]);
}

#[rstest]
fn index_file_has_signature_version_and_count(init_repository_dir: TempDir) {
    run_twig_command(init_repository_dir.path(), &["add", "hello.txt", "a"])
        .assert()
        .success();

    let index = std::fs::read(init_repository_dir.path().join(".git/index")).unwrap();

    assert_eq!(&index[..4], b"DIRC");
    assert_eq!(&index[4..8], &[0, 0, 0, 2]);
    assert_eq!(&index[8..12], &[0, 0, 0, 2]);
    // header + "a/b/nested.txt" entry (80) + "hello.txt" entry (72) + checksum
    assert_eq!(index.len(), 12 + 80 + 72 + 20);
}

#[rstest]
fn adding_incrementally_keeps_earlier_entries(init_repository_dir: TempDir) {
    run_twig_command(init_repository_dir.path(), &["add", "hello.txt"])
        .assert()
        .success();
    run_twig_command(init_repository_dir.path(), &["add", "a/b/nested.txt"])
        .assert()
        .success();

    run_twig_command(init_repository_dir.path(), &["ls-files"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\ta/b/nested.txt\n"))
        .stdout(predicate::str::contains("\thello.txt\n"));
}

#[rstest]
fn re_adding_a_changed_file_replaces_its_entry(init_repository_dir: TempDir) {
    run_twig_command(init_repository_dir.path(), &["add", "hello.txt"])
        .assert()
        .success();
    init_repository_dir.child("hello.txt").write_str("hello again\n").unwrap();
    run_twig_command(init_repository_dir.path(), &["add", "hello.txt"])
        .assert()
        .success();

    let output = run_twig_command(init_repository_dir.path(), &["ls-files"])
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert_eq!(stdout.lines().count(), 1);
    assert!(!stdout.contains("ce013625030ba8dba906f756967f9e9ca394464a"));
    assert!(stdout.ends_with(" 12\thello.txt\n"));
}

#[rstest]
fn adding_a_missing_path_fails_without_touching_the_index(init_repository_dir: TempDir) {
    run_twig_command(init_repository_dir.path(), &["add", "hello.txt", "missing.txt"])
        .assert()
        .failure();

    assert!(!init_repository_dir.path().join(".git/index").exists());
}

#[rstest]
fn corrupted_index_is_rejected(init_repository_dir: TempDir) {
    run_twig_command(init_repository_dir.path(), &["add", "hello.txt"])
        .assert()
        .success();

    let index_path = init_repository_dir.path().join(".git/index");
    let mut index = std::fs::read(&index_path).unwrap();
    let last = index.len() - 1;
    index[last] ^= 0xff;
    std::fs::write(&index_path, index).unwrap();

    run_twig_command(init_repository_dir.path(), &["ls-files"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("index file is corrupt"));
}
