use assert_cmd::Command;
use predicates::prelude::*;

fn wppg() -> Command {
    Command::cargo_bin("wppg").unwrap()
}

fn file_count(dir: &std::path::Path) -> usize {
    walkdir::WalkDir::new(dir)
        .min_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .count()
}

#[test]
fn test_help_lists_export_flags() {
    wppg()
        .args(["new", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--cex"))
        .stdout(predicate::str::contains("--cexf"));
}

#[test]
fn test_unsupported_format_fails_before_prompting() {
    let tmp = tempfile::tempdir().unwrap();

    wppg()
        .current_dir(tmp.path())
        .args(["new", "--cex", "--cexf=yaml,bogus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported format"))
        .stderr(predicate::str::contains("bogus"));

    assert_eq!(file_count(tmp.path()), 0);
}

#[test]
fn test_cex_accepts_separate_path() {
    let tmp = tempfile::tempdir().unwrap();

    // `out` is read as the export path, so the run gets as far as format checking
    wppg()
        .current_dir(tmp.path())
        .args(["new", "--cex", "out", "--cexf=bogus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported format"))
        .stderr(predicate::str::contains("unexpected argument").not());

    assert_eq!(file_count(tmp.path()), 0);
}
