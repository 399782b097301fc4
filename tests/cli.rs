use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const QUESTION_SET: &str = "\
[지문] 단락입니다.
[문제] 1. 다음 글을 읽고...
[Odyssey]
[보기] 예시1
[선택지] ① 가
[선택지] ② 나
[교사용정답] 정답) ① 해설) ...
";

fn write_input(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write input");
    path
}

#[test]
fn render_text_stream() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "set.txt", QUESTION_SET);

    let mut cmd = cargo_bin_cmd!("qtag");
    cmd.current_dir(dir.path()).arg("render").arg(&input).arg("-q");

    cmd.assert()
        .success()
        .stdout(
            predicate::str::contains("#1 question +blank\n  style teacher-answer\n  separator 1")
                .and(predicate::str::contains("text \"다음 글을 읽고...\""))
                .and(predicate::str::contains("Odyssey").not()),
        )
        .stderr(predicate::str::contains("6/7 items emitted, 0 failed, 1 dropped"));
}

#[test]
fn render_json_lines() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "set.txt", QUESTION_SET);

    let output = cargo_bin_cmd!("qtag")
        .current_dir(dir.path())
        .args(["render", "--format", "json", "-q"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let batches: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(batches.len(), 6);
    assert_eq!(batches[1]["role"], "question");
    assert_eq!(batches[1]["blank_before"], true);
    assert_eq!(batches[2]["order"], 3);
    assert_eq!(batches[2]["style"], "context-indent");
}

#[test]
fn render_dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "set.txt", QUESTION_SET);

    let mut cmd = cargo_bin_cmd!("qtag");
    cmd.current_dir(dir.path())
        .args(["render", "--dry-run", "-q"])
        .arg(&input);

    cmd.assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("6/7 items emitted"));
}

#[test]
fn render_rejects_unknown_format() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "set.txt", QUESTION_SET);

    let mut cmd = cargo_bin_cmd!("qtag");
    cmd.current_dir(dir.path())
        .args(["render", "--format", "xml", "-q"])
        .arg(&input);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("xml"));
}

#[test]
fn render_reads_html_divs() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        &dir,
        "set.html",
        "<html><body><div>[문제] 질문</div><div>[보기] 예</div></body></html>",
    );

    let mut cmd = cargo_bin_cmd!("qtag");
    cmd.current_dir(dir.path()).arg("render").arg(&input).arg("-q");

    cmd.assert().success().stdout(
        predicate::str::contains("#0 question")
            .and(predicate::str::contains("#1 context +blank")),
    );
}

#[test]
fn config_file_changes_layout() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "set.txt", "[보기] 예\n");
    let config = write_input(&dir, "custom.toml", "[layout]\ntight_separator_units = 3\n");

    let mut cmd = cargo_bin_cmd!("qtag");
    cmd.current_dir(dir.path())
        .arg("render")
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .arg("-q");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("separator 3"));
}

#[test]
fn config_with_zero_separator_units_is_rejected() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "set.txt", "[보기] 예\n");
    write_input(&dir, "qtag.toml", "[layout]\nloose_separator_units = 0\n");

    let mut cmd = cargo_bin_cmd!("qtag");
    cmd.current_dir(dir.path()).arg("render").arg(&input).arg("-q");

    cmd.assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("separator units must be at least 1"));
}

#[test]
fn preview_lists_styles() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "set.txt", QUESTION_SET);

    let mut cmd = cargo_bin_cmd!("qtag");
    cmd.current_dir(dir.path())
        .args(["preview", "--limit", "2", "-q"])
        .arg(&input);

    cmd.assert().success().stdout(
        predicate::str::starts_with("7 items\n")
            .and(predicate::str::contains("[a.문제] (question)"))
            .and(predicate::str::contains("... and 5 more")),
    );
}

#[test]
fn normalize_prints_repaired_lines() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        &dir,
        "gen.txt",
        "[지문또는문단] [문제] 2. 윗글의 내용\n[지문또는문단] ① 가\n[지문또는문단] 짧다\n",
    );

    let mut cmd = cargo_bin_cmd!("qtag");
    cmd.current_dir(dir.path()).arg("normalize").arg(&input).arg("-q");

    cmd.assert()
        .success()
        .stdout("[문제] 윗글의 내용\n[선택지] ① 가\n");
}

#[test]
fn tag_passage_by_paragraph() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "passage.txt", "첫 문단\n\n둘째 문단\n");

    let mut cmd = cargo_bin_cmd!("qtag");
    cmd.current_dir(dir.path()).arg("tag-passage").arg(&input).arg("-q");

    cmd.assert()
        .success()
        .stdout("[지문또는문단] 첫 문단\n\n[지문또는문단] 둘째 문단\n");
}

#[test]
fn to_html_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "set.txt", "[문제] a < b\n[보기] 예\n");
    let out = dir.path().join("set.html");

    let mut cmd = cargo_bin_cmd!("qtag");
    cmd.current_dir(dir.path())
        .arg("to-html")
        .arg(&input)
        .arg("-o")
        .arg(&out)
        .arg("-q");
    cmd.assert().success().stdout(predicate::str::is_empty());

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains("<div>[문제] a &lt; b</div>"));
    assert!(html.contains("<div>[보기] 예</div>"));
}

#[test]
fn missing_input_reports_path() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.txt");

    let mut cmd = cargo_bin_cmd!("qtag");
    cmd.current_dir(dir.path()).arg("preview").arg(&missing).arg("-q");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Cannot read").and(predicate::str::contains("nope.txt")));
}

#[test]
fn subcommand_required() {
    cargo_bin_cmd!("qtag").assert().failure();
}
