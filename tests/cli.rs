// Drives the compiled binary end to end. stdout is a pipe here, so output is
// never colored.
use assert_cmd::Command;
use speakwell::config::{ConfigStore, FileConfigStore, CONFIG_PATH_ENV};
use tempfile::{tempdir, TempDir};

fn speakwell(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("speakwell").unwrap();
    cmd.env(CONFIG_PATH_ENV, config_dir.path().join("config.json"));
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let out = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(out).unwrap()
}

#[test]
fn align_prints_result_card() {
    let dir = tempdir().unwrap();
    let out = stdout_of(speakwell(&dir).args(["align", "Cat", "cot"]));
    assert!(out.contains("Target:    cat"));
    assert!(out.contains("Accuracy:  67%"));
    assert!(out.contains("needs practice"));
    assert!(out.contains("Alignment: c[a]t"));
}

#[test]
fn align_json_output() {
    let dir = tempdir().unwrap();
    let out = stdout_of(speakwell(&dir).args(["align", "apple", " APPLE ", "--json"]));
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["score"], 100);
    assert_eq!(value["feedback"], "good");
    assert_eq!(value["segments"].as_array().unwrap().len(), 5);
}

#[test]
fn align_rejects_blank_target() {
    let dir = tempdir().unwrap();
    speakwell(&dir)
        .args(["align", "  ", "apple"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn practice_reads_transcripts_from_stdin() {
    let dir = tempdir().unwrap();
    let out = stdout_of(
        speakwell(&dir)
            .args(["practice", "--word", "apple", "--word", "cat", "--retries", "0"])
            .write_stdin("apple\ncot\n"),
    );
    assert!(out.contains("[1/2] Say: apple"));
    assert!(out.contains("[2/2] Say: cat"));
    assert!(out.contains("Attempted:  2"));
    assert!(out.contains("Practice:   cat (67%)"));
}

#[test]
fn practice_retries_on_silence() {
    let dir = tempdir().unwrap();
    let out = stdout_of(
        speakwell(&dir)
            .args(["practice", "--word", "dog", "--retries", "1"])
            .write_stdin("\n\n"),
    );
    assert!(out.contains("No speech detected, try again (0 left)."));
    assert!(out.contains("Skipping dog."));
    assert!(out.contains("Skipped:    1"));
}

#[test]
fn practice_json_summary() {
    let dir = tempdir().unwrap();
    let out = stdout_of(
        speakwell(&dir)
            .args(["practice", "--json", "-l", "tricky", "-w", "3"])
            .write_stdin("one\ntwo\n"),
    );
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    // stdin closes after two transcripts
    assert_eq!(value["summary"]["attempted"], 2);
    assert_eq!(value["attempts"].as_array().unwrap().len(), 2);
}

#[test]
fn practice_unknown_word_list_fails() {
    let dir = tempdir().unwrap();
    let assert = speakwell(&dir)
        .args(["practice", "-l", "klingon"])
        .write_stdin("")
        .assert()
        .failure()
        .code(2);
    let err = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(err.contains("word list not found: klingon"));
}

#[test]
fn practice_can_save_config() {
    let dir = tempdir().unwrap();
    speakwell(&dir)
        .args(["practice", "-w", "2", "-l", "tricky", "--save-config"])
        .write_stdin("")
        .assert()
        .success();

    let cfg = FileConfigStore::with_path(dir.path().join("config.json")).load();
    assert_eq!(cfg.number_of_words, 2);
    assert_eq!(cfg.word_list, "tricky");
}
