use assert_cmd::Command;
use predicates::prelude::*;

fn fluffy() -> Command {
    let mut cmd = Command::cargo_bin("fluffy").unwrap();
    // No config files: built-in defaults, in-memory store.
    cmd.env("FLUFFY_CONFIG_DIR", std::env::temp_dir().join("fluffy-cli-no-config"))
        .env("FLUFFY_ENV", "local")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn book_prints_thank_you_with_name() {
    fluffy()
        .args(["book", "--name", "王小明", "--phone", "0912345678"])
        .assert()
        .success()
        .stdout(predicate::str::contains("感謝 王小明"));
}

#[test]
fn book_with_short_phone_reports_field_error() {
    fluffy()
        .args(["book", "--name", "Momo", "--phone", "123", "--pet", "fish"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("phone: 請輸入有效電話"))
        .stderr(predicate::str::contains("petType: 請選擇寵物類型"));
}

#[test]
fn config_redacts_api_key() {
    fluffy()
        .arg("config")
        .env("FLUFFY__STORE__API_KEY", "super-secret")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"collection\": \"bookings\""))
        .stdout(predicate::str::contains("***"))
        .stdout(predicate::str::contains("super-secret").not());
}

#[test]
fn schema_prints_bookings_table() {
    fluffy()
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("-- booking/001_init"))
        .stdout(predicate::str::contains("CREATE TABLE IF NOT EXISTS bookings"));
}
