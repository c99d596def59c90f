use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const B: &str = "b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0";
const C: &str = "c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0";

fn ns(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ns"));
    cmd.arg("--home")
        .arg(home)
        .env_remove("NS_PRICE_FLOOR")
        .env_remove("NS_FAUCET_AMOUNT")
        .env_remove("NS_LOG");
    cmd
}

fn init_home(tmp: &TempDir) -> std::path::PathBuf {
    let home = tmp.path().join("home");
    let genesis = tmp.path().join("genesis.json");
    let doc = serde_json::json!({
        "accounts": [
            { "address": B, "coins": [{ "denom": "nametoken", "amount": 20 }] },
            { "address": C, "coins": [{ "denom": "nametoken", "amount": 8 }] }
        ]
    });
    fs::write(&genesis, serde_json::to_vec(&doc).unwrap()).unwrap();
    ns(&home)
        .args(["init", "--genesis", genesis.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("sha256:"));
    home
}

fn json_out(cmd: &mut Command) -> serde_json::Value {
    let assert = cmd.arg("--json").assert().success();
    serde_json::from_slice(&assert.get_output().stdout).expect("json output")
}

#[test]
fn help_lists_commands() {
    let output = Command::new(assert_cmd::cargo::cargo_bin!("ns"))
        .arg("--help")
        .output()
        .expect("run help");
    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    for needle in ["init", "tx", "query", "export", "--home", "--pretty"] {
        assert!(text.contains(needle), "help output should contain '{needle}'");
    }
}

#[test]
fn buy_then_query_persists_across_invocations() {
    let tmp = TempDir::new().expect("tmpdir");
    let home = init_home(&tmp);

    let receipt = json_out(ns(&home).args([
        "tx", "buy-name", "--from", B, "--name", "alice.id", "--value", "1.2.3.4", "--amount",
        "5nametoken",
    ]));
    assert_eq!(receipt["data"]["msg_type"], "buy_name");
    assert_eq!(receipt["data"]["event"]["event"], "name_acquired");

    let whois = json_out(ns(&home).args(["query", "whois", "alice.id"]));
    assert_eq!(whois["data"]["owner"], B);
    assert_eq!(whois["data"]["value"], "1.2.3.4");

    ns(&home)
        .args(["query", "resolve", "alice.id"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1.2.3.4"));

    let balance = json_out(ns(&home).args(["query", "balance", B]));
    assert_eq!(balance["data"]["coins"][0]["amount"], 15);
}

#[test]
fn rejections_exit_nonzero_with_code() {
    let tmp = TempDir::new().expect("tmpdir");
    let home = init_home(&tmp);
    ns(&home)
        .args([
            "tx", "buy-name", "--from", B, "--name", "alice.id", "--amount", "5nametoken",
        ])
        .assert()
        .success();

    ns(&home)
        .args([
            "tx", "buy-name", "--from", C, "--name", "alice.id", "--amount", "5nametoken",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("insufficient_bid"));

    ns(&home)
        .args([
            "tx", "buy-name", "--from", C, "--name", "alice.id", "--amount", "10nametoken",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("insufficient_funds"));

    ns(&home)
        .args(["tx", "set-name", "--from", C, "--name", "alice.id", "--value", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unauthorized"));

    let whois = json_out(ns(&home).args(["query", "whois", "alice.id"]));
    assert_eq!(whois["data"]["owner"], B);
}

#[test]
fn faucet_amount_comes_from_env() {
    let tmp = TempDir::new().expect("tmpdir");
    let home = init_home(&tmp);
    ns(&home)
        .env("NS_FAUCET_AMOUNT", "2nametoken")
        .args(["tx", "faucet", "--from", C])
        .assert()
        .success();
    let balance = json_out(ns(&home).args(["query", "balance", C]));
    assert_eq!(balance["data"]["coins"][0]["amount"], 10);

    ns(&home)
        .env("NS_FAUCET_AMOUNT", "")
        .args(["tx", "faucet", "--from", C])
        .assert()
        .failure()
        .stderr(predicate::str::contains("faucet_disabled"));
}

#[test]
fn uninitialized_home_is_refused() {
    let tmp = TempDir::new().expect("tmpdir");
    ns(&tmp.path().join("empty"))
        .args(["query", "names"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"));
}

#[test]
fn export_feeds_back_into_init() {
    let tmp = TempDir::new().expect("tmpdir");
    let home = init_home(&tmp);
    ns(&home)
        .args([
            "tx", "buy-name", "--from", B, "--name", "bob.id", "--value", "v", "--amount",
            "3nametoken",
        ])
        .assert()
        .success();

    let exported = ns(&home).arg("export").assert().success();
    let genesis = tmp.path().join("exported.json");
    fs::write(&genesis, &exported.get_output().stdout).unwrap();

    let copy = tmp.path().join("copy");
    ns(&copy)
        .args(["init", "--genesis", genesis.to_str().unwrap()])
        .assert()
        .success();
    let names = json_out(ns(&copy).args(["query", "names"]));
    assert_eq!(names["data"], serde_json::json!(["bob.id"]));
}
