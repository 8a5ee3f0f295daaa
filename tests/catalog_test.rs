use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

mod common;

#[test]
fn test_custom_catalog_from_json() {
    let mut catalog = NamedTempFile::new().unwrap();
    write!(
        catalog,
        r#"[{{"id": "tea", "display_name": "Green Tea", "price": 900, "stock": 1}}]"#
    )
    .unwrap();

    let script = common::write_script(&[
        "select_denomination, 500",
        "insert_cash,",
        "insert_cash,",
        "purchase, tea",
        "purchase, tea",
    ])
    .unwrap();

    let mut cmd = Command::new(cargo_bin!("vendsim"));
    cmd.arg(script.path())
        .arg("--catalog")
        .arg(catalog.path())
        .arg("--dispense-delay-ms")
        .arg("0");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "4,purchase tea,ok,dispensed,PaymentPending,Cash,100,tea dispensed.,tea=0",
        ))
        .stdout(predicate::str::contains(
            "5,purchase tea,rejected,out_of_stock,PaymentPending,Cash,100,tea is sold out,tea=0",
        ));
}

#[test]
fn test_invalid_catalog_is_fatal() {
    let mut catalog = NamedTempFile::new().unwrap();
    write!(
        catalog,
        r#"[{{"id": "air", "display_name": "Air", "price": 0, "stock": 1}}]"#
    )
    .unwrap();
    let script = common::write_script(&["reset,"]).unwrap();

    let mut cmd = Command::new(cargo_bin!("vendsim"));
    cmd.arg(script.path()).arg("--catalog").arg(catalog.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid catalog"));
}
