use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_cli_cash_session_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!("vendsim"));
    cmd.arg("tests/fixtures/cash_session.csv")
        .arg("--dispense-delay-ms")
        .arg("0")
        .arg("--change-delay-ms")
        .arg("0");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "step,command,status,kind,phase,method,balance,message,stock",
        ))
        // Two 1000 notes in
        .stdout(predicate::str::contains(
            "3,insert_cash,ok,cash_inserted,PaymentPending,Cash,2000,",
        ))
        // Coffee costs 700
        .stdout(predicate::str::contains(
            "4,purchase coffee,ok,dispensed,PaymentPending,Cash,1300,coffee dispensed.,cola=5;water=5;coffee=4",
        ))
        .stdout(predicate::str::contains(
            "5,return_change,ok,change_returned,Idle,None,0,\"Change: 1,300원\",cola=5;water=5;coffee=4",
        ));

    Ok(())
}

#[test]
fn test_cli_card_session_end_to_end() {
    let mut cmd = Command::new(cargo_bin!("vendsim"));
    cmd.arg("tests/fixtures/card_session.csv")
        .env("VENDSIM_DISPENSE_DELAY_MS", "0")
        .env("VENDSIM_CHANGE_DELAY_MS", "0");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "2,insert_cash,rejected,method_conflict,PaymentPending,Card,0,",
        ))
        .stdout(predicate::str::contains(
            "3,purchase cola,ok,dispensed,Idle,None,0,cola dispensed.,cola=4;water=5;coffee=5",
        ))
        .stdout(predicate::str::contains(
            "4,purchase cola,rejected,no_payment_method,Idle,None,0,",
        ))
        .stdout(predicate::str::contains(
            "7,purchase cola,rejected,card_declined,Idle,None,0,payment for cola failed (card issuer error),cola=4;water=5;coffee=5",
        ));
}

#[test]
fn test_cli_json_output() -> Result<(), Box<dyn std::error::Error>> {
    let output = Command::new(cargo_bin!("vendsim"))
        .arg("tests/fixtures/cash_session.csv")
        .arg("--json")
        .env("VENDSIM_DISPENSE_DELAY_MS", "0")
        .env("VENDSIM_CHANGE_DELAY_MS", "0")
        .output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let steps: Vec<serde_json::Value> = stdout
        .lines()
        .map(serde_json::from_str::<serde_json::Value>)
        .collect::<Result<_, _>>()?;
    assert_eq!(steps.len(), 5);

    assert_eq!(steps[3]["command"], "purchase coffee");
    assert_eq!(steps[3]["outcome"]["outcome"], "dispensed");
    assert_eq!(steps[3]["view"]["inserted_total"], 1300);
    assert_eq!(steps[3]["view"]["stock"][2]["remaining"], 4);
    assert_eq!(steps[4]["view"]["phase"], "Idle");

    Ok(())
}
