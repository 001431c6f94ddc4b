use std::process::Command;

fn sortnet() -> Command {
    Command::new(env!("CARGO_BIN_EXE_sortnet"))
}

#[test]
fn test_cli_check_sorting_network() {
    let output = sortnet()
        .args(["check", "3", "[(0,1);(1,2);(0,1)]"])
        .output()
        .expect("Failed to execute sortnet");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Size: 3"), "stdout: {stdout}");
    assert!(stdout.contains("Outputs: 4"), "stdout: {stdout}");
    assert!(stdout.contains("Sorting: true"), "stdout: {stdout}");
}

#[test]
fn test_cli_search_three_wires() {
    let output = sortnet()
        .args(["search", "3", "-j", "2", "--seed", "1"])
        .output()
        .expect("Failed to execute sortnet");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Sorting networks of size 3 found"), "stdout: {stdout}");
}

#[test]
fn test_cli_rejects_unknown_strategy() {
    let output = sortnet()
        .args(["search", "3", "--subsumption", "SubsumptionMagic"])
        .output()
        .expect("Failed to execute sortnet");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("SubsumptionMagic"), "stderr: {stderr}");
}

#[test]
fn test_cli_rejects_bad_network() {
    let output = sortnet()
        .args(["check", "3", "[(0,7)]"])
        .output()
        .expect("Failed to execute sortnet");

    assert!(!output.status.success());
}
