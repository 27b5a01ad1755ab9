use predicates::str::contains;

#[test]
fn empty_chips_fail() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("chip-planner");
    cmd.args(["optimize", "--players", "10", "--duration", "180"]);
    cmd.assert()
        .failure()
        .stderr(contains("Error: chips must not be empty"));
}

#[test]
fn infeasible_inventory_names_the_constraint() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("chip-planner");
    cmd.args([
        "optimize",
        "--chip",
        "25:4:red",
        "--players",
        "20",
        "--rebuys",
        "10",
        "--duration",
        "180",
    ]);
    cmd.assert().failure().stderr(contains(
        "Error: not enough chip value for 20 players + 10 rebuys (inventory total 100)",
    ));
}

#[test]
fn zero_quantity_inventory_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("chip-planner");
    cmd.args([
        "optimize",
        "--chip",
        "25:0",
        "--players",
        "4",
        "--duration",
        "60",
    ]);
    cmd.assert()
        .failure()
        .stderr(contains("Error: invalid inventory: every chip quantity is 0"));
}

#[test]
fn invalid_chip_value_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("chip-planner");
    cmd.args([
        "optimize",
        "--chip",
        "ten:100",
        "--players",
        "4",
        "--duration",
        "60",
    ]);
    cmd.assert()
        .failure()
        .stderr(contains("Error: invalid chip value in 'ten:100'"));
}

#[test]
fn duplicate_chip_values_fail() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("chip-planner");
    cmd.args([
        "revalue",
        "--chip",
        "25:100:red",
        "--chip",
        "25:100:pink",
        "--players",
        "4",
        "--duration",
        "60",
    ]);
    cmd.assert()
        .failure()
        .stderr(contains("Error: duplicate chip value '25'"));
}

#[test]
fn missing_players_fail() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("chip-planner");
    cmd.args(["optimize", "--chip", "25:100", "--duration", "60"]);
    cmd.assert()
        .failure()
        .stderr(contains("Error: missing required setting 'players'"));
}

#[test]
fn unknown_subcommand_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("chip-planner");
    cmd.args(["simulate"]);
    cmd.assert().failure().stderr(contains("Error: "));
}
