//! Help output specs

use crate::prelude::*;

#[test]
fn help_lists_commands() {
    let run = cli().args(&["--help"]).passes();
    for command in [
        "park", "leave", "locate", "vacant", "count", "occupied", "next", "sweep", "submit",
    ] {
        assert!(run.stdout().contains(command), "help missing {command}");
    }
}

#[test]
fn park_help_describes_arguments() {
    cli()
        .args(&["park", "--help"])
        .passes()
        .stdout_has("<SPOT>")
        .stdout_has("<PLATE>")
        .stdout_has("<LENGTH_OF_STAY>");
}

#[test]
fn unknown_command_fails() {
    cli().args(&["teleport"]).fails();
}
