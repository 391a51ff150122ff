use assert_cmd::Command;

pub fn tagpage_cmd() -> Command {
    let mut cmd = Command::cargo_bin("tagpage").unwrap();
    cmd.env_remove("TAGPAGE_ROOT");
    cmd
}
