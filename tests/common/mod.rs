use assert_cmd::Command;

pub fn fmtags_cmd() -> Command {
    let mut cmd = Command::cargo_bin("fmtags").unwrap();
    cmd.env_remove("FMTAGS_ROOT");
    cmd.env_remove("RUST_LOG");
    cmd
}
