use std::path::PathBuf;
use std::process::{Command, Output};

const BANNER: &str = "send internet group management protocol with router alert";

fn igmp_ra(args: &[&str], addr_file: Option<&PathBuf>) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_igmp-ra"));
    cmd.args(args)
        .env_remove("ADDR_FILE")
        .env_remove("IF_99")
        .env_remove("ADDR_99");
    if let Some(path) = addr_file {
        cmd.env("ADDR_FILE", path);
    }
    cmd.output().unwrap()
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

fn empty_addr_file(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("igmp-ra-{}-{}.py", name, std::process::id()));
    std::fs::write(&path, "# no test cases\n").unwrap();
    path
}

#[test]
fn no_arguments_prints_usage() {
    let output = igmp_ra(&[], None);
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stdout_lines(&output), vec![BANNER, "usage: igmp-ra Nn"]);
}

#[test]
fn extra_arguments_print_usage() {
    let output = igmp_ra(&["1", "2"], None);
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stdout_lines(&output), vec![BANNER, "usage: igmp-ra Nn"]);
}

#[test]
fn unknown_index_is_fatal() {
    let path = empty_addr_file("unknown");
    let output = igmp_ra(&["99"], Some(&path));
    std::fs::remove_file(&path).unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout_lines(&output), vec![BANNER]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("IF_99"), "stderr: {stderr}");
}

#[test]
fn missing_addr_file_is_fatal() {
    let path = std::env::temp_dir().join("igmp-ra-does-not-exist.py");
    let output = igmp_ra(&["1"], Some(&path));
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout_lines(&output), vec![BANNER]);
}
