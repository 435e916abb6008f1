use proclab::commands::{Cli, ExecMode, TaskId};
use proclab::config::{DEFAULT_CHILD_COUNT, DEFAULT_COMMAND, DEFAULT_ITERATIONS};

fn parse(args: &[&str]) -> Cli {
    let argv: Vec<String> = std::iter::once("proclab")
        .chain(args.iter().copied())
        .map(|s| s.to_string())
        .collect();
    Cli::try_parse_args_from(argv).expect("expected argument parsing to succeed")
}

#[test]
fn every_task_name_is_accepted() {
    let cases = [
        ("1", TaskId::Spawn),
        ("2", TaskId::Exec),
        ("3z", TaskId::Zombie),
        ("3o", TaskId::Orphan),
        ("4", TaskId::Inspect),
        ("5", TaskId::Priority),
    ];
    for (name, expected) in cases {
        assert_eq!(parse(&["--task", name]).task, expected);
    }
}

#[test]
fn defaults_match_the_lab_handout() {
    let cli = parse(&["--task", "1"]);
    assert_eq!(cli.n, DEFAULT_CHILD_COUNT);
    assert_eq!(cli.n, 3);
    assert_eq!(cli.cmd, DEFAULT_COMMAND);
    assert_eq!(cli.cmd, "ls -l");
    assert_eq!(cli.iterations, DEFAULT_ITERATIONS);
    assert_eq!(cli.iterations, 2_000_000);
    assert_eq!(cli.pid, None);
    assert_eq!(cli.mode, ExecMode::Exec);
    assert_eq!(cli.sleep, 10);
    assert_eq!(cli.delay, 2);
    assert!(cli.log_level.is_none());
}

#[test]
fn task_parameters_are_parsed() {
    let cli = parse(&[
        "--task",
        "2",
        "--n",
        "5",
        "--cmd",
        "echo 'a b'",
        "--mode",
        "subprocess",
    ]);
    assert_eq!(cli.task, TaskId::Exec);
    assert_eq!(cli.n, 5);
    assert_eq!(cli.cmd, "echo 'a b'");
    assert_eq!(cli.mode, ExecMode::Subprocess);

    let cli = parse(&["--task", "4", "--pid", "1234"]);
    assert_eq!(cli.pid, Some(1234));

    let cli = parse(&["--task", "5", "--iterations", "1000", "--log-level", "debug"]);
    assert_eq!(cli.iterations, 1000);
    assert_eq!(cli.log_level.as_deref(), Some("debug"));
}

#[test]
fn task_is_required() {
    let err = Cli::try_parse_args_from(["proclab"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
}

#[test]
fn unknown_task_is_rejected() {
    let err = Cli::try_parse_args_from(["proclab", "--task", "6"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
}

#[test]
fn negative_child_count_is_rejected() {
    assert!(Cli::try_parse_args_from(["proclab", "--task", "1", "--n", "-1"]).is_err());
}
