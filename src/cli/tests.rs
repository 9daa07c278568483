use super::*;

fn parse_args(argv: &[&str]) -> Args {
    Args::try_parse_from(argv)
        .unwrap_or_else(|err| panic!("argv={argv:?} should parse successfully: {err}"))
}

#[test]
fn no_subcommand_means_chat() {
    let args = parse_args(&["monky-chat"]);
    assert!(args.command.is_none());
    assert!(args.log.is_none());
}

#[test]
fn log_flag_is_global() {
    let args = parse_args(&["monky-chat", "chat", "--log", "session.log"]);
    assert!(matches!(args.command, Some(Commands::Chat)));
    assert_eq!(args.log, Some(PathBuf::from("session.log")));

    let args = parse_args(&["monky-chat", "-l", "a.log", "templates"]);
    assert_eq!(args.log, Some(PathBuf::from("a.log")));
}

#[test]
fn upload_takes_a_file() {
    let args = parse_args(&["monky-chat", "upload", "me.png"]);
    match args.command {
        Some(Commands::Upload { file }) => assert_eq!(file, PathBuf::from("me.png")),
        _ => panic!("expected upload subcommand"),
    }
    assert!(Args::try_parse_from(["monky-chat", "upload"]).is_err());
}

#[test]
fn set_and_unset_parse_key_and_value() {
    let args = parse_args(&["monky-chat", "set", "reply-delay-ms", "500"]);
    match args.command {
        Some(Commands::Set { key, value }) => {
            assert_eq!(key, "reply-delay-ms");
            assert_eq!(value, "500");
        }
        _ => panic!("expected set subcommand"),
    }

    let args = parse_args(&["monky-chat", "unset", "user-name"]);
    assert!(matches!(args.command, Some(Commands::Unset { key }) if key == "user-name"));
}

#[test]
fn unknown_subcommands_are_rejected() {
    assert!(Args::try_parse_from(["monky-chat", "auth"]).is_err());
}
