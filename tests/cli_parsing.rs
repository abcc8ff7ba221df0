use clap::Parser;
use shipwright::cli::{Cli, Commands};
use std::path::PathBuf;

#[test]
fn test_parse_analyze_with_push_and_deploy() {
    let cli = Cli::try_parse_from([
        "shipwright",
        "analyze",
        "app.zip",
        "--out-dir",
        "out",
        "--push-repo",
        "my-app",
        "--deploy",
        "--owner",
        "tea-123",
    ])
    .unwrap();

    match cli.command {
        Commands::Analyze(args) => {
            assert_eq!(args.archive, PathBuf::from("app.zip"));
            assert_eq!(args.out_dir, Some(PathBuf::from("out")));
            assert_eq!(args.push_repo.as_deref(), Some("my-app"));
            assert!(args.deploy);
            assert_eq!(args.owner.as_deref(), Some("tea-123"));
        }
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_deploy_flag_requires_push_repo() {
    let result = Cli::try_parse_from(["shipwright", "analyze", "app.zip", "--deploy"]);
    assert!(result.is_err());
}

#[test]
fn test_parse_push_requires_repo() {
    assert!(Cli::try_parse_from(["shipwright", "push", "app-fixed.zip"]).is_err());

    let cli = Cli::try_parse_from(["shipwright", "push", "app-fixed.zip", "--repo", "demo"]).unwrap();
    match cli.command {
        Commands::Push(args) => {
            assert_eq!(args.archive, PathBuf::from("app-fixed.zip"));
            assert_eq!(args.repo, "demo");
        }
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_deploy_and_global_flags() {
    let cli = Cli::try_parse_from([
        "shipwright",
        "deploy",
        "--repo-url",
        "https://github.com/ada/demo",
        "--json",
        "--config",
        "ship.yaml",
    ])
    .unwrap();

    assert!(cli.json);
    assert_eq!(cli.config, Some(PathBuf::from("ship.yaml")));
    match cli.command {
        Commands::Deploy(args) => {
            assert_eq!(args.repo_url, "https://github.com/ada/demo");
            assert!(args.owner.is_none());
            assert!(args.name.is_none());
        }
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_tokens_come_from_flags_or_environment() {
    temp_env::with_vars(
        [
            ("ANTHROPIC_API_KEY", Some("sk-ant-from-env")),
            ("GITHUB_TOKEN", None::<&str>),
            ("RENDER_API_KEY", None::<&str>),
        ],
        || {
            let cli = Cli::try_parse_from(["shipwright", "owners", "--render-api-key", "rnd_flag"])
                .unwrap();
            assert!(matches!(cli.command, Commands::Owners));

            let credentials = cli.tokens.into_credentials();
            assert_eq!(credentials.require_anthropic().unwrap(), "sk-ant-from-env");
            assert_eq!(credentials.require_render().unwrap(), "rnd_flag");
            assert!(credentials.require_github().is_err());
        },
    );
}
