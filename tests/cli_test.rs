//! CLI Command Tests
//!
//! Argument parsing, JSON output format, and exit codes.

// =============================================================================
// CLI Argument Parsing Tests
// =============================================================================

mod cli_parsing {
    use clap::Parser;
    use std::path::PathBuf;
    use subfetch::cli::{Cli, Command};

    #[test]
    fn test_hash_command_files() {
        let cli = Cli::parse_from(["subfetch", "hash", "a.mkv", "b.avi"]);
        match cli.command {
            Command::Hash(cmd) => {
                assert_eq!(cmd.files, vec![PathBuf::from("a.mkv"), PathBuf::from("b.avi")]);
            }
            _ => panic!("Expected Hash command"),
        }
    }

    #[test]
    fn test_hash_alias() {
        let cli = Cli::parse_from(["subfetch", "h", "a.mkv"]);
        assert!(matches!(cli.command, Command::Hash(_)));
    }

    #[test]
    fn test_hash_requires_a_file() {
        assert!(Cli::try_parse_from(["subfetch", "hash"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["subfetch", "hash", "a.mkv", "--json", "-q"]);
        assert!(cli.json);
        assert!(cli.quiet);
        assert!(cli.should_json());
    }

    #[test]
    fn test_config_command() {
        let cli = Cli::parse_from(["subfetch", "--config", "/tmp/sf.toml", "config", "--path"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/sf.toml")));
        match cli.command {
            Command::Config(cmd) => assert!(cmd.path),
            _ => panic!("Expected Config command"),
        }
    }

    #[test]
    fn test_config_init_flag() {
        let cli = Cli::parse_from(["subfetch", "config", "--init"]);
        match cli.command {
            Command::Config(cmd) => {
                assert!(cmd.init);
                assert!(!cmd.path);
            }
            _ => panic!("Expected Config command"),
        }
        assert!(Cli::try_parse_from(["subfetch", "config", "--init", "--path"]).is_err());
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["subfetch"]).is_err());
        assert!(Cli::try_parse_from(["subfetch", "search", "x"]).is_err());
    }
}

// =============================================================================
// Command Handler Tests
// =============================================================================

mod handlers {
    use subfetch::cli::{ConfigCmd, ExitCode, HashCmd, HashEntry, JsonOutput, Output};
    use subfetch::commands::{config_cmd, hash_cmd};

    fn quiet_json() -> Output {
        Output {
            json: true,
            quiet: true,
        }
    }

    #[test]
    fn test_hash_cmd_success() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mkv");
        std::fs::write(&path, vec![0u8; 131_072]).unwrap();

        let cmd = HashCmd { files: vec![path] };
        assert_eq!(hash_cmd(cmd, &quiet_json()), ExitCode::Success);
    }

    #[test]
    fn test_hash_cmd_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = HashCmd {
            files: vec![dir.path().join("missing.mkv")],
        };
        assert_eq!(hash_cmd(cmd, &quiet_json()), ExitCode::InvalidArgs);
    }

    #[test]
    fn test_config_cmd_with_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "language = \"hrv\"\n").unwrap();

        let cmd = ConfigCmd {
            path: false,
            init: false,
        };
        assert_eq!(config_cmd(cmd, Some(path.as_path()), &quiet_json()), ExitCode::Success);
    }

    #[test]
    fn test_config_cmd_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "language = [").unwrap();

        let cmd = ConfigCmd {
            path: false,
            init: false,
        };
        assert_eq!(config_cmd(cmd, Some(path.as_path()), &quiet_json()), ExitCode::InvalidArgs);
    }

    #[test]
    fn test_config_cmd_path_only() {
        let cmd = ConfigCmd {
            path: true,
            init: false,
        };
        let path = std::path::Path::new("/tmp/subfetch-test.toml");
        assert_eq!(config_cmd(cmd, Some(path), &quiet_json()), ExitCode::Success);
    }

    #[test]
    fn test_config_cmd_init_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh").join("config.toml");
        let cmd = ConfigCmd {
            path: false,
            init: true,
        };

        assert_eq!(config_cmd(cmd, Some(path.as_path()), &quiet_json()), ExitCode::Success);
        assert!(path.is_file());
    }

    #[test]
    fn test_hash_entry_json_shape() {
        let entry = HashEntry {
            path: "movie.avi".into(),
            hash: "0000000000020000".into(),
            size: 131_072,
        };
        let json = serde_json::to_value(JsonOutput::success(vec![entry])).unwrap();
        assert_eq!(json["data"][0]["hash"], "0000000000020000");
        assert_eq!(json["data"][0]["size"], 131_072);
        assert!(json.get("error").is_none());
    }
}
