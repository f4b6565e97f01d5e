//! Command-line entry point: replays an intent script and prints the result.

#[cfg(feature = "native")]
use clap::Parser;
#[cfg(feature = "native")]
use std::path::PathBuf;

#[cfg(feature = "native")]
#[derive(Debug, Parser)]
#[command(
    name = "overlaid",
    about = "Replay an Overlaid intent script and print the final surface",
    version
)]
struct Args {
    /// Editor config JSON; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON array of intents.
    script: PathBuf,
}

#[cfg(feature = "native")]
fn main() -> std::process::ExitCode {
    use overlaid_core::{Editor, EditorConfig};
    use std::process::ExitCode;

    env_logger::init();
    let args = Args::parse();

    let config = match args.config {
        Some(path) => match overlaid_app::load_config(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => EditorConfig::default(),
    };

    log::info!("Replaying {}", args.script.display());
    let mut editor = Editor::with_config(config);
    let report = match overlaid_app::replay_file(&mut editor, &args.script) {
        Ok(report) => report,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&report) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("failed to encode report: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}

#[cfg(all(test, feature = "native"))]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn parses_script_and_config() {
        let args = Args::try_parse_from(["overlaid", "--config", "cfg.json", "run.json"])
            .expect("args should parse");
        assert_eq!(args.config, Some(PathBuf::from("cfg.json")));
        assert_eq!(args.script, PathBuf::from("run.json"));

        let args = Args::try_parse_from(["overlaid", "run.json"]).expect("args should parse");
        assert_eq!(args.config, None);
    }

    #[test]
    fn config_flag_requires_a_value() {
        let err = Args::try_parse_from(["overlaid", "run.json", "--config"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn rejects_unknown_flags_and_extra_scripts() {
        let err = Args::try_parse_from(["overlaid", "--verbose", "run.json"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);

        let err = Args::try_parse_from(["overlaid", "a.json", "b.json"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);

        let err = Args::try_parse_from(["overlaid"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }
}
