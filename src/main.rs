use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, anyhow};
use clap::Parser;

use regex_validator::app::App;
use regex_validator::logging::{LogConfig, LogTarget, init_logging};
use regex_validator::screen::Screen;
use regex_validator::terminal::{CrosstermTerminal, Terminal};
use regex_validator::{OptionSet, Session, Status, presets, report};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Initial pattern, without surrounding slashes
    #[arg(value_name = "PATTERN")]
    pattern: Option<String>,

    /// Initial sample text
    #[arg(short = 't', long, value_name = "TEXT")]
    text: Option<String>,

    /// Initial modifier codes, e.g. "gi"
    #[arg(short = 'f', long, value_name = "CODES", default_value = "g")]
    flags: String,

    /// Start from a preset (overrides PATTERN)
    #[arg(short = 'p', long, value_name = "NAME")]
    preset: Option<String>,

    /// Print the preset library and exit
    #[arg(short = 'l', long)]
    list_presets: bool,

    /// Batch mode: print a report and exit
    #[arg(short = 'M', long)]
    batch: bool,

    /// Batch mode: also print the clipboard literal
    #[arg(short = 'c', long)]
    copy: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Write logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run(args: &Args) -> Result<ExitCode> {
    let target = match (&args.log_file, args.batch || args.list_presets) {
        (Some(path), _) => LogTarget::File(path.clone()),
        (None, true) => LogTarget::Stderr,
        // The form owns the terminal.
        (None, false) => LogTarget::Off,
    };
    let log_config = LogConfig::from_verbosity(args.verbose).with_target(target);
    init_logging(&log_config).context("failed to initialise logging")?;

    if args.list_presets {
        print!("{}", report::render_presets());
        return Ok(ExitCode::SUCCESS);
    }

    let session = build_session(args)?;

    if args.batch {
        print!("{}", report::render(&session));
        if args.copy {
            println!("{}", session.clipboard_literal());
        }
        return Ok(ExitCode::from(batch_exit_code(&session)));
    }

    let mut terminal = CrosstermTerminal::new();
    let mut app = App::new(session, Screen::new(terminal.size()));
    app.run(&mut terminal)?;
    Ok(ExitCode::SUCCESS)
}

fn build_session(args: &Args) -> Result<Session> {
    let options = OptionSet::from_modifiers(&args.flags)
        .with_context(|| format!("invalid --flags {:?}", args.flags))?;

    let mut session = Session::default();
    session.set_options(options);
    match &args.preset {
        Some(name) => {
            let preset = presets::find(name)
                .ok_or_else(|| anyhow!("unknown preset {name:?}, see --list-presets"))?;
            session.apply_preset(preset);
        }
        None => {
            if let Some(pattern) = &args.pattern {
                session.set_pattern(pattern);
            }
        }
    }
    if let Some(text) = &args.text {
        session.set_sample(text);
    }
    tracing::info!(pattern = session.pattern(), modifiers = %session.modifiers(), "session ready");
    Ok(session)
}

/// 0 matches or undetermined, 1 no match, 2 pattern does not compile.
fn batch_exit_code(session: &Session) -> u8 {
    if session.validation().compile_error().is_some() {
        return 2;
    }
    match session.status() {
        Status::DoesNotMatch => 1,
        Status::Matches | Status::Unknown => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("regex-validator").chain(argv.iter().copied()))
            .expect("valid arguments")
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]);
        assert_eq!(args.flags, "g");
        assert!(!args.batch);
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_build_session_from_pattern_and_text() {
        let args = parse(&["-M", "-f", "gi", "-t", "ABC", "^[a-z]+$"]);
        let session = build_session(&args).expect("session");
        assert_eq!(session.modifiers().as_str(), "gi");
        assert_eq!(session.status(), Status::Matches);
        assert_eq!(batch_exit_code(&session), 0);
    }

    #[test]
    fn test_preset_overrides_pattern() {
        let args = parse(&["--preset", "HEX", "ignored"]);
        let session = build_session(&args).expect("session");
        assert_eq!(session.pattern(), presets::find("hex").map_or("", |p| p.pattern));
    }

    #[test]
    fn test_bad_flags_and_preset_are_errors() {
        assert!(build_session(&parse(&["-f", "gx"])).is_err());
        assert!(build_session(&parse(&["-f", "gg"])).is_err());
        assert!(build_session(&parse(&["-p", "zip"])).is_err());
    }

    #[test]
    fn test_batch_exit_codes() {
        let no_match = build_session(&parse(&["-t", "abc", r"^\d+$"])).expect("session");
        assert_eq!(batch_exit_code(&no_match), 1);

        let broken = build_session(&parse(&["-t", "abc", "a("])).expect("session");
        assert_eq!(batch_exit_code(&broken), 2);

        let no_sample = build_session(&parse(&["a+"])).expect("session");
        assert_eq!(batch_exit_code(&no_sample), 0);
    }

    #[test]
    fn test_verbosity_counts() {
        assert_eq!(parse(&["-vvv"]).verbose, 3);
    }
}
