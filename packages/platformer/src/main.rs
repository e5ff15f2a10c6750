
#[macro_use]
extern crate tracing;

use platformer::{
    logging::init_logging,
    settings::{Settings, SETTINGS_FILE_NAME},
    headless::{
        run_headless,
        DEMO_SCRIPT,
        HEADLESS_ENV,
    },
    app::run_window,
    render::TraceRenderer,
};
use std::{
    env::{
        self,
        args,
    },
    process::exit,
};
use anyhow::*;


const CLI_INTRO: &'static str = "Tiny Platformer.";

const CLI_HELP: &'static str = r#"
Controls:

    A/D or Left/Right: Move
    Space/W/Up: Jump (W/Up while standing in a door: Enter)
    PgUp/PgDn: Gravity +/-
    -/=: Jump strength -/+
    R: Reset, Esc: Quit
    /: Type a cheat code, then Enter (bNAME board, r reset, gN gravity, jN jump)

Examples:

    [this command]
    Run the game in a window.

    [this command] --board=vault --settings=my_settings.json
    Run the game with explicit options.

    [this command] --headless --frames=120
    Run a scripted demo without a window for 120 frames.

Env var examples:
    RUST_LOG=platformer=trace
    Changes logging levels

    PLATFORMER_HEADLESS_TEST=1
    Forces headless mode"#;


fn main() {
    println!("{}", CLI_INTRO);
    if let Err(e) = init_logging() {
        eprintln!("unable to initialize logging: {:?}", e);
    }

    let args = args().collect::<Vec<_>>();
    if args.get(1).map(String::as_str) == Some("--help") {
        println!("{}", CLI_HELP);
        return;
    }
    if let Err(e) = run_from_cli(&args) {
        error!("{:?}", e);
        exit(1);
    }
}

// value of the first `--name=value` style arg with the given prefix
fn arg_value<'a>(args: &'a [String], prefix: &str) -> Option<&'a str> {
    args.iter()
        .filter_map(|arg| arg.strip_prefix(prefix))
        .next()
}

// parse CLI args and run the game from that
fn run_from_cli(args: &[String]) -> Result<()> {
    let settings_path = arg_value(args, "--settings=").unwrap_or(SETTINGS_FILE_NAME);
    let mut settings = Settings::read(settings_path);
    if let Some(board) = arg_value(args, "--board=") {
        settings.start_board = board.to_owned();
    }
    let frames = arg_value(args, "--frames=")
        .map(|frames| frames.parse::<u64>()
            .with_context(|| format!("invalid frame count {:?}", frames)))
        .transpose()?;
    let headless = args.iter().any(|arg| arg == "--headless")
        || env::var_os(HEADLESS_ENV).is_some();

    if headless {
        let frames = frames.unwrap_or(settings.headless_frames);
        let state = run_headless(&settings, frames, DEMO_SCRIPT, &mut TraceRenderer::new())?;
        info!(frames = state.frame(), board = %state.board.id, "headless run finished");
    } else {
        info!("starting windowed game");
        run_window(&settings, frames)?;
    }
    Ok(())
}
