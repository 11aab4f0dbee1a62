use std::path::PathBuf;
use std::process::ExitCode;

use roomboard_editor_lib::command::execute_json_batch;
use roomboard_editor_lib::harness::TestHarness;
use roomboard_editor_lib::state::{EditorSettings, MoodboardSession, RoomSession};

/// Command-line options of the headless editor
#[derive(Debug, Default)]
struct CliArgs {
    design: Option<PathBuf>,
    moodboard: Option<PathBuf>,
    commands: Option<PathBuf>,
    /// Start from the autosaved room and moodboard
    resume: bool,
    /// Write autosaves after the script ran
    autosave: bool,
    /// Print the moodboard instead of the room design
    print_moodboard: bool,
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = CliArgs::default();
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        let mut path = |flag: &str| {
            it.next()
                .map(PathBuf::from)
                .ok_or_else(|| format!("{flag} requires a path"))
        };
        match arg.as_str() {
            "--design" => args.design = Some(path("--design")?),
            "--moodboard" => args.moodboard = Some(path("--moodboard")?),
            "--commands" => args.commands = Some(path("--commands")?),
            "--resume" => args.resume = true,
            "--autosave" => args.autosave = true,
            "--print-moodboard" => args.print_moodboard = true,
            other => return Err(format!("Unknown argument: {other}")),
        }
    }
    Ok(args)
}

fn run(args: CliArgs) -> Result<String, String> {
    let mut h = TestHarness::with_settings(EditorSettings::load());

    if args.resume {
        if let Some(design) = RoomSession::load_autosave() {
            tracing::info!("Resumed room design '{}' from autosave", design.name);
            h.room_mut().replace_design(design);
        }
        if let Some(doc) = MoodboardSession::load_autosave() {
            tracing::info!("Resumed moodboard '{}' from autosave", doc.name);
            h.moodboard_mut().replace_document(doc);
        }
    }
    if let Some(path) = &args.design {
        h.room_mut().load_from_file(path)?;
    }
    if let Some(path) = &args.moodboard {
        h.moodboard_mut().load_from_file(path)?;
    }

    if let Some(path) = &args.commands {
        let script = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
        let responses = execute_json_batch(&mut h, &script)?;
        for (i, resp) in responses.iter().enumerate() {
            match &resp.error {
                Some(e) => tracing::warn!("Command {i} failed: {e}"),
                None => tracing::debug!("Command {i}: {:?}", resp.data),
            }
        }
        tracing::info!("Executed {} commands", responses.len());
    }

    if args.autosave {
        h.room().autosave();
        h.moodboard().autosave();
    }

    if args.print_moodboard {
        h.moodboard().to_json()
    } else {
        h.room().to_json()
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roomboard_editor=info".into()),
        )
        .init();

    let result = parse_args().and_then(run);
    match result {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
