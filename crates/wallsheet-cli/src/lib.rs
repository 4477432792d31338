pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command, GenerateArgs, ValidateArgs};

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::Path,
    process,
};

use log::{info, warn};

use wallsheet::{
    ProfileReport, SheetBuilder, WallSheetError, config::AppConfig, request::SheetRequest,
};

/// Run the wallsheet tool with the given arguments.
///
/// # Errors
///
/// Returns [`WallSheetError`] if the configuration or request cannot be
/// loaded, the sheet cannot be built, or the output cannot be written.
pub fn run(args: &Args) -> Result<(), WallSheetError> {
    let config = config::load_config(args.config.as_ref())?;

    match &args.command {
        Command::Generate(generate) => run_generate(generate, config),
        Command::Validate(validate) => run_validate(validate, config),
    }
}

fn read_request(input: impl AsRef<Path>) -> Result<SheetRequest, WallSheetError> {
    let input = input.as_ref();
    info!(input = input.display().to_string(); "Reading request");
    let source = fs::read_to_string(input)?;
    Ok(SheetRequest::from_json(&source)?)
}

fn run_generate(args: &GenerateArgs, mut config: AppConfig) -> Result<(), WallSheetError> {
    if let Some(format) = args.format {
        config = config.with_format(format);
    }
    if let Some(directory) = &args.output_dir {
        config = config.with_output_dir(directory);
    }
    if args.viewer.is_some() {
        config = config.with_viewer(args.viewer.clone());
    }

    let request = read_request(&args.input)?;
    let builder = SheetBuilder::new(config);
    let path = builder.write(&request)?;

    info!(path = path.display().to_string(); "Sheet written successfully");
    println!("{}", path.display());

    if args.open {
        open_in_viewer(builder.config().output().viewer(), &path);
    }

    Ok(())
}

fn run_validate(args: &ValidateArgs, config: AppConfig) -> Result<(), WallSheetError> {
    let request = read_request(&args.input)?;
    let profile = SheetBuilder::new(config).profile(&request)?;
    let report = ProfileReport::new(&profile);

    match &args.output {
        Some(output) => {
            let mut writer = BufWriter::new(File::create(output)?);
            serde_json::to_writer_pretty(&mut writer, &report).map_err(io::Error::from)?;
            writeln!(writer)?;
            writer.flush()?;
            info!(output = output.as_str(); "Profile report written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, &report).map_err(io::Error::from)?;
            writeln!(stdout)?;
        }
    }

    Ok(())
}

/// Launch the viewer on a written sheet. Failures never fail the run.
fn open_in_viewer(viewer: Option<&str>, path: &Path) {
    let Some(viewer) = viewer else {
        warn!("No viewer configured, skipping --open");
        return;
    };

    match process::Command::new(viewer).arg(path).spawn() {
        Ok(child) => info!(viewer, pid = child.id(); "Viewer launched"),
        Err(err) => warn!(viewer, err:err; "Failed to launch viewer"),
    }
}
