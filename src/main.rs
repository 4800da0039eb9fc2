use clap::Parser;
use env_logger::Env;
use log::info;
use optisketch::{
    console::{Args, PartialArgs},
    drawing::Recorder,
    error::{SkResult, SketchError},
    plottable::Plottable,
    Simulator,
};
use std::{fs, path::Path};

fn write_file(path: &Path, contents: &str, what: &str) -> SkResult<()> {
    fs::write(path, contents)
        .map_err(|e| SketchError::Other(format!("writing {what} to {} failed: {e}", path.display())))?;
    info!("{what} written to {}", path.display());
    Ok(())
}

fn main() -> SkResult<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    //parse CLI arguments and merge them with the configuration file
    let args = Args::try_from(PartialArgs::parse())?;

    //draw the diagram into a recorder
    let mut simulator = Simulator::with_model(args.config.to_model()?, Recorder::new());
    simulator.render()?;
    if args.config.trace_rays {
        simulator.trace_rays()?;
    }

    println!("{}\n", args.config.element.info());
    println!("{}", simulator.readout());

    if let Some(output) = &args.output {
        args.config.to_plot(output)?;
    }
    if let Some(commands) = &args.commands {
        write_file(commands, &simulator.surface().to_json()?, "draw commands")?;
    }
    if let Some(report) = &args.report {
        let readout = serde_json::to_string_pretty(&simulator.readout())
            .map_err(|e| SketchError::Other(format!("serialization of readout failed: {e}")))?;
        write_file(report, &readout, "readout")?;
    }
    Ok(())
}
