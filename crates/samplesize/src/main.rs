use clap::Parser;
use samplesize::cli::Cli;
use samplesize::init_logging;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.log_file.as_deref())?;

    tracing::debug!(command = ?cli.command, format = ?cli.format, "parsed arguments");

    let (report, explain) = cli.command.build_report()?;
    let output = report.render(cli.format, explain)?;
    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }

    Ok(())
}
