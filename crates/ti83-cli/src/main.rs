//! ti83: TI-83 keypad emulator for the terminal
//!
//! ## Usage
//!
//! ```bash
//! ti83 run 5 + 3 + 2 enter        # Print the screen after a key script
//! ti83 run --json --wait 1500 mode
//! ti83 eval "(2+3)*4"
//! ti83 interactive
//! ```

use clap::Parser;
use std::process::ExitCode;
use ti83_cli::{
    handlers, load_calculator_config, logging, terminal, Cli, CliConfig, CliResult, ColorChoice,
    Commands, Printer, Verbosity,
};
use ti83_core::config::CalculatorConfig;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let color = ColorChoice::from(cli.color);
    let printer = Printer::new(color.should_color(), cli.quiet);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            printer.error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let config = build_config(&cli)?;
    logging::init(config.verbosity, config.color.should_color());
    let printer = Printer::new(config.color.should_color(), config.verbosity.is_quiet());

    match cli.command {
        Commands::Run(args) => {
            let calculator = config.calculator_with(args.radians, args.legacy_restore);
            let snapshot = handlers::run_keys(calculator, &args.script(), args.wait);
            printer.lines(&handlers::render_run(&snapshot, args.json, printer.use_color)?)
        }
        Commands::Eval(args) => printer.line(&handlers::evaluate(&args.expr)),
        Commands::Interactive(args) => {
            let calculator = config.calculator_with(args.radians, args.legacy_restore);
            let outcome = terminal::run_interactive(calculator, printer.use_color)?;
            printer.info(&format!("{} keys pressed", outcome.keys_handled));
            Ok(())
        }
        Commands::Keys => printer.lines(&handlers::keys(printer.use_color)),
        Commands::Config(args) => printer.lines(&handlers::show_config(&config, args.json)?),
    }
}

fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    let calculator = match &cli.config {
        Some(path) => load_calculator_config(path)?,
        None => CalculatorConfig::default(),
    };
    Ok(CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.verbose, cli.quiet))
        .with_color(ColorChoice::from(cli.color))
        .with_calculator(calculator))
}
