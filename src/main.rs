use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use veriscan::cli::{Cli, ColorChoice, Commands, InitArgs, ScanArgs};
use veriscan::config::Config;
use veriscan::deps::{Availability, Capability, DependencyState, NoInstaller};
use veriscan::orchestrator::{CancelToken, Orchestrator, ScanOptions};
use veriscan::output::{
    ColorMode, CsvFormatter, JsonFormatter, OutputFormat, ReportFormatter, ScanProgress,
    TextFormatter,
};
use veriscan::report::{default_report_stem, ScanReport};
use veriscan::{EXIT_CONFIG_ERROR, EXIT_ISSUES_FOUND, EXIT_SUCCESS};

const fn color_choice_to_mode(choice: ColorChoice) -> ColorMode {
    match choice {
        ColorChoice::Auto => ColorMode::Auto,
        ColorChoice::Always => ColorMode::Always,
        ColorChoice::Never => ColorMode::Never,
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_directive = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let exit_code = match &cli.command {
        Commands::Scan(args) => run_scan(args, &cli),
        Commands::Init(args) => run_init(args),
    };

    std::process::exit(exit_code);
}

fn run_scan(args: &ScanArgs, cli: &Cli) -> i32 {
    match run_scan_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_scan_impl(args: &ScanArgs, cli: &Cli) -> veriscan::Result<i32> {
    // 1. Load configuration
    let config = load_config(args, cli.no_config)?;

    // 2. Merge CLI argument overrides into scan options
    let options = build_options(args, &config);
    let format = resolve_format(args, &config)?;

    // 3. Determine engine availability for this run
    let deps = if args.basic_only {
        DependencyState::with_availability(Availability::Absent)
    } else {
        DependencyState::probe()
    };
    let negotiate = options.negotiate;
    if negotiate && !deps.is_available(Capability::AdvancedSpreadsheet) {
        tracing::warn!(
            "auto-install requested, but this build carries no installer for the advanced \
             spreadsheet engine; container-level verification continues"
        );
    }

    // 4. Wire up progress reporting and optional collaborators
    let progress = ScanProgress::new(0, cli.quiet);
    let discovered_handle = progress.clone();
    let file_handle = progress.clone();
    let mut orchestrator = Orchestrator::new(options, Arc::new(deps))
        .on_discovered(move |total| discovered_handle.set_total(total))
        .on_file(move |_| file_handle.inc());
    if negotiate {
        orchestrator = orchestrator.with_installer(Arc::new(NoInstaller));
    }

    // 5. Run the scan
    let token = CancelToken::new();
    let report = orchestrator.run(&token)?;
    progress.finish();

    // 6. Format the report
    let color_mode = color_choice_to_mode(cli.color);
    let output = format_report(format, &report, color_mode, cli.verbose)?;

    // 7. Write the report
    write_report(args, format, &report, &output, cli.quiet)?;

    // 8. Exit code reflects whether anything needs attention
    if report.summary.has_issues() {
        Ok(EXIT_ISSUES_FOUND)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

fn load_config(args: &ScanArgs, no_config: bool) -> veriscan::Result<Config> {
    if no_config {
        return Ok(Config::default());
    }

    if let Some(path) = &args.config {
        return Config::load(path);
    }

    // Discovery is opportunistic: look in the first scan root.
    let discovered = args.roots.first().and_then(|root| Config::discover(root));
    match discovered {
        Some(path) => Config::load(&path),
        None => Ok(Config::default()),
    }
}

fn build_options(args: &ScanArgs, config: &Config) -> ScanOptions {
    // --ext is sugar for one glob per extension.
    let mut patterns = args.filter.clone();
    if let Some(extensions) = &args.ext {
        patterns.extend(
            extensions
                .iter()
                .map(|ext| format!("*.{}", ext.trim_start_matches('.'))),
        );
    }
    if patterns.is_empty() {
        patterns = config.include.clone();
    }

    let file_timeout = if args.no_timeout {
        None
    } else {
        let secs = args.timeout.unwrap_or(config.timeout_secs);
        (secs > 0).then(|| Duration::from_secs(secs))
    };

    let workers = args
        .workers
        .or_else(|| (config.workers > 0).then_some(config.workers));

    ScanOptions {
        roots: args.roots.clone(),
        recursive: config.recursive && !args.no_recursive,
        patterns,
        workers,
        file_timeout,
        negotiate: args.auto_install || config.auto_install,
    }
}

fn resolve_format(args: &ScanArgs, config: &Config) -> veriscan::Result<OutputFormat> {
    // An explicit flag wins; otherwise the config decides.
    if let Some(format) = args.format {
        return Ok(format);
    }
    config
        .format
        .parse()
        .map_err(veriscan::VeriscanError::Config)
}

fn format_report(
    format: OutputFormat,
    report: &ScanReport,
    color_mode: ColorMode,
    verbose: u8,
) -> veriscan::Result<String> {
    match format {
        OutputFormat::Text => TextFormatter::with_verbose(color_mode, verbose).format(report),
        OutputFormat::Json => JsonFormatter.format(report),
        OutputFormat::Csv => CsvFormatter.format(report),
    }
}

fn write_report(
    args: &ScanArgs,
    format: OutputFormat,
    report: &ScanReport,
    content: &str,
    quiet: bool,
) -> veriscan::Result<()> {
    if let Some(path) = &args.output {
        fs::write(path, content)?;
        if !quiet {
            println!("Report written to {}", path.display());
        }
    } else if args.save {
        let name = format!(
            "{}.{}",
            default_report_stem(report.finished_at),
            format.extension()
        );
        fs::write(Path::new(&name), content)?;
        if !quiet {
            println!("Report written to {name}");
        }
    } else if !quiet {
        print!("{content}");
    }
    Ok(())
}

fn run_init(args: &InitArgs) -> i32 {
    match run_init_impl(args) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_init_impl(args: &InitArgs) -> veriscan::Result<()> {
    if args.output.exists() && !args.force {
        return Err(veriscan::VeriscanError::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            args.output.display()
        )));
    }

    fs::write(&args.output, Config::template())?;

    println!("Created configuration file: {}", args.output.display());
    Ok(())
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
