use syscontainer_lint::cli::CliArgs;
use syscontainer_lint::util::{init_logging, parse_level, LoggingConfig};
use syscontainer_lint::{LintConfig, LintError, Linter, RealFileSystem, Reporter, VERSION};

use clap::Parser;
use std::io::Write;
use tracing::{debug, error, Level};

fn main() {
    // clap exits with 2 on usage errors; the documented contract is 1.
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let config = match LintConfig::from_env().and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(LoggingConfig::new(log_level(&args, &config), args.format));
    debug!("syscontainer-lint v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = if config.preprocess {
        handle_preprocess(&args)
    } else {
        handle_lint(&args, &config)
    };

    std::process::exit(exit_code);
}

fn log_level(args: &CliArgs, config: &LintConfig) -> Level {
    if let Some(level_str) = &args.log_level {
        parse_level(level_str)
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        parse_level(&config.log_level)
    }
}

fn handle_lint(args: &CliArgs, config: &LintConfig) -> i32 {
    let color = args.color.unwrap_or(config.color);
    let mut reporter = Reporter::stdout(color, args.format);
    let linter = Linter::with_git(Box::new(RealFileSystem::new()));

    match linter.run(&args.build_path, &mut reporter) {
        Ok(()) => reporter.exit_code(),
        Err(e) => {
            error!("lint aborted: {}", e);
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn handle_preprocess(args: &CliArgs) -> i32 {
    let linter = Linter::with_git(Box::new(RealFileSystem::new()));

    let result = args
        .template
        .as_deref()
        .ok_or(LintError::MissingTemplate)
        .and_then(|template| linter.preprocess(&args.build_path, template));

    match result {
        Ok(output) => {
            let mut stdout = std::io::stdout();
            let _ = stdout.write_all(output.as_bytes());
            let _ = stdout.flush();
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}
