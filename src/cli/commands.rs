use crate::report::{ColorChoice, OutputFormat};
use clap::Parser;
use std::path::PathBuf;

/// Lint a system container build directory
#[derive(Parser, Debug)]
#[command(
    name = "syscontainer-lint",
    about = "Lint a system container build directory before it is built",
    version,
    long_about = "syscontainer-lint checks the Dockerfile, config.json.template, \
                  service.template, tmpfiles.template and manifest.json of a system \
                  container build directory against the packaging conventions.\n\n\
                  Warnings are advisory; any error makes the command exit with status 1.\n\n\
                  With SYSCONTAINER_LINT_PREPROCESS=1 the command instead prints TEMPLATE \
                  with the manifest defaults of BUILD_PATH substituted.\n\n\
                  Examples:\n  \
                  syscontainer-lint ./etcd\n  \
                  syscontainer-lint --format json ./etcd\n  \
                  SYSCONTAINER_LINT_PREPROCESS=1 syscontainer-lint ./etcd ./etcd/service.template"
)]
pub struct CliArgs {
    #[arg(value_name = "BUILD_PATH", help = "Directory containing the Dockerfile")]
    pub build_path: PathBuf,

    #[arg(
        value_name = "TEMPLATE",
        help = "Template to substitute (preprocess mode only)"
    )]
    pub template: Option<PathBuf>,

    #[arg(long, value_enum, help = "When to color diagnostics [default: auto]")]
    pub color: Option<ColorChoice>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormat,

    #[arg(long, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        conflicts_with = "verbose",
        help = "Quiet mode - only log errors"
    )]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_defaults() {
        let args = CliArgs::try_parse_from(["syscontainer-lint", "/srv/etcd"]).unwrap();
        assert_eq!(args.build_path, PathBuf::from("/srv/etcd"));
        assert!(args.template.is_none());
        assert!(args.color.is_none());
        assert_eq!(args.format, OutputFormat::Human);
    }

    #[test]
    fn test_parse_all_options() {
        let args = CliArgs::try_parse_from([
            "syscontainer-lint",
            "--color",
            "never",
            "-f",
            "json",
            "-v",
            "/srv/etcd",
            "/srv/etcd/service.template",
        ])
        .unwrap();
        assert_eq!(args.color, Some(ColorChoice::Never));
        assert_eq!(args.format, OutputFormat::Json);
        assert!(args.verbose);
        assert_eq!(
            args.template,
            Some(PathBuf::from("/srv/etcd/service.template"))
        );
    }

    #[test]
    fn test_missing_path_is_error() {
        assert!(CliArgs::try_parse_from(["syscontainer-lint"]).is_err());
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(CliArgs::try_parse_from(["syscontainer-lint", "-v", "-q", "."]).is_err());
    }
}
