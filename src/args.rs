//! Command-line argument parsing.
//!
//! ```text
//! nighttemp [OPTIONS] [COMMAND]
//!
//! serve   [--bind <addr>] [--port <n>]
//! get     --lat <deg> --lng <deg> [--at <rfc3339>] [--provider <name>]
//! compute --twilight-begin <t> --sunrise <t> --sunset <t> --twilight-end <t> [--at <rfc3339>]
//! ```
//!
//! Without a command nighttemp serves HTTP. Value flags accept both
//! `--lat 40.7` and `--lat=40.7`; the separate form consumes the next
//! argument even when it starts with `-`, so `--lng -74.0` works.

use chrono::{DateTime, Utc};

use crate::common::utils::parse_time_of_day;
use crate::phases::RawSunPhases;
use crate::provider::ProviderKind;

/// Options accepted by every command.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalOptions {
    pub debug_enabled: bool,
    pub config_dir: Option<String>,
    pub log_file: Option<String>,
}

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Run the HTTP service
    Serve {
        options: GlobalOptions,
        bind: Option<String>,
        port: Option<u16>,
    },
    /// Evaluate once for a position, asking a provider for the phases
    Get {
        options: GlobalOptions,
        latitude: f64,
        longitude: f64,
        at: Option<DateTime<Utc>>,
        provider: Option<ProviderKind>,
    },
    /// Evaluate once from phases given on the command line
    Compute {
        options: GlobalOptions,
        phases: RawSunPhases,
        at: Option<DateTime<Utc>>,
    },
    /// `nighttemp help [COMMAND]`
    Help { command: Option<String> },
    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to invalid arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

/// Flags that take a value, with the commands allowed to use them.
const VALUE_FLAGS: &[(&str, &[&str])] = &[
    ("--config", &[]),
    ("--log", &[]),
    ("--bind", &["serve"]),
    ("--port", &["serve"]),
    ("--lat", &["get"]),
    ("--lng", &["get"]),
    ("--provider", &["get"]),
    ("--at", &["get", "compute"]),
    ("--twilight-begin", &["compute"]),
    ("--sunrise", &["compute"]),
    ("--sunset", &["compute"]),
    ("--twilight-end", &["compute"]),
];

const COMMANDS: &[&str] = &["serve", "get", "compute", "help"];

/// Raw scan of the argument list before per-command interpretation.
#[derive(Default)]
struct Scan {
    command: Option<String>,
    positional: Vec<String>,
    values: Vec<(&'static str, String)>,
    options: GlobalOptions,
}

impl Scan {
    fn value(&self, flag: &str) -> Option<&str> {
        self.values
            .iter()
            .rev()
            .find(|(name, _)| *name == flag)
            .map(|(_, value)| value.as_str())
    }

    fn required(&self, flag: &str) -> Result<&str, String> {
        self.value(flag)
            .ok_or_else(|| format!("Missing required option {flag}"))
    }
}

impl ParsedArgs {
    /// Parse command-line arguments into a structured result.
    ///
    /// `args` includes the program name, as `std::env::args()` does.
    /// Problems are logged as warnings and turn into
    /// [`CliAction::ShowHelpDueToError`].
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        let action = match scan(&args_vec).and_then(interpret) {
            Ok(action) => action,
            Err(message) => {
                log_warning!("{}", message);
                CliAction::ShowHelpDueToError
            }
        };

        ParsedArgs { action }
    }

    /// Convenience method to parse from std::env::args()
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }
}

fn scan(args: &[String]) -> Result<Scan, String> {
    let mut scan = Scan::default();
    let mut idx = 0;

    while idx < args.len() {
        let arg = args[idx].as_str();
        idx += 1;

        match arg {
            "--help" | "-h" => {
                return Ok(Scan {
                    command: Some("--help".to_string()),
                    ..Scan::default()
                });
            }
            "--version" | "-V" | "-v" => {
                return Ok(Scan {
                    command: Some("--version".to_string()),
                    ..Scan::default()
                });
            }
            "--debug" | "-d" => scan.options.debug_enabled = true,
            _ if arg.starts_with('-') && arg.len() > 1 => {
                let (flag, inline_value) = match arg.split_once('=') {
                    Some((flag, value)) => (flag, Some(value.to_string())),
                    None => (arg, None),
                };
                let flag = if flag == "-c" { "--config" } else { flag };

                let Some((name, _)) = VALUE_FLAGS.iter().find(|(name, _)| *name == flag) else {
                    return Err(format!("Unknown option: {arg}"));
                };

                let value = match inline_value {
                    Some(value) => value,
                    None => {
                        let value = args
                            .get(idx)
                            .cloned()
                            .ok_or_else(|| format!("Missing value for {flag}"))?;
                        idx += 1;
                        value
                    }
                };

                match *name {
                    "--config" => scan.options.config_dir = Some(value),
                    "--log" => scan.options.log_file = Some(value),
                    _ => scan.values.push((*name, value)),
                }
            }
            _ if scan.command.is_none() => {
                if !COMMANDS.contains(&arg) {
                    return Err(format!("Unknown command: {arg}"));
                }
                scan.command = Some(arg.to_string());
            }
            _ => scan.positional.push(arg.to_string()),
        }
    }

    Ok(scan)
}

fn interpret(scan: Scan) -> Result<CliAction, String> {
    let command = scan.command.clone().unwrap_or_else(|| "serve".to_string());

    match command.as_str() {
        "--help" => return Ok(CliAction::ShowHelp),
        "--version" => return Ok(CliAction::ShowVersion),
        "help" => {
            return Ok(CliAction::Help {
                command: scan.positional.first().cloned(),
            });
        }
        _ => {}
    }

    if let Some(extra) = scan.positional.first() {
        return Err(format!("Unexpected argument '{extra}' for {command}"));
    }

    for (flag, _) in &scan.values {
        let allowed = VALUE_FLAGS
            .iter()
            .find(|(name, _)| name == flag)
            .map(|(_, commands)| commands.contains(&command.as_str()))
            .unwrap_or(false);
        if !allowed {
            return Err(format!("Option {flag} is not valid for {command}"));
        }
    }

    let options = scan.options.clone();
    let at = scan.value("--at").map(parse_instant).transpose()?;

    match command.as_str() {
        "serve" => Ok(CliAction::Serve {
            options,
            bind: scan.value("--bind").map(str::to_string),
            port: scan
                .value("--port")
                .map(|p| {
                    p.parse::<u16>()
                        .map_err(|_| format!("Invalid port '{p}' (expected 0-65535)"))
                })
                .transpose()?,
        }),
        "get" => Ok(CliAction::Get {
            options,
            latitude: parse_degrees("--lat", scan.required("--lat")?)?,
            longitude: parse_degrees("--lng", scan.required("--lng")?)?,
            at,
            provider: scan
                .value("--provider")
                .map(|p| p.parse::<ProviderKind>().map_err(|e| e.to_string()))
                .transpose()?,
        }),
        "compute" => {
            let time = |flag: &str| -> Result<_, String> {
                let raw = scan.required(flag)?;
                parse_time_of_day(raw).ok_or_else(|| {
                    format!("Invalid time '{raw}' for {flag} (expected h:mm:ss AM/PM or HH:MM:SS)")
                })
            };
            Ok(CliAction::Compute {
                options,
                phases: RawSunPhases::new(
                    time("--twilight-begin")?,
                    time("--sunrise")?,
                    time("--sunset")?,
                    time("--twilight-end")?,
                ),
                at,
            })
        }
        other => Err(format!("Unknown command: {other}")),
    }
}

fn parse_degrees(flag: &str, raw: &str) -> Result<f64, String> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| format!("Invalid value '{raw}' for {flag} (expected degrees)"))
}

fn parse_instant(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("Invalid --at '{raw}': {e} (expected e.g. 2024-03-20T17:45:00Z)"))
}

/// Displays version information using custom logging style.
pub fn display_version_info() {
    log_version!();
    log_pipe!();
    log_decorated!(env!("CARGO_PKG_DESCRIPTION"));
    log_end!();
}

/// Displays custom help message using logger methods.
pub fn display_help() {
    log_version!();
    log_block_start!(env!("CARGO_PKG_DESCRIPTION"));
    log_block_start!("Usage:");
    log_indented!("nighttemp [OPTIONS] [COMMAND]");
    log_block_start!("Options:");
    log_indented!("-c, --config <dir>     Use custom configuration directory");
    log_indented!("-d, --debug            Enable detailed debug output");
    log_indented!("    --log <file>       Write output to a file instead of the terminal");
    log_indented!("-h, --help             Print help information");
    log_indented!("-V, --version          Print version information");
    log_block_start!("Commands:");
    log_indented!("serve                  Run the HTTP service (default)");
    log_indented!("get --lat --lng        Temperature for a position, now or --at");
    log_indented!("compute                Temperature from explicit sun phase times");
    log_indented!("help [COMMAND]         Show detailed help for a command");
    log_end!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, TimeZone};

    fn parse(args: &[&str]) -> CliAction {
        let mut full = vec!["nighttemp"];
        full.extend_from_slice(args);
        ParsedArgs::parse(full).action
    }

    #[test]
    fn test_parse_no_args_serves() {
        assert_eq!(
            parse(&[]),
            CliAction::Serve {
                options: GlobalOptions::default(),
                bind: None,
                port: None,
            }
        );
    }

    #[test]
    fn test_parse_serve_with_options() {
        assert_eq!(
            parse(&["serve", "--bind", "0.0.0.0", "--port=8080", "-d", "-c", "/tmp/cfg"]),
            CliAction::Serve {
                options: GlobalOptions {
                    debug_enabled: true,
                    config_dir: Some("/tmp/cfg".to_string()),
                    log_file: None,
                },
                bind: Some("0.0.0.0".to_string()),
                port: Some(8080),
            }
        );
    }

    #[test]
    fn test_parse_get_with_negative_longitude() {
        let action = parse(&[
            "get",
            "--lat",
            "40.7128",
            "--lng",
            "-74.0060",
            "--at",
            "2024-03-20T17:45:00-04:00",
            "--provider",
            "solar",
        ]);
        assert_eq!(
            action,
            CliAction::Get {
                options: GlobalOptions::default(),
                latitude: 40.7128,
                longitude: -74.006,
                at: Some(Utc.with_ymd_and_hms(2024, 3, 20, 21, 45, 0).unwrap()),
                provider: Some(ProviderKind::Solar),
            }
        );
    }

    #[test]
    fn test_parse_compute() {
        let action = parse(&[
            "--log",
            "/tmp/nighttemp.log",
            "compute",
            "--twilight-begin",
            "5:30:00 AM",
            "--sunrise",
            "6:00:00 AM",
            "--sunset",
            "18:00:00",
            "--twilight-end=6:30:00 PM",
        ]);

        let CliAction::Compute {
            options,
            phases,
            at,
        } = action
        else {
            panic!("expected compute, got {action:?}");
        };
        assert_eq!(options.log_file.as_deref(), Some("/tmp/nighttemp.log"));
        assert_eq!(phases.morning_twilight, NaiveTime::from_hms_opt(5, 30, 0).unwrap());
        assert_eq!(phases.sunset, NaiveTime::from_hms_opt(18, 0, 0).unwrap());
        assert_eq!(phases.night_twilight, NaiveTime::from_hms_opt(18, 30, 0).unwrap());
        assert_eq!(at, None);
    }

    #[test]
    fn test_parse_help_and_version() {
        assert_eq!(parse(&["--help"]), CliAction::ShowHelp);
        assert_eq!(parse(&["get", "-h"]), CliAction::ShowHelp);
        assert_eq!(parse(&["-V"]), CliAction::ShowVersion);
        assert_eq!(
            parse(&["help", "compute"]),
            CliAction::Help {
                command: Some("compute".to_string())
            }
        );
        assert_eq!(parse(&["help"]), CliAction::Help { command: None });
    }

    #[test]
    fn test_parse_errors() {
        crate::common::logger::Log::set_enabled(false);

        let cases: &[&[&str]] = &[
            &["frobnicate"],
            &["--unknown"],
            &["get", "--lat", "40"],
            &["get", "--lat", "north", "--lng", "0"],
            &["get", "--lat", "1", "--lng", "2", "--provider", "pigeon"],
            &["get", "--lat", "1", "--lng", "2", "--at", "yesterday"],
            &["serve", "--port", "99999"],
            &["serve", "--lat", "1"],
            &["serve", "extra"],
            &["compute", "--sunrise", "6:00:00 AM"],
            &["get", "--lat"],
        ];

        for args in cases {
            assert_eq!(parse(args), CliAction::ShowHelpDueToError, "args: {args:?}");
        }

        crate::common::logger::Log::set_enabled(true);
    }
}
