pub mod commands;

use clap::{Arg, ArgAction, Command};

pub use commands::handle_subcommands;

pub fn build_cli() -> Command {
    Command::new("nmea-fix")
        .version(crate::VERSION)
        .about("Reads NMEA 0183 GPS sentences and maintains the current navigation fix")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .global(true)
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .value_name("PORT")
                .global(true)
                .help("Serial port the receiver is attached to"),
        )
        .arg(
            Arg::new("baud")
                .short('b')
                .long("baud")
                .value_name("RATE")
                .global(true)
                .help("Serial baud rate"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .value_parser(["console", "json", "csv"])
                .global(true)
                .help("Report format"),
        )
        .arg(
            Arg::new("output-file")
                .short('o')
                .long("output-file")
                .value_name("FILE")
                .global(true)
                .help("Also write reports to this file"),
        )
        .arg(
            Arg::new("log-level")
                .short('l')
                .long("log-level")
                .value_name("LEVEL")
                .value_parser(["error", "warn", "info", "debug", "trace"])
                .global(true)
                .help("Log filter used when RUST_LOG is not set"),
        )
        .arg(
            Arg::new("no-init")
                .long("no-init")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Do not send the configuration command to the receiver"),
        )
        .subcommand(Command::new("monitor").about("Stream fixes from the serial receiver until Ctrl+C"))
        .subcommand(
            Command::new("replay")
                .about("Feed a recorded NMEA log through the parser")
                .arg(Arg::new("file").required(true).help("Recorded NMEA log")),
        )
        .subcommand(
            Command::new("check")
                .about("Validate and parse a single sentence")
                .arg(
                    Arg::new("sentence")
                        .required(true)
                        .help("Sentence such as '$GPGLL,4916.45,N,12311.12,W,225444,A,A*5C'"),
                ),
        )
        .subcommand(Command::new("ports").about("List available serial ports"))
        .subcommand(
            Command::new("init-config")
                .about("Write a default configuration file")
                .arg(Arg::new("path").required(true).help("Destination TOML file")),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_global_overrides_after_subcommand() {
        let matches = build_cli()
            .try_get_matches_from(["nmea-fix", "replay", "track.nmea", "--format", "csv", "--no-init"])
            .unwrap();

        assert_eq!(matches.get_one::<String>("format").map(String::as_str), Some("csv"));
        assert!(matches.get_flag("no-init"));
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "replay");
        assert_eq!(sub.get_one::<String>("file").map(String::as_str), Some("track.nmea"));
    }

    #[test]
    fn test_rejects_unknown_format() {
        let result = build_cli().try_get_matches_from(["nmea-fix", "--format", "xml", "ports"]);
        assert!(result.is_err());
    }
}
