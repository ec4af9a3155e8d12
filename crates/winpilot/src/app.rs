use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, value_parser};

pub fn build_cli() -> Command {
    Command::new("winpilot")
        .about("Move, resize and inspect macOS application windows across displays")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Config file (default: <config dir>/winpilot/config.toml)")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .value_name("SECS")
                .help("Timeout for each osascript/system_profiler call")
                .value_parser(value_parser!(u64).range(1..))
                .global(true),
        )
        .arg(
            Arg::new("log-format")
                .long("log-format")
                .help("Log output format")
                .value_parser(["pretty", "json"])
                .global(true),
        )
        .subcommand(
            Command::new("serve")
                .about("Serve the window tools as JSON-RPC over stdin/stdout (default)"),
        )
        .subcommand(
            Command::new("list")
                .about("List windows or screens")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    Command::new("windows")
                        .about("List visible windows")
                        .arg(
                            Arg::new("app")
                                .long("app")
                                .value_name("NAME")
                                .help("Only list windows of this application, with their indices"),
                        )
                        .arg(json_arg()),
                )
                .subcommand(
                    Command::new("screens")
                        .about("List connected displays")
                        .arg(json_arg()),
                ),
        )
        .subcommand(
            Command::new("move")
                .about("Move an application's frontmost window to a screen using a preset")
                .arg(
                    Arg::new("app")
                        .help("Application name, e.g. \"Google Chrome\"")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("screen")
                        .long("screen")
                        .short('s')
                        .help("Target screen index (0 = main display)")
                        .value_parser(value_parser!(i64))
                        .allow_negative_numbers(true)
                        .default_value("0"),
                )
                .arg(
                    Arg::new("position")
                        .long("position")
                        .short('p')
                        .help("center, maximize, left-half, right-half, top-half, bottom-half or custom")
                        .required(true),
                )
                .arg(offset_arg("x-offset", "X offset from the screen's left edge (custom)"))
                .arg(offset_arg("y-offset", "Y offset from the screen's top edge (custom)"))
                .arg(offset_arg("width", "Window width in pixels (custom)"))
                .arg(offset_arg("height", "Window height in pixels (custom)")),
        )
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .help("Output as JSON")
        .action(ArgAction::SetTrue)
}

fn offset_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .help(help)
        .value_parser(value_parser!(i32))
        .allow_negative_numbers(true)
}
