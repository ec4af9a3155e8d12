use std::path::PathBuf;

use clap::ArgMatches;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use winpilot_core::config::validate_config;
use winpilot_core::events;
use winpilot_core::{
    Collaborator, CustomPlacement, LogFormat, SystemCollaborator, WindowManager, WinpilotConfig,
    load_config,
};

use crate::server::{self, AppWindowList, ScreenList, WindowList};
use crate::table;

/// Load the config file and apply command-line overrides.
pub fn resolve_config(matches: &ArgMatches) -> Result<WinpilotConfig, Box<dyn std::error::Error>> {
    let path = matches.get_one::<PathBuf>("config");
    let mut config = load_config(path.map(PathBuf::as_path))?;

    if let Some(&timeout_secs) = matches.get_one::<u64>("timeout") {
        config.collaborators.timeout_secs = timeout_secs;
    }
    if let Some(format) = matches.get_one::<String>("log-format") {
        config.logging.format = format.parse::<LogFormat>()?;
    }

    validate_config(&config)?;
    Ok(config)
}

pub async fn run_command(
    matches: &ArgMatches,
    config: &WinpilotConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup();

    let manager = WindowManager::new(SystemCollaborator::new(&config.collaborators));
    let shutdown = server::signal_token();

    match matches.subcommand() {
        None | Some(("serve", _)) => handle_serve(manager, &shutdown).await,
        Some(("list", sub_matches)) => handle_list_command(&manager, sub_matches, &shutdown).await,
        Some(("move", sub_matches)) => handle_move_command(&manager, sub_matches, &shutdown).await,
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    }
}

async fn handle_serve<C: Collaborator>(
    manager: WindowManager<C>,
    shutdown: &CancellationToken,
) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.serve_started");

    match server::serve_stdio(manager, shutdown).await {
        Ok(()) => {
            info!(event = "cli.serve_completed");
            Ok(())
        }
        Err(e) => {
            error!(event = "cli.serve_failed", error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

async fn handle_list_command<C: Collaborator>(
    manager: &WindowManager<C>,
    matches: &ArgMatches,
    cancel: &CancellationToken,
) -> Result<(), Box<dyn std::error::Error>> {
    match matches.subcommand() {
        Some(("windows", sub_matches)) => match sub_matches.get_one::<String>("app") {
            Some(app) => handle_list_app_windows(manager, app, sub_matches, cancel).await,
            None => handle_list_windows(manager, sub_matches, cancel).await,
        },
        Some(("screens", sub_matches)) => handle_list_screens(manager, sub_matches, cancel).await,
        _ => {
            error!(event = "cli.list_subcommand_unknown");
            Err("Unknown list subcommand".into())
        }
    }
}

async fn handle_list_windows<C: Collaborator>(
    manager: &WindowManager<C>,
    matches: &ArgMatches,
    cancel: &CancellationToken,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");

    info!(event = "cli.list_windows_started", json_output = json_output);

    match manager.list_all_windows(cancel).await {
        Ok(windows) => {
            let list = WindowList::from(windows.as_slice());
            if json_output {
                println!("{}", serde_json::to_string_pretty(&list)?);
            } else if list.windows.is_empty() {
                println!("No visible windows found.");
            } else {
                println!("Visible windows:");
                table::print_windows_table(&list);
            }

            info!(event = "cli.list_windows_completed", count = list.count);
            Ok(())
        }
        Err(e) => {
            eprintln!("Failed to list windows: {}", e);
            error!(event = "cli.list_windows_failed", error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

async fn handle_list_app_windows<C: Collaborator>(
    manager: &WindowManager<C>,
    app: &str,
    matches: &ArgMatches,
    cancel: &CancellationToken,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");

    info!(
        event = "cli.list_app_windows_started",
        app = app,
        json_output = json_output
    );

    match manager.get_app_all_windows(app, cancel).await {
        Ok(windows) => {
            let list = AppWindowList::new(app.trim(), &windows);
            if json_output {
                println!("{}", serde_json::to_string_pretty(&list)?);
            } else if list.windows.is_empty() {
                println!("No readable windows found for '{}'.", list.app_name);
            } else {
                println!("Windows of '{}':", list.app_name);
                table::print_app_windows_table(&list);
            }

            info!(
                event = "cli.list_app_windows_completed",
                app = app,
                count = list.count
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("Failed to list windows of '{}': {}", app, e);
            error!(event = "cli.list_app_windows_failed", app = app, error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

async fn handle_list_screens<C: Collaborator>(
    manager: &WindowManager<C>,
    matches: &ArgMatches,
    cancel: &CancellationToken,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");

    info!(event = "cli.list_screens_started", json_output = json_output);

    match manager.list_all_screens(cancel).await {
        Ok(layout) => {
            let list = ScreenList::from(&layout);
            if json_output {
                println!("{}", serde_json::to_string_pretty(&list)?);
            } else {
                if let Some(reason) = layout.fallback {
                    println!("Display inventory unavailable ({reason}); showing the whole desktop.");
                }
                println!("Screens:");
                table::print_screens_table(&list);
            }

            info!(
                event = "cli.list_screens_completed",
                count = list.count,
                fallback = layout.is_fallback()
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("Failed to list screens: {}", e);
            error!(event = "cli.list_screens_failed", error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

async fn handle_move_command<C: Collaborator>(
    manager: &WindowManager<C>,
    matches: &ArgMatches,
    cancel: &CancellationToken,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = matches
        .get_one::<String>("app")
        .ok_or("Application name is required")?;
    let screen = matches.get_one::<i64>("screen").copied().unwrap_or(0);
    let position = matches
        .get_one::<String>("position")
        .ok_or("Position is required")?;
    let custom = custom_placement(matches);

    info!(
        event = "cli.move_started",
        app = app.as_str(),
        screen = screen,
        position = position.as_str()
    );

    match manager
        .move_app_to_screen(app, screen, position, &custom, cancel)
        .await
    {
        Ok(outcome) => {
            println!(
                "Moved '{}' to screen {} ({}) at position '{}': {}",
                outcome.app_name,
                outcome.screen_index,
                outcome.screen_name,
                outcome.preset,
                outcome.bounds
            );
            info!(event = "cli.move_completed", app = app.as_str());
            Ok(())
        }
        Err(e) => {
            eprintln!("Failed to move '{}': {}", app, e);
            error!(event = "cli.move_failed", app = app.as_str(), error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

fn custom_placement(matches: &ArgMatches) -> CustomPlacement {
    CustomPlacement {
        x_offset: matches.get_one::<i32>("x-offset").copied(),
        y_offset: matches.get_one::<i32>("y-offset").copied(),
        width: matches.get_one::<i32>("width").copied(),
        height: matches.get_one::<i32>("height").copied(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::app::build_cli;
    use crate::server::test_support::ScriptedCollaborator;

    fn matches(args: &[&str]) -> ArgMatches {
        build_cli().try_get_matches_from(args).unwrap()
    }

    #[test]
    fn test_resolve_config_defaults_with_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[collaborators]\nosascript = \"/usr/bin/osascript\"\ntimeout_secs = 4").unwrap();

        let m = matches(&[
            "winpilot",
            "--config",
            path.to_str().unwrap(),
            "--timeout",
            "2",
            "--log-format",
            "json",
        ]);
        let config = resolve_config(&m).unwrap();
        assert_eq!(config.collaborators.osascript, "/usr/bin/osascript");
        assert_eq!(config.collaborators.timeout_secs, 2);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_resolve_config_missing_explicit_file() {
        let m = matches(&["winpilot", "--config", "/nonexistent/winpilot.toml"]);
        assert!(resolve_config(&m).is_err());
    }

    #[test]
    fn test_custom_placement_from_flags() {
        let m = matches(&[
            "winpilot", "move", "Notes", "-p", "custom", "--x-offset", "-5", "--width", "300",
        ]);
        let (_, mv) = m.subcommand().unwrap();
        let custom = custom_placement(mv);
        assert_eq!(custom.x_offset, Some(-5));
        assert_eq!(custom.y_offset, None);
        assert_eq!(custom.width, Some(300));
        assert_eq!(custom.height, None);
    }

    #[tokio::test]
    async fn test_move_command_rejects_missing_custom_fields() {
        let manager = WindowManager::new(ScriptedCollaborator::with_script_replies(&[
            "0, 0, 1920, 1080",
        ]));
        let m = matches(&["winpilot", "move", "Notes", "-p", "custom", "--width", "300"]);
        let (_, mv) = m.subcommand().unwrap();

        let result = handle_move_command(&manager, mv, &CancellationToken::new()).await;
        assert!(result.is_err());
        // Only the desktop bounds were read; no move script ran.
        assert_eq!(manager.collaborator().scripts().len(), 1);
    }

    #[tokio::test]
    async fn test_move_command_issues_move() {
        let manager = WindowManager::new(ScriptedCollaborator::with_script_replies(&[
            "0, 0, 1920, 1080",
        ]));
        let m = matches(&["winpilot", "move", "Notes", "-p", "left-half"]);
        let (_, mv) = m.subcommand().unwrap();

        handle_move_command(&manager, mv, &CancellationToken::new())
            .await
            .unwrap();
        let scripts = manager.collaborator().scripts();
        assert_eq!(scripts.len(), 2);
        assert!(scripts[1].contains("set size to {960, 1080}"));
    }

    #[tokio::test]
    async fn test_list_screens_json() {
        let manager = WindowManager::new(ScriptedCollaborator::with_script_replies(&[
            "0, 0, 1920, 1080",
        ]));
        let m = matches(&["winpilot", "list", "screens", "--json"]);
        let (_, list) = m.subcommand().unwrap();

        handle_list_command(&manager, list, &CancellationToken::new())
            .await
            .unwrap();
    }
}
