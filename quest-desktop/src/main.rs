mod setup;
mod config_gen;

use std::env;
use std::process::ExitCode;
use anyhow::Context;
use quest_core::config::{SequencerConfig, SystemConfig};
use quest_core::{Driver, RunReport, TerminalRenderer};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let log_to_stdout = args.iter().any(|a| a == "--log-stdout");
    let fast = args.iter().any(|a| a == "--fast");
    let game_arg = args.iter()
        .skip(1)
        .find(|a| !a.starts_with("--"))
        .cloned();

    setup::init(log_to_stdout);
    log::info!(">>> Quest Launcher Started <<<");

    match run(game_arg, !fast) {
        Ok(report) => {
            match serde_json::to_string_pretty(&report) {
                Ok(json) => println!("{}", json),
                Err(e) => log::error!("Failed to encode run report: {}", e),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{:#}", e);
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(game_arg: Option<String>, realtime: bool) -> anyhow::Result<RunReport> {
    let sys_cfg: SystemConfig = quest_shared::config::get("system");
    let name = game_arg.unwrap_or(sys_cfg.game);

    let game = if sys_cfg.content_path.is_empty() {
        log::info!("Loading bundled game '{}'", name);
        quest_games::load(&name)?
    } else {
        log::info!("Loading game '{}' from {}", name, sys_cfg.content_path);
        quest_games::load_from(&name, &sys_cfg.content_path)?
    };

    let config = SequencerConfig::from_global_or(game.defaults.clone());
    log::debug!("Sequencer config: {:?}", config);

    let mut driver = Driver::new(&game, game.sequencer(config), TerminalRenderer::new())
        .realtime(realtime);
    let report = driver.run().with_context(|| format!("Game '{}' stopped", name))?;
    log::info!("Run over: {}% ({} scenes)", report.percent, report.transitions);
    Ok(report)
}
