use std::io::{self, Read};

use anyhow::{Context, Result};
use log::info;
use processor::{format_report, simulate_preemptive_priority, simulate_round_robin, Simulation};
use scheduler::ProcessInput;

mod config;
mod input;
mod logger;

use config::{Config, Mode};

fn main() -> Result<()> {
    let config = Config::from_env()?;
    logger::init(config.log_level).context("failed to install the logger")?;
    info!("running with {:?}", config.mode);

    match config.mode {
        Mode::Sample { quantum } => {
            // each algorithm gets its own table built from the same inputs
            let processes = load_sample();
            print(&simulate_round_robin(&processes, quantum)?);
            println!();
            print(&simulate_preemptive_priority(&processes)?);
        }
        Mode::RoundRobin { quantum } => {
            let processes = read_processes()?;
            print(&simulate_round_robin(&processes, quantum)?);
        }
        Mode::PreemptivePriority => {
            let processes = read_processes()?;
            print(&simulate_preemptive_priority(&processes)?);
        }
    }

    Ok(())
}

fn read_processes() -> Result<Vec<ProcessInput>> {
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("failed to read processes from stdin")?;
    input::parse_processes(&text)
        .context("expected `n` followed by `n` lines of `pid arrival burst priority`")
}

fn print(simulation: &Simulation) {
    print!(
        "{}",
        format_report(&simulation.policy, &simulation.timeline, &simulation.results)
    );
}

/// The data set used when no mode is given.
fn load_sample() -> Vec<ProcessInput> {
    vec![
        ProcessInput::new(1, 0, 5, 2),
        ProcessInput::new(2, 1, 3, 1),
        ProcessInput::new(3, 2, 8, 4),
        ProcessInput::new(4, 3, 6, 3),
    ]
}

#[cfg(test)]
mod tests;
