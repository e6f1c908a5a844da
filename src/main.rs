use boxsim::config::SimConfig;
use boxsim::core::{LogObserver, Simulation};
use std::process::ExitCode;

fn run() -> boxsim::error::Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => SimConfig::load(&path)?,
        None => SimConfig::default(),
    };
    let mut sim = Simulation::new(config)?;

    print!("{}", sim.report());
    while !sim.is_finished() {
        sim.tick(&mut LogObserver)?;
        println!("t = {}", sim.time());
        print!("{}", sim.report());
    }
    Ok(())
}

fn main() -> ExitCode {
    // Collision notifications are logged at info; RUST_LOG=debug adds wall bounces.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
