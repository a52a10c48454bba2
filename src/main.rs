mod config;
mod diagram;
mod domain;
mod export;
mod localize;
mod render;

use std::path::Path;

use config::DiagramConfig;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = DiagramConfig::default();
    let artifacts = export::run(&config, Path::new(config.output_dir))?;

    println!("{}", export::confirmation_message(&artifacts));
    Ok(())
}
