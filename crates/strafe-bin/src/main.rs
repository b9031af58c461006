// strafe-sim — synthetic A/D counter-strafe input generator.
//
// Focus the target window during the countdown; key events go wherever
// keyboard focus is.

mod app;
mod cli;

use anyhow::Result;
use clap::Parser;
use log::info;
use strafe_sim::ThreadSleeper;

use app::Outcome;
use cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Outcome::Finished { summary, .. } =
        app::execute(&args, &mut ThreadSleeper::new(), &mut out)?
    {
        info!("Summary: {summary}");
    }
    Ok(())
}
