use clap::Parser;
use wave_visualizer::config::Cli;
use wave_visualizer::ui::run_ui;

fn main() -> Result<(), eframe::Error> {
    let cli = Cli::parse();
    tracing_subscriber::fmt().with_max_level(cli.log_level).init();

    run_ui(cli.defaults())
}
