use anyhow::Result;
use clap::Parser;
use docbridge::{cli, converter, emit};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.log_level);

    let result = converter::run(&cli.request());
    emit::emit(&result)?;
    Ok(())
}
