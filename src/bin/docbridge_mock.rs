use anyhow::Result;
use clap::Parser;
use docbridge::{cli, emit, mock};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.log_level);

    let result = mock::run(&cli.request());
    emit::emit(&result)?;
    Ok(())
}
