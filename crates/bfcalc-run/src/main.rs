use clap::Parser;

#[cfg(feature = "use_mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> miette::Result<()> {
    let cli = bfcalc_run::Cli::parse();
    cli.init_tracing();
    tracing::debug!("cli: {cli:?}");

    cli.run()
}
