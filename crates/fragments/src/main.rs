use clap::Parser;

fn main() -> anyhow::Result<()> {
    fragments::cli::Cli::parse().run()
}
