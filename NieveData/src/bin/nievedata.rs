fn main() -> anyhow::Result<()> {
    nievedata::cli::run_cli()
}
