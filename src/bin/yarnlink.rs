fn main() -> anyhow::Result<()> {
    yarnlink::cli::run_cli()
}
