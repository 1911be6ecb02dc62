fn main() -> anyhow::Result<()> {
    statwise_cli::run()
}
