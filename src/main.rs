fn main() -> anyhow::Result<()> {
    depthqc::cli::run::entry()
}
