fn main() -> anyhow::Result<()> {
    mbench::run()
}
