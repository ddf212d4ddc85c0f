fn main() -> anyhow::Result<()> {
    kadmos_console::run()
}
