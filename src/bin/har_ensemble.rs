use anyhow::Result;

fn main() -> Result<()> {
    env_logger::init();
    har_ensemble::cli::run()
}
