use painterly_viewer::{config::Config, flow};

fn main() -> anyhow::Result<()> {
    flow::run(Config::from_env())
}
