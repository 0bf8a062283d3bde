mod app;
mod config;
mod scene;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = app::run(config::AppConfig::default()) {
        log::error!("marcher failed: {e}");
        std::process::exit(1);
    }
}
