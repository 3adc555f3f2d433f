mod app;
mod background;
mod dog;
mod error;
mod hud;
mod input;
mod paint;
mod palette;
mod particles;
mod render;
mod scene;
mod score;
mod sprite;
mod toy;
mod util;
mod viewport;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Pup Yard starting up");

    if let Err(e) = app::run() {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}
