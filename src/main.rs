mod app;
mod horse;
mod render;
mod scene;

fn main() {
    env_logger::init();
    log::info!("Trotter starting up");

    if let Err(e) = app::run() {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}
