/*
 * Particle Network
 *
 * Opens a window running the particle network background. Pass a JSON
 * background config as the first argument (or set PARTICLE_NETWORK_CONFIG)
 * to pick another effect or tune the network; RUST_LOG controls logging.
 */

use particle_network::app;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting particle network");
    nannou::app(app::model).update(app::update).run();
}
