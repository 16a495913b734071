mod app;
mod error;
mod gpu;

use winit::event_loop::{ControlFlow, EventLoop};

use sort_cycle::config::CycleConfig;
use sort_cycle::sorting::Algorithm;

fn main() -> Result<(), winit::error::EventLoopError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = CycleConfig::default();
    if let Some(arg) = std::env::args().nth(1) {
        match Algorithm::parse(&arg) {
            Some(algorithm) => config.algorithm = algorithm,
            None => log::warn!("Unknown algorithm {:?}, using {}", arg, config.algorithm),
        }
    }
    log::info!("Starting with {} sort", config.algorithm);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = app::App::new(config);
    event_loop.run_app(&mut app)
}
