mod app;
mod gpu;

use orbital_cloud::{FieldSettings, SampleField};
use winit::event_loop::{ControlFlow, EventLoop};

use crate::app::App;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = FieldSettings::default();
    log::info!(
        "Generating {} sample points in a {}-unit cube...",
        settings.count,
        settings.extent
    );
    let field = SampleField::generate(&settings, &mut rand::thread_rng())?;
    log::info!("Initially visible: {}", field.visible_count());

    let mut app = App::new(field)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run_app(&mut app)?;

    Ok(())
}
