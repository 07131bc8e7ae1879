mod asteroid;
mod pacman;
mod shared;
mod ship;
mod studio;

use arbor_engine::logging::{init_logging, LoggingConfig};
use arbor_engine::paint::Color;
use arbor_engine::window::{Runtime, RuntimeConfig};
use winit::dpi::LogicalSize;

use crate::studio::Studio;

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    println!();
    println!("  ARBOR STUDIO");
    println!("  arrows  steer / thrust     space  fire");
    println!("  g  grab nearest asteroid   r  release");
    println!("  h  toggle ship             esc    quit");
    println!();

    let config = RuntimeConfig {
        title: "Arbor Studio".to_string(),
        initial_size: LogicalSize::new(1024.0, 768.0),
        clear_color: Color::from_rgb_u8(8, 10, 20),
        ..RuntimeConfig::default()
    };

    Runtime::run(config, Studio::new())
}
