mod demos;
mod studio;

use anyhow::Result;
use tessera_engine::device::GpuInit;
use tessera_engine::logging::{LoggingConfig, init_logging};
use tessera_engine::window::{Runtime, RuntimeConfig};

use demos::DemoKind;
use studio::Studio;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let initial = match std::env::args().nth(1) {
        Some(name) => DemoKind::from_name(&name).unwrap_or_else(|| {
            log::warn!("unknown demo '{name}', starting with {}", DemoKind::Gallery.name());
            DemoKind::Gallery
        }),
        None => DemoKind::Gallery,
    };

    log::info!("keys 1-9 and 0 pick a demo, arrows cycle through all {}, Esc quits", DemoKind::ALL.len());

    let config = RuntimeConfig { title: initial.title().to_string(), ..RuntimeConfig::default() };
    Runtime::run(config, GpuInit::default(), Studio::new(initial))
}
