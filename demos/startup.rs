use std::sync::{Arc, Mutex};
use std::time::Instant;

use ikebana::*;
use tracing_subscriber::EnvFilter;

// Define regular dependency structs

struct Clock {
    started_at: Instant,
}

impl Clock {
    fn uptime_ms(&self) -> u128 {
        self.started_at.elapsed().as_millis()
    }
}

struct Logger {
    prefix: &'static str,
}

impl Logger {
    fn log(&self, content: &str) {
        println!("[{}] {}", self.prefix, content);
    }
}

// Providers declare their zero-argument provide operations

struct TimeKeeper;

impl TimeKeeper {
    fn clock(&self) -> Option<Clock> {
        Some(Clock {
            started_at: Instant::now(),
        })
    }
}

provide_methods!(TimeKeeper, clock -> Clock);

struct Console;

impl Console {
    fn logger(&self) -> Option<Logger> {
        Some(Logger { prefix: "demo" })
    }
}

provide_methods!(Console, logger -> Logger);

// Targets declare their injectable members: a slot-backed field on the
// HUD, a hand-declared method member on the dashboard

#[derive(Default)]
struct Hud {
    clock: Slot<Clock>,
}

inject_fields!(Hud, clock);

#[derive(Default)]
struct Dashboard {
    wired: Mutex<Option<(Arc<Clock>, Arc<Logger>)>>,
}

impl Injectable for Dashboard {
    fn target_name(&self) -> &'static str {
        "Dashboard"
    }

    fn members(&self) -> Vec<Member<'_>> {
        vec![Member::method(
            "configure",
            |clock: Arc<Clock>, logger: Arc<Logger>| {
                logger.log("dashboard configured");
                *self.wired.lock().unwrap() = Some((clock, logger));
            },
        )]
    }
}

fn main() -> Result<(), WiringError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let keeper = TimeKeeper;
    let console = Console;
    let hud = Hud::default();
    let dashboard = Dashboard::default();

    let registry = Startup::new()
        .provider(&keeper)
        .provider(&console)
        .target(&hud)
        .target(&dashboard)
        .run()?;

    let clock = hud.clock.get().expect("the hud clock is wired");
    println!("hud clock uptime: {}ms", clock.uptime_ms());

    if let Some((clock, logger)) = dashboard.wired.lock().unwrap().as_ref() {
        logger.log(&format!("dashboard clock uptime: {}ms", clock.uptime_ms()));
    }

    println!("registry holds {} dependencies", registry.len());

    Ok(())
}
