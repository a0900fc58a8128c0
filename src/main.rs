//! Keyboard-to-gamepad remapper
//!
//! Entry point: device setup, binding table construction, and the
//! dispatch loop.

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

use kbd_gamepad::bindings::{default_bindings, BindingTable};
use kbd_gamepad::dispatch::Dispatcher;
use kbd_gamepad::keyboard;
use kbd_gamepad::pad::VirtualGamepad;

#[derive(Parser)]
#[command(name = "kbd-gamepad")]
#[command(about = "Drive a virtual X-Box 360 pad from a physical keyboard")]
struct Cli {
    /// Input device number (the N in /dev/input/eventN)
    #[arg(short, long)]
    device: Option<usize>,

    /// List candidate keyboards and exit
    #[arg(long)]
    list: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Exit status after an interrupt, matching shell convention for SIGINT.
const EXIT_INTERRUPTED: u8 = 130;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.list {
        list_keyboards();
        return Ok(ExitCode::SUCCESS);
    }

    // Reject an ambiguous table before touching any device.
    let table = BindingTable::build(default_bindings()).context("building binding table")?;
    info!("Bound {} keys", table.len());

    let mut pad = VirtualGamepad::create().context("creating virtual pad")?;
    if let Some(path) = pad.device_path() {
        info!("Created virtual pad at {}", path.display());
    }

    let (path, mut device) = keyboard::select(cli.device).map_err(|e| {
        if matches!(e, kbd_gamepad::KeyboardError::Ambiguous { .. }) {
            list_keyboards();
        }
        e
    })?;
    info!(
        "Reading from {} ({})",
        path.display(),
        device.name().unwrap_or("unknown")
    );

    let running = setup_interrupt_handler();
    let mut dispatcher = Dispatcher::new(table, pad);

    info!("Remapping. Press Ctrl+C to exit.");

    while running.load(Ordering::SeqCst) {
        let events = match device.fetch_events() {
            Ok(events) => events,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e).context("reading input events"),
        };

        for event in events {
            if let Some(transition) = keyboard::key_transition(&event) {
                dispatcher.handle(transition.key, transition.pressed)?;
            }
        }
    }

    info!("Interrupted, shutting down");
    Ok(ExitCode::from(EXIT_INTERRUPTED))
}

/// Set up a Ctrl-C handler that clears the given flag when triggered.
/// Returns the Arc<AtomicBool> for use in the main loop.
fn setup_interrupt_handler() -> Arc<AtomicBool> {
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);

    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .ok();

    running
}

/// Print candidate keyboards like the kernel names them.
fn list_keyboards() {
    let keyboards = keyboard::list_keyboards();
    if keyboards.is_empty() {
        println!("No keyboard-like devices found. Run as root?");
        return;
    }

    println!("Available keyboards:");
    for (path, device) in &keyboards {
        println!(
            "{} {} {}",
            path.display(),
            device.name().unwrap_or("unknown"),
            device.physical_path().unwrap_or("")
        );
    }
}
