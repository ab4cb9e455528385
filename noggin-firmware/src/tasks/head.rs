//! Head task
//!
//! The single consumer of both command queues. Each iteration executes at
//! most one command line (wireless first), or one demo step when nothing
//! is queued, then sleeps for the configured tick.

use defmt::*;
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Delay, Instant, Timer};

use noggin_core::calibration::{CenterLoad, CenterSource};
use noggin_core::config::HeadConfig;
use noggin_core::demo::DemoCycle;
use noggin_core::queue::CommandSources;
use noggin_core::router::{Outcome, Report, Router};
use noggin_hal_rp2040::flash::Rp2040FlashStorage;
use noggin_hal_rp2040::servo::PwmServo;

use crate::channels::{COMMAND_QUEUE, CONSOLE_QUEUE};
use crate::face::OledFace;

/// The router wired to this board's hardware
pub type HeadRouter = Router<
    OledFace<I2c<'static, I2C0, Async>>,
    PwmServo<'static>,
    Delay,
    Rp2040FlashStorage<'static>,
>;

/// Head task - boots the head, then drains commands forever
#[embassy_executor::task]
pub async fn head_task(mut router: HeadRouter, config: HeadConfig) {
    info!("Head task started");

    for load in router.boot().await {
        log_center_load(&load);
    }
    let (pan, tilt) = router.motion().position();
    info!("Head centered at pan={} tilt={}", pan, tilt);

    let sources = CommandSources::new(&COMMAND_QUEUE, &CONSOLE_QUEUE);
    let mut demo = DemoCycle::new(config.demo.interval_ms, Instant::now().as_millis());
    let mut dropped = 0;

    loop {
        if let Some((source, line)) = sources.next() {
            info!("{:?} command: {}", source, line.as_str());

            let report = router.execute(&line).await;
            log_report(&report);

            if report.reboot_requested() {
                reboot().await;
            }

            demo.defer(Instant::now().as_millis());
        } else if config.demo.enabled {
            if let Some(step) = demo.poll(Instant::now().as_millis()) {
                debug!("Demo step: {:?}", step);
                let report = router.run_demo(step).await;
                log_report(&report);
            }
        }

        let total = sources.dropped();
        if total != dropped {
            warn!("{} command lines dropped since boot", total);
            dropped = total;
        }

        Timer::after_millis(u64::from(config.tick_ms)).await;
    }
}

fn log_center_load(load: &CenterLoad) {
    match load.source {
        CenterSource::Stored => info!("{:?} center {} (stored)", load.axis, load.center),
        CenterSource::Created => info!("{:?} center {} (default, new)", load.axis, load.center),
        CenterSource::Replaced(e) => warn!(
            "{:?} center record unusable ({:?}), reset to {}",
            load.axis, e, load.center
        ),
    }

    if let Err(e) = load.persisted {
        warn!("{:?} center not saved: {:?}", load.axis, e);
    }
}

fn log_report(report: &Report) {
    for outcome in report.outcomes() {
        match outcome {
            Outcome::Performed(action) => debug!("Performed {:?}", action),
            Outcome::UnknownAction(token) => warn!("Unknown action: {}", token.as_str()),
            Outcome::FaceFailed { action, error } => {
                warn!("Face failed on {:?}: {:?}", action, error)
            }
            Outcome::CenterAdjusted(adjust) => match adjust.persisted {
                Ok(()) => info!("{:?} center now {} (saved)", adjust.axis, adjust.center),
                Err(e) => warn!(
                    "{:?} center now {} but not saved: {:?}",
                    adjust.axis, adjust.center, e
                ),
            },
            Outcome::FactoryRejected { token, error } => {
                warn!("Factory command {} rejected: {:?}", token.as_str(), error)
            }
            Outcome::RebootRequested => info!("Factory reboot requested"),
        }
    }
}

/// Reset the chip
///
/// Waits a moment first so the last log lines reach the host.
async fn reboot() -> ! {
    warn!("Rebooting");
    Timer::after_millis(50).await;
    cortex_m::peripheral::SCB::sys_reset()
}
