//! Noggin - Robot Head Firmware
//!
//! Main firmware binary for an RP2040 desktop robot head: two hobby
//! servos (pan/tilt), an SH1106 OLED face and a BLE serial bridge for
//! commands.
//!
//! Pin assignments (Raspberry Pi Pico):
//! - GPIO0/1: UART0 to the BLE module (TX/RX, 9600 baud)
//! - GPIO4/5: I2C0 to the OLED (SDA/SCL)
//! - GPIO8/9: UART1 debug console (TX/RX, 115200 baud)
//! - GPIO16: pan servo (PWM slice 0 A)
//! - GPIO18: tilt servo (PWM slice 1 A)

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{I2C0, UART0, UART1};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use noggin_core::calibration::CalibrationStore;
use noggin_core::motion::MotionController;
use noggin_core::router::Router;
use noggin_hal_rp2040::flash::Rp2040FlashStorage;
use noggin_hal_rp2040::servo::PwmServo;

use crate::config::load_head_config;
use crate::face::sh1106::Sh1106;
use crate::face::OledFace;

mod channels;
mod config;
mod face;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    UART1_IRQ => BufferedInterruptHandler<UART1>;
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

/// HM-10 style BLE bridges default to 9600 baud
const BLE_BAUDRATE: u32 = 9600;

const CONSOLE_BAUDRATE: u32 = 115_200;

// Static cells for UART buffers (must live forever)
static BLE_TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static BLE_RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static CONSOLE_TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static CONSOLE_RX_BUF: StaticCell<[u8; 128]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Noggin firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_head_config();

    // Face: SH1106 on I2C0
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = 400_000;
    let i2c = I2c::new_async(p.I2C0, p.PIN_5, p.PIN_4, Irqs, i2c_config);
    let mut face = OledFace::new(Sh1106::new(i2c));
    if let Err(e) = face.init().await {
        // The head still moves without a face
        error!("OLED init failed: {:?}", e);
    }
    info!("Face initialized");

    // Servos: one PWM slice each
    let pan_pwm = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_16, PwmConfig::default());
    let tilt_pwm = Pwm::new_output_a(p.PWM_SLICE1, p.PIN_18, PwmConfig::default());
    let motion = MotionController::new(
        PwmServo::new(pan_pwm),
        PwmServo::new(tilt_pwm),
        Delay,
        &config,
    );
    info!("Servos initialized");

    // Calibration partition at the end of flash
    let flash = Rp2040FlashStorage::new(p.FLASH, p.DMA_CH0);
    let calibration = CalibrationStore::new(flash, &config);

    let router = Router::new(face, motion, calibration);

    // Wireless: BLE serial bridge on UART0
    let mut ble_config = UartConfig::default();
    ble_config.baudrate = BLE_BAUDRATE;
    let ble_tx_buf = BLE_TX_BUF.init([0u8; 64]);
    let ble_rx_buf = BLE_RX_BUF.init([0u8; 256]);
    let ble = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, ble_config);
    let ble = ble.into_buffered::<UART0>(Irqs, ble_tx_buf, ble_rx_buf);
    let (_ble_tx, ble_rx) = ble.split();
    info!("UART0 initialized for BLE bridge");

    // Debug console on UART1
    let mut console_config = UartConfig::default();
    console_config.baudrate = CONSOLE_BAUDRATE;
    let console_tx_buf = CONSOLE_TX_BUF.init([0u8; 64]);
    let console_rx_buf = CONSOLE_RX_BUF.init([0u8; 128]);
    let console = Uart::new_blocking(p.UART1, p.PIN_8, p.PIN_9, console_config);
    let console = console.into_buffered::<UART1>(Irqs, console_tx_buf, console_rx_buf);
    let (_console_tx, console_rx) = console.split();
    info!("UART1 initialized for debug console");

    // Spawn tasks
    spawner.spawn(tasks::wireless_rx_task(ble_rx)).unwrap();
    spawner.spawn(tasks::console_rx_task(console_rx)).unwrap();
    spawner.spawn(tasks::head_task(router, config)).unwrap();

    info!("All tasks spawned, firmware running");

    // Keeps the UART TX halves alive; all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
