//! MyoWare analogRead over USB serial
//!
//! Streams one MyoWare muscle sensor wired to ADC0 as decimal lines on the
//! RP2040's USB serial port, one sample every 50 ms. Open the port in any
//! serial terminal or plotter, or run the `myoware_host` monitor.
//!
//! # Hardware
//!
//! ```text
//! MyoWare Muscle Sensor    <=>    RP2040 (SparkFun Pro Micro)
//!           VIN            <=>      3.3V
//!           GND            <=>      GND
//!    ENV, RECT, or RAW     <=>      A0 (GPIO26 / ADC0)
//! ```
//!
//! Run the laptop on battery while the sensor is on your skin: a charger or
//! dock couples mains noise into the reading.
//!
//! # Build
//!
//! ```bash
//! cargo run --release --target thumbv6m-none-eabi --features device --example myoware_analog_read
//! ```

#![no_std]
#![no_main]
#![allow(static_mut_refs)]

use defmt::{info, warn};
use embassy_rp::adc::{Adc, Channel as AdcChannel};
use embassy_rp::gpio::Pull;
use embassy_rp::usb::{Driver, InterruptHandler as UsbInterruptHandler};
use embassy_rp::{bind_interrupts, peripherals};
use embassy_time::Delay;
use embassy_usb::class::cdc_acm::{CdcAcmClass, State};
use embassy_usb::{Builder, Config};
use {defmt_rtt as _, panic_probe as _};

use myoware::ports::SampleSinkPort;
use myoware::{Rp2040AdcSensor, Sampler, SamplerConfig, SamplerError, UsbCdcSink};

// ============================================================================
// USB Configuration
// ============================================================================

/// Raspberry Pi vendor ID (the host monitor auto-detects on it)
const USB_VID: u16 = 0x2e8a;

/// Product ID used by Pico SDK CDC devices
const USB_PID: u16 = 0x000a;

const USB_SERIAL_NUMBER: &str = "MYOWARE01";

// ============================================================================
// Sensor Configuration
// ============================================================================

/// Pause between samples, keeps the serial terminal from flooding
const SAMPLER_CONFIG: SamplerConfig = SamplerConfig::DEFAULT;

// ============================================================================
// Interrupt Bindings
// ============================================================================

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => UsbInterruptHandler<peripherals::USB>;
});

// ============================================================================
// Main Entry Point
// ============================================================================

#[embassy_executor::main]
async fn main(spawner: embassy_executor::Spawner) {
    info!("=== MyoWare analogRead ===");

    let p = embassy_rp::init(Default::default());

    // Sensor adapter: ADC0 on GPIO26, no pull so the sensor drives the pin
    let adc = Adc::new_blocking(p.ADC, embassy_rp::adc::Config::default());
    let channel = AdcChannel::new_pin(p.PIN_26, Pull::None);
    let sensor = Rp2040AdcSensor::new(adc, channel);
    info!("Sensor adapter created (ADC0 / GPIO26)");

    // Sink adapter: USB CDC
    let class = setup_usb(&spawner, p.USB);
    let sink = UsbCdcSink::new(class);
    info!("USB setup complete");

    let mut sampler = Sampler::new(sensor, sink, Delay, SAMPLER_CONFIG);

    loop {
        sampler.sink_mut().wait_connection().await;
        info!("USB connected, streaming");

        match sampler.run().await {
            Ok(never) => match never {},
            Err(SamplerError::Sink(e)) => {
                warn!(
                    "USB stream ended: {:?} (host connected: {})",
                    e,
                    sampler.sink_mut().is_connected()
                );
            }
            Err(SamplerError::Sensor(e)) => {
                defmt::panic!("ADC read failed: {:?}", e);
            }
        }

        info!(
            "USB disconnected after {} samples",
            sampler.samples_emitted()
        );
    }
}

// ============================================================================
// USB Setup
// ============================================================================

fn setup_usb(
    spawner: &embassy_executor::Spawner,
    usb: embassy_rp::Peri<'static, peripherals::USB>,
) -> CdcAcmClass<'static, Driver<'static, peripherals::USB>> {
    let driver = Driver::new(usb, Irqs);

    let mut config = Config::new(USB_VID, USB_PID);
    config.manufacturer = Some("SparkFun");
    config.product = Some("MyoWare Muscle Sensor");
    config.serial_number = Some(USB_SERIAL_NUMBER);
    config.max_power = 100;
    config.max_packet_size_0 = 64;

    static mut CONFIG_DESCRIPTOR: [u8; 256] = [0; 256];
    static mut BOS_DESCRIPTOR: [u8; 256] = [0; 256];
    static mut MSOS_DESCRIPTOR: [u8; 256] = [0; 256];
    static mut CONTROL_BUF: [u8; 64] = [0; 64];
    static mut STATE: State = State::new();

    let mut builder = unsafe {
        Builder::new(
            driver,
            config,
            &mut CONFIG_DESCRIPTOR,
            &mut BOS_DESCRIPTOR,
            &mut MSOS_DESCRIPTOR,
            &mut CONTROL_BUF,
        )
    };

    let class = unsafe { CdcAcmClass::new(&mut builder, &mut STATE, 64) };
    let usb = builder.build();

    spawner.spawn(usb_device_task(usb).expect("usb device task"));

    class
}

// ============================================================================
// USB Device Task
// ============================================================================

#[embassy_executor::task]
async fn usb_device_task(
    mut usb: embassy_usb::UsbDevice<'static, Driver<'static, peripherals::USB>>,
) -> ! {
    info!("USB device task started");
    usb.run().await
}
