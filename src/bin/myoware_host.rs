//! MyoWare serial monitor
//!
//! Runs on your PC, reads the sample stream from the RP2040 over USB and
//! prints one value per line. Pipe it into any plotter that takes one
//! number per line, or use `--bars` for a quick look in the terminal.
//!
//! ## Usage
//!
//! ```bash
//! # List available serial ports
//! cargo run --features std --bin myoware_host -- --list-ports
//!
//! # Connect to device (auto-detects a Raspberry Pi VID board)
//! cargo run --features std --bin myoware_host
//!
//! # Connect to a specific port, draw bars, stop after 200 samples
//! cargo run --features std --bin myoware_host -- --port COM3 --bars --count 200
//! ```

use std::io::{self, BufRead, BufReader, Write};
use std::time::Duration;

use myoware::{parse_line, Sample};

/// Raspberry Pi USB vendor ID
const RPI_VID: u16 = 0x2e8a;

/// Baud rate is ignored by USB CDC but required by the API
const BAUD_RATE: u32 = 115200;

/// Widest bar drawn for a full-scale sample
const BAR_WIDTH: usize = 50;

#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    list_ports: bool,
    port: Option<String>,
    bars: bool,
    count: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_args(&args)?;

    if options.list_ports {
        list_ports();
        return Ok(());
    }

    let port_name = match options.port.clone().or_else(find_rp2040_port) {
        Some(name) => name,
        None => {
            eprintln!("Error: No MyoWare device found");
            eprintln!("Use --list-ports to see available ports");
            eprintln!("Or specify port with --port <PORT>");
            return Err("No device found".into());
        }
    };

    // On Windows, COM ports >= 10 need the \\.\COMxx format
    #[cfg(target_os = "windows")]
    let port_name = if port_name.starts_with("COM") && !port_name.starts_with(r"\\") {
        format!(r"\\.\{}", port_name)
    } else {
        port_name
    };

    eprint!("Connecting to {}...", port_name);
    io::stderr().flush()?;

    let mut port = serialport::new(&port_name, BAUD_RATE)
        .timeout(Duration::from_millis(1000))
        .flow_control(serialport::FlowControl::None)
        .open()?;

    // The device only streams once the host asserts DTR
    port.write_data_terminal_ready(true)?;
    eprintln!(" connected!");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    stream_samples(BufReader::new(port), &mut out, &options)
}

/// Read lines until the port closes or `--count` samples were shown.
///
/// Bytes read before a timeout stay buffered, so a sample split across
/// reads is kept whole. Lines that are not valid samples go to stderr.
fn stream_samples<R: BufRead, W: Write>(
    mut reader: R,
    out: &mut W,
    options: &Options,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut line: Vec<u8> = Vec::new();
    let mut shown: u64 = 0;

    while options.count.map_or(true, |limit| shown < limit) {
        match reader.read_until(b'\n', &mut line) {
            Ok(0) => {
                eprintln!("Port closed");
                break;
            }
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::TimedOut => continue,
            Err(e) => return Err(e.into()),
        }

        let parsed = match std::str::from_utf8(&line) {
            Ok(text) => parse_line(text).map_err(|e| e.to_string()),
            Err(_) => Err("line is not valid UTF-8".to_string()),
        };

        match parsed {
            Ok(sample) => {
                if options.bars {
                    writeln!(out, "{:>5} {}", sample.value(), render_bar(sample, BAR_WIDTH))?;
                } else {
                    writeln!(out, "{}", sample.value())?;
                }
                shown += 1;
            }
            Err(e) => {
                eprintln!("Skipping {:?}: {}", String::from_utf8_lossy(&line).trim_end(), e);
            }
        }
        line.clear();
    }

    out.flush()?;
    Ok(())
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--list-ports" => options.list_ports = true,
            "--bars" => options.bars = true,
            "--port" => {
                let name = iter.next().ok_or("Usage: --port <PORT>")?;
                options.port = Some(name.clone());
            }
            "--count" => {
                let count = iter
                    .next()
                    .ok_or("Usage: --count <N>")?
                    .parse::<u64>()
                    .map_err(|_| "Invalid count (must be a positive number)".to_string())?;
                options.count = Some(count);
            }
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    Ok(options)
}

/// Bar proportional to the sample, `width` characters at full scale
fn render_bar(sample: Sample, width: usize) -> String {
    let filled = (sample.value() as usize * width + u16::MAX as usize / 2) / u16::MAX as usize;
    "#".repeat(filled)
}

fn list_ports() {
    println!("Available serial ports:");
    match serialport::available_ports() {
        Ok(ports) => {
            if ports.is_empty() {
                println!("  (none)");
            }
            for port in ports {
                print!("  {}", port.port_name);
                match &port.port_type {
                    serialport::SerialPortType::UsbPort(info) => {
                        println!(" - USB (VID: 0x{:04x}, PID: 0x{:04x})", info.vid, info.pid);
                        if let Some(ref manufacturer) = info.manufacturer {
                            println!("      Manufacturer: {}", manufacturer);
                        }
                        if let Some(ref product) = info.product {
                            println!("      Product: {}", product);
                        }
                    }
                    other => println!(" - {}", port_type_name(other)),
                }
            }
        }
        Err(e) => {
            eprintln!("Error listing ports: {}", e);
        }
    }
}

fn port_type_name(port_type: &serialport::SerialPortType) -> &str {
    match port_type {
        serialport::SerialPortType::UsbPort(_) => "USB",
        serialport::SerialPortType::BluetoothPort => "Bluetooth",
        serialport::SerialPortType::PciPort => "PCI",
        serialport::SerialPortType::Unknown => "Unknown",
    }
}

fn find_rp2040_port() -> Option<String> {
    let ports = serialport::available_ports().ok()?;

    ports.into_iter().find_map(|port| match &port.port_type {
        serialport::SerialPortType::UsbPort(info) if info.vid == RPI_VID => Some(port.port_name),
        _ => None,
    })
}
