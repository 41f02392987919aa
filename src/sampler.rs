//! The sampling loop
//!
//! Reads the analog channel, writes the sample as a line, waits the
//! configured interval, and repeats. The loop only ends when a port fails.

use core::convert::Infallible;

use embedded_hal_async::delay::DelayNs;

use crate::domain::Sample;
use crate::ports::{
    AnalogSensorPort, CommunicationError, SampleSinkPort, SamplerConfig, SensorError,
};

/// Why the sampling loop stopped
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SamplerError {
    /// The analog channel could not be read
    Sensor(SensorError),
    /// The output stream rejected a line
    Sink(CommunicationError),
}

impl From<SensorError> for SamplerError {
    fn from(e: SensorError) -> Self {
        SamplerError::Sensor(e)
    }
}

impl From<CommunicationError> for SamplerError {
    fn from(e: CommunicationError) -> Self {
        SamplerError::Sink(e)
    }
}

/// Single-channel sampler
///
/// Owns the sensor, the sink and the delay source for as long as it runs.
pub struct Sampler<S, K, D> {
    sensor: S,
    sink: K,
    delay: D,
    config: SamplerConfig,
    emitted: u32,
}

impl<S, K, D> Sampler<S, K, D>
where
    S: AnalogSensorPort,
    K: SampleSinkPort,
    D: DelayNs,
{
    /// Create a sampler over the given ports
    pub fn new(sensor: S, sink: K, delay: D, config: SamplerConfig) -> Self {
        Self {
            sensor,
            sink,
            delay,
            config,
            emitted: 0,
        }
    }

    /// Read one sample and write it, without waiting afterwards
    pub async fn sample_once(&mut self) -> Result<Sample, SamplerError> {
        let sample = self.sensor.read().await?;
        self.sink.emit(sample).await?;
        self.emitted = self.emitted.wrapping_add(1);
        Ok(sample)
    }

    /// One loop iteration: sample, then wait the configured interval
    pub async fn step(&mut self) -> Result<Sample, SamplerError> {
        let sample = self.sample_once().await?;
        self.delay.delay_ms(self.config.interval_ms).await;
        Ok(sample)
    }

    /// Sample forever.
    ///
    /// Never returns `Ok`; the first port failure ends the loop.
    pub async fn run(&mut self) -> Result<Infallible, SamplerError> {
        #[cfg(feature = "defmt")]
        defmt::info!("Sampling every {} ms", self.config.interval_ms);

        loop {
            if let Err(e) = self.step().await {
                #[cfg(feature = "defmt")]
                defmt::warn!("Sampler stopped after {} samples: {:?}", self.emitted, e);
                return Err(e);
            }
        }
    }

    /// Number of lines written so far (wraps at `u32::MAX`)
    pub fn samples_emitted(&self) -> u32 {
        self.emitted
    }

    /// Get the active configuration
    pub fn config(&self) -> SamplerConfig {
        self.config
    }

    /// Get the sensor (for diagnostics)
    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    /// Get mutable access to the sink (e.g. to wait for a reconnect)
    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }

    /// Give the ports back
    pub fn into_parts(self) -> (S, K, D) {
        (self.sensor, self.sink, self.delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_protocol::parse_line;
    use futures::executor::block_on;

    /// Channel that always reads the same value
    struct ConstantSensor(u16);

    impl AnalogSensorPort for ConstantSensor {
        async fn read(&mut self) -> Result<Sample, SensorError> {
            Ok(Sample::new(self.0))
        }
    }

    /// Channel that plays back a fixed sequence, then fails
    struct ScriptedSensor {
        values: Vec<u16>,
        next: usize,
        last_raw: Option<u16>,
    }

    impl ScriptedSensor {
        fn new(values: Vec<u16>) -> Self {
            Self {
                values,
                next: 0,
                last_raw: None,
            }
        }
    }

    impl AnalogSensorPort for ScriptedSensor {
        async fn read(&mut self) -> Result<Sample, SensorError> {
            let raw = *self.values.get(self.next).ok_or(SensorError::ReadFailed)?;
            self.next += 1;
            self.last_raw = Some(raw);
            Ok(Sample::from_raw_12bit(raw))
        }

        fn last_raw_value(&self) -> Option<u16> {
            self.last_raw
        }
    }

    /// Sink that keeps every line, optionally failing after a limit
    #[derive(Default)]
    struct RecordingSink {
        lines: Vec<String>,
        fail_after: Option<usize>,
        dropped: bool,
    }

    impl SampleSinkPort for RecordingSink {
        async fn wait_connection(&mut self) {}

        fn is_connected(&self) -> bool {
            !self.dropped
        }

        async fn write_line(&mut self, line: &[u8]) -> Result<(), CommunicationError> {
            if self.fail_after == Some(self.lines.len()) {
                self.dropped = true;
                return Err(CommunicationError::Disconnected);
            }
            let text = core::str::from_utf8(line).map_err(|_| CommunicationError::SendFailed)?;
            self.lines.push(String::from(text));
            Ok(())
        }
    }

    /// Delay that only advances a virtual clock
    #[derive(Default)]
    struct VirtualDelay {
        requests_ms: Vec<u32>,
        elapsed_ns: u64,
    }

    impl DelayNs for VirtualDelay {
        async fn delay_ns(&mut self, ns: u32) {
            self.elapsed_ns += u64::from(ns);
        }

        async fn delay_ms(&mut self, ms: u32) {
            self.requests_ms.push(ms);
            self.elapsed_ns += u64::from(ms) * 1_000_000;
        }
    }

    #[test]
    fn test_sample_once_writes_one_line() {
        let mut sampler = Sampler::new(
            ConstantSensor(32768),
            RecordingSink::default(),
            VirtualDelay::default(),
            SamplerConfig::default(),
        );

        let sample = block_on(sampler.sample_once()).unwrap();
        assert_eq!(sample, Sample::MIDPOINT);
        assert_eq!(sampler.samples_emitted(), 1);

        let (_, sink, delay) = sampler.into_parts();
        assert_eq!(sink.lines, ["32768\r\n"]);
        assert!(delay.requests_ms.is_empty());
    }

    #[test]
    fn test_step_waits_configured_interval() {
        let mut sampler = Sampler::new(
            ConstantSensor(1),
            RecordingSink::default(),
            VirtualDelay::default(),
            SamplerConfig::default(),
        );

        for _ in 0..3 {
            block_on(sampler.step()).unwrap();
        }

        let (_, _, delay) = sampler.into_parts();
        assert_eq!(delay.requests_ms, [50, 50, 50]);
        assert!(delay.requests_ms.iter().all(|&ms| ms >= 50));
    }

    #[test]
    fn test_custom_interval() {
        let config = SamplerConfig::with_interval_ms(10);
        let mut sampler = Sampler::new(
            ConstantSensor(1),
            RecordingSink::default(),
            VirtualDelay::default(),
            config,
        );
        block_on(sampler.step()).unwrap();

        assert_eq!(sampler.config(), config);
        let (_, _, delay) = sampler.into_parts();
        assert_eq!(delay.requests_ms, [10]);
    }

    #[test]
    fn test_run_stops_on_sensor_failure() {
        let mut sampler = Sampler::new(
            ScriptedSensor::new(vec![0, 2048, 4095]),
            RecordingSink::default(),
            VirtualDelay::default(),
            SamplerConfig::default(),
        );

        let result = block_on(sampler.run());
        assert_eq!(result, Err(SamplerError::Sensor(SensorError::ReadFailed)));
        assert_eq!(sampler.sensor().last_raw_value(), Some(4095));

        let (_, sink, _) = sampler.into_parts();
        assert_eq!(sink.lines, ["0\r\n", "32776\r\n", "65535\r\n"]);
    }

    #[test]
    fn test_run_stops_on_sink_failure() {
        let sink = RecordingSink {
            fail_after: Some(2),
            ..Default::default()
        };
        let mut sampler = Sampler::new(
            ConstantSensor(7),
            sink,
            VirtualDelay::default(),
            SamplerConfig::default(),
        );

        let result = block_on(sampler.run());
        assert_eq!(result, Err(SamplerError::Sink(CommunicationError::Disconnected)));
        assert_eq!(sampler.samples_emitted(), 2);
        assert!(!sampler.sink_mut().is_connected());
    }

    #[test]
    fn test_run_keeps_going_while_ports_work() {
        let values: Vec<u16> = (0..1000u16).map(|i| i % 4096).collect();
        let mut sampler = Sampler::new(
            ScriptedSensor::new(values),
            RecordingSink::default(),
            VirtualDelay::default(),
            SamplerConfig::default(),
        );

        let _ = block_on(sampler.run());
        assert_eq!(sampler.samples_emitted(), 1000);

        let (_, sink, delay) = sampler.into_parts();
        assert_eq!(delay.elapsed_ns, 1000 * 50 * 1_000_000);
        for line in &sink.lines {
            assert!(line.ends_with("\r\n"));
            parse_line(line).unwrap();
        }
    }

    #[test]
    fn test_virtual_250ms_yields_five_lines() {
        let mut sampler = Sampler::new(
            ConstantSensor(32768),
            RecordingSink::default(),
            VirtualDelay::default(),
            SamplerConfig::default(),
        );

        loop {
            if sampler.delay.elapsed_ns >= 250_000_000 {
                break;
            }
            block_on(sampler.step()).unwrap();
        }

        let (_, sink, _) = sampler.into_parts();
        assert_eq!(sink.lines.len(), 5);
        assert!(sink.lines.iter().all(|l| l == "32768\r\n"));
    }

    #[test]
    fn test_constant_channel_for_250ms_real_time() {
        use embassy_time::{with_timeout, Delay, Duration};

        let mut sampler = Sampler::new(
            ConstantSensor(32768),
            RecordingSink::default(),
            Delay,
            SamplerConfig::default(),
        );

        let result = block_on(with_timeout(Duration::from_millis(250), sampler.run()));
        assert!(result.is_err(), "sampler should still be running at the deadline");

        let (_, sink, _) = sampler.into_parts();
        assert!(sink.lines.len() >= 4, "only {} lines", sink.lines.len());
        for line in &sink.lines {
            assert_eq!(line, "32768\r\n");
            assert_eq!(parse_line(line), Ok(Sample::MIDPOINT));
        }
    }
}
