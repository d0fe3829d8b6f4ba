//! Test signal generation command.

use aliaslab_core::SignalBuffer;
use aliaslab_io::write_signal;
use clap::{Args, Subcommand};
use std::f32::consts::PI;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct GenerateArgs {
    #[command(subcommand)]
    command: GenerateCommand,
}

/// Options shared by every generator.
#[derive(Args)]
struct OutputOpts {
    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Duration in seconds
    #[arg(long, default_value = "1.0")]
    duration: f32,

    /// Sample rate
    #[arg(long, default_value = "44100")]
    sample_rate: u32,

    /// Output bit depth (16 or 24 PCM, 32 float)
    #[arg(long, default_value = "16")]
    bits: u16,
}

impl OutputOpts {
    fn num_samples(&self) -> usize {
        (self.duration * self.sample_rate as f32) as usize
    }
}

#[derive(Subcommand)]
enum GenerateCommand {
    /// Generate a sine tone
    Tone {
        #[command(flatten)]
        out: OutputOpts,

        /// Frequency in Hz
        #[arg(long, default_value = "440.0")]
        freq: f32,

        /// Amplitude (0-1)
        #[arg(long, default_value = "0.8")]
        amplitude: f32,
    },

    /// Generate a logarithmic sine sweep (chirp)
    Sweep {
        #[command(flatten)]
        out: OutputOpts,

        /// Start frequency in Hz
        #[arg(long, default_value = "20.0")]
        start: f32,

        /// End frequency in Hz
        #[arg(long, default_value = "20000.0")]
        end: f32,

        /// Amplitude (0-1)
        #[arg(long, default_value = "0.8")]
        amplitude: f32,
    },

    /// Generate white noise
    Noise {
        #[command(flatten)]
        out: OutputOpts,

        /// Amplitude (0-1)
        #[arg(long, default_value = "0.5")]
        amplitude: f32,
    },

    /// Generate silence
    Silence {
        #[command(flatten)]
        out: OutputOpts,
    },
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    match args.command {
        GenerateCommand::Tone {
            out,
            freq,
            amplitude,
        } => {
            println!("Generating sine tone...");
            println!("  {} Hz for {:.2}s", freq, out.duration);

            let sr = out.sample_rate as f32;
            let samples: Vec<f32> = (0..out.num_samples())
                .map(|i| (2.0 * PI * freq * i as f32 / sr).sin() * amplitude)
                .collect();
            write(&out, samples)
        }

        GenerateCommand::Sweep {
            out,
            start,
            end,
            amplitude,
        } => {
            if !(start > 0.0 && end > 0.0) {
                anyhow::bail!("sweep frequencies must be positive");
            }
            println!("Generating sine sweep...");
            println!("  {} Hz to {} Hz over {:.2}s", start, end, out.duration);

            let samples: Vec<f32> = log_sweep(out.sample_rate as f32, start, end, out.duration)
                .into_iter()
                .map(|s| s * amplitude)
                .collect();
            write(&out, samples)
        }

        GenerateCommand::Noise { out, amplitude } => {
            println!("Generating white noise...");
            println!("  {:.2}s at {} Hz", out.duration, out.sample_rate);

            let samples: Vec<f32> = (0..out.num_samples())
                .map(|_| (rand_f32() * 2.0 - 1.0) * amplitude)
                .collect();
            write(&out, samples)
        }

        GenerateCommand::Silence { out } => {
            println!("Generating silence...");
            println!("  {:.2}s at {} Hz", out.duration, out.sample_rate);

            write(&out, vec![0.0; out.num_samples()])
        }
    }
}

fn write(out: &OutputOpts, samples: Vec<f32>) -> anyhow::Result<()> {
    let len = samples.len();
    let buffer = SignalBuffer::mono(out.sample_rate as f32, samples)?;
    write_signal(&out.output, &buffer, out.bits)?;
    print_written(len, &out.output);
    Ok(())
}

fn print_written(len: usize, path: &Path) {
    println!("Wrote {} samples to {}", len, path.display());
}

/// Exponential sine sweep from `start` to `end` Hz.
fn log_sweep(sample_rate: f32, start: f32, end: f32, duration: f32) -> Vec<f32> {
    let num_samples = (duration * sample_rate) as usize;
    let k = (end / start).ln();
    let phase_scale = 2.0 * PI * start * duration / k;
    (0..num_samples)
        .map(|i| {
            let t = i as f32 / sample_rate;
            (phase_scale * ((t / duration * k).exp() - 1.0)).sin()
        })
        .collect()
}

/// Simple xorshift PRNG; reproducible across runs.
fn rand_f32() -> f32 {
    use std::cell::Cell;
    thread_local! {
        static STATE: Cell<u32> = const { Cell::new(0x1234_5678) };
    }

    STATE.with(|state| {
        let mut x = state.get();
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        state.set(x);
        (x as f32) / (u32::MAX as f32)
    })
}
