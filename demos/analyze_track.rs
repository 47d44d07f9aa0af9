//! Example: analyze a WAV file and print the tempo report
//!
//! Usage: cargo run --example analyze_track -- path/to/track.wav

use cadence_dsp::{
    estimate_tempo, recommend, sync_from_analysis, AnalysisConfig, AudioBuffer, SignalClass,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .ok_or("usage: analyze_track <track.wav>")?;

    let mut reader = hound::WavReader::open(&path)?;
    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<Vec<_>, _>>()?,
        hound::SampleFormat::Int => {
            let max_value = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|s| s as f32 / max_value))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    let buffer = AudioBuffer::from_interleaved(&samples, spec.channels as u32, spec.sample_rate)?;
    let config = AnalysisConfig::default();

    let metrics = buffer.metrics();
    println!("Signal:");
    println!("  duration: {:.2}s at {} Hz", metrics.duration_seconds, metrics.sample_rate);
    println!("  rms: {:.6}, peak: {:.6}", metrics.rms_energy, metrics.peak_amplitude);

    let analysis = estimate_tempo(&buffer, &config)?;
    let report = analysis.report();
    println!("Tempo:");
    println!("{}", serde_json::to_string_pretty(&report)?);

    let class = SignalClass::from_metrics(&metrics, &config);
    let plan = recommend(class, &analysis);
    println!("Plan: {:?}", plan.strategy);
    for rec in &plan.recommendations {
        println!("  - {}", rec);
    }

    match sync_from_analysis(&analysis, metrics.duration_seconds, buffer.sample_rate(), 4) {
        Ok(payload) => {
            println!("Sync payload:");
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        Err(e) => println!("No sync payload: {}", e),
    }

    Ok(())
}
