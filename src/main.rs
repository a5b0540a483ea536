//! vhtag batch entrypoint: tags every event of a JSON file and writes one JSON line per event.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::Context;
use mimalloc::MiMalloc;

use vhtag::config::{Config, TaggerConfig};
use vhtag::event::Event;
use vhtag::leptonic::ZhLeptonicTagger;
use vhtag::tagger::{EventRecord, VhHadTagger};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = Config::from_env();
    config.validate()?;

    let tagger_config = match &config.tagger_config_path {
        Some(path) => TaggerConfig::from_path(path)?,
        None => {
            let config = TaggerConfig::from_env()?;
            config.validate()?;
            config
        }
    };

    tracing::info!(
        events_path = %config.events_path.display(),
        tagger_config = ?config.tagger_config_path,
        "vhtag starting"
    );

    let hadronic = VhHadTagger::new(&tagger_config)?;
    let leptonic = ZhLeptonicTagger::new(tagger_config.leptonic.clone())?;

    let bytes = std::fs::read(&config.events_path)
        .with_context(|| format!("reading {}", config.events_path.display()))?;
    let events: Vec<Event> = serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing {}", config.events_path.display()))?;

    tracing::info!(events = events.len(), "Events loaded");

    let mut out: Box<dyn Write> = match &config.output_path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let mut tagged = 0usize;
    for event in &events {
        let record = EventRecord {
            event_id: event.id,
            hadronic: hadronic.process_event(event)?,
            leptonic: leptonic.tag_event(event)?,
        };
        tagged += record.leptonic.len();

        serde_json::to_writer(&mut out, &record)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;

    tracing::info!(events = events.len(), leptonic_tags = tagged, "vhtag finished");
    Ok(())
}
