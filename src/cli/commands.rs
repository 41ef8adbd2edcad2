use anyhow::{bail, Context, Result};
use clap::ArgMatches;
use log::{info, warn};

use crate::config::Config;
use crate::devices::{list_serial_ports, ByteSource, ReplaySource};
use crate::nmea::dispatcher::parse_detailed;
use crate::nmea::fix_record::FixRecord;
use crate::nmea::validator::check;
use crate::output::Reporter;
use crate::services::{GpsService, NavigationPipeline, PipelineEvent};

pub async fn handle_subcommands(matches: &ArgMatches, config: &Config) -> Result<()> {
    match matches.subcommand() {
        Some(("monitor", _)) => monitor(config).await,
        Some(("replay", sub)) => {
            let file = sub.get_one::<String>("file").context("missing replay file")?;
            replay(file, config).await
        }
        Some(("check", sub)) => {
            let sentence = sub.get_one::<String>("sentence").context("missing sentence")?;
            check_sentence(sentence)
        }
        Some(("ports", _)) => ports(),
        Some(("init-config", sub)) => {
            let path = sub.get_one::<String>("path").context("missing destination path")?;
            Config::default()
                .save_to_file(path)
                .with_context(|| format!("writing {}", path))?;
            println!("✅ Default configuration written to {}", path);
            Ok(())
        }
        Some((other, _)) => bail!("unknown command {:?}", other),
        None => bail!("no command given"),
    }
}

async fn monitor(config: &Config) -> Result<()> {
    let reporter = Reporter::from_config(&config.output).await?;
    let service = GpsService::new(config.clone());
    let mut updates = service.start().await?;

    info!("🛑 Press Ctrl+C to stop");
    reporter.header().await;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!("\n🛑 Stopping GPS monitor...");
                break;
            }
            update = updates.recv() => match update {
                Some(update) => reporter.update(update.kind, &update.record).await,
                None => {
                    warn!("⚠️ GPS reader exited");
                    break;
                }
            }
        }
    }

    service.stop().await;
    info!("{}", service.get_status().await);
    Ok(())
}

async fn replay(path: &str, config: &Config) -> Result<()> {
    let mut source = ReplaySource::from_path(path)?;
    let reporter = Reporter::from_config(&config.output).await?;
    reporter.header().await;

    let mut pipeline = NavigationPipeline::new(config.framer_capacity);
    let mut outcomes = pipeline.outcomes(source.bytes());
    while let Some(event) = outcomes.next() {
        match event {
            PipelineEvent::Updated { kind, field_errors, .. } => {
                for e in &field_errors {
                    warn!("⚠️ {}", e);
                }
                reporter.update(kind, outcomes.record()).await;
            }
            PipelineEvent::Unsupported { code } => info!("⏭️ Skipped {}", code),
            PipelineEvent::Dropped(e) => warn!("⚠️ Dropped sentence: {}", e),
        }
    }

    let stats = pipeline.stats().clone();
    info!("📊 Replay finished: {}", stats);
    reporter.summary(&stats).await;
    Ok(())
}

fn check_sentence(sentence: &str) -> Result<()> {
    let mut line = sentence.trim().to_string();
    line.push_str("\r\n");

    if let Err(e) = check(&line) {
        println!("❌ Invalid sentence: {}", e);
        return Ok(());
    }
    println!("✅ Checksum OK");

    let mut record = FixRecord::new();
    let report = parse_detailed(&line, &mut record);
    match report.kind {
        Some(kind) => {
            println!("📋 {} -> {:?}", kind, report.outcome);
            for e in &report.field_errors {
                println!("   ⚠️ {}", e);
            }
            println!("{}", record);
        }
        None => println!("⏭️ Sentence type is not parsed"),
    }
    Ok(())
}

fn ports() -> Result<()> {
    let ports = list_serial_ports()?;
    if ports.is_empty() {
        println!("❌ No serial ports found");
        return Ok(());
    }

    println!("📡 Available serial ports:");
    for (name, description) in ports {
        println!("   {} ({})", name, description);
    }
    Ok(())
}
