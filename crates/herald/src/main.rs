//! Herald server binary.
//!
//! Wires the in-memory stores, the echo generator, and the platform
//! adapters into a running server: two scheduler tick loops plus the
//! health/metrics API. Real Instagram and LinkedIn adapters activate when
//! their credentials are present in the environment.

use clap::Parser;
use herald::support::{EnvAuthStore, LogNotifier, UrlAssetStore};
use herald::{
    BrandId, BrandProfile, BrandSchedule, BrandStore, EchoGenerator, Frequency, HeraldConfig,
    HeraldServer, InMemoryAuditSink, InMemoryBrandStore, InMemoryContentStore,
    InMemoryControlStore, InstagramPublisher, LinkedInPublisher, Orchestrator, Platform,
    PublisherRegistry,
};
use herald_interface::AuthStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "herald", about = "Automated social-media content production")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Seed a demo brand with a daily LinkedIn schedule
    #[arg(long)]
    seed: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    let config = match &cli.config {
        Some(path) => HeraldConfig::from_file(path)?,
        None => HeraldConfig::default(),
    };

    let content = Arc::new(InMemoryContentStore::new());
    let brands = Arc::new(InMemoryBrandStore::new());
    let control = Arc::new(InMemoryControlStore::new());
    let audit = Arc::new(InMemoryAuditSink::new());

    let auth = Arc::new(EnvAuthStore::new());
    let assets = Arc::new(UrlAssetStore::new());

    let mut registry = PublisherRegistry::simulated();
    if auth.credentials(Platform::Instagram).is_some() {
        info!("Instagram credentials found; using Graph API publisher");
        registry = registry.with_publisher(Arc::new(
            InstagramPublisher::new(auth.clone(), assets.clone())
                .with_base_url(config.instagram.base_url.clone())
                .with_polling(config.instagram.poll_attempts, config.instagram.poll_delay()),
        ));
    }
    if auth.credentials(Platform::LinkedIn).is_some() {
        info!("LinkedIn credentials found; using UGC API publisher");
        registry = registry.with_publisher(Arc::new(LinkedInPublisher::new(auth.clone())));
    }

    if cli.seed {
        seed_demo_brand(brands.as_ref()).await?;
    }

    let orchestrator = Orchestrator::new(
        content,
        brands,
        control,
        audit,
        Arc::new(EchoGenerator::new()),
        registry,
        Arc::new(LogNotifier::new()),
    );

    HeraldServer::new(config, orchestrator).start().await?;
    Ok(())
}

async fn seed_demo_brand(brands: &dyn BrandStore) -> Result<(), Box<dyn std::error::Error>> {
    let brand = BrandProfile {
        id: BrandId::new(),
        name: "Demo Coffee Co".into(),
        industry: "specialty coffee".into(),
        voice_tone: vec!["warm".into(), "playful".into()],
        target_audience: "urban coffee drinkers".into(),
        key_messages: vec!["single-origin beans, roasted weekly".into()],
        do_not_mention: vec!["competitors".into()],
        approver_emails: vec!["reviews@demo.coffee".into()],
        schedule: Some(BrandSchedule {
            enabled: true,
            frequency: Frequency::Daily,
            days_of_week: vec![],
            times_of_day: vec!["09:00".into()],
            platforms: vec![Platform::LinkedIn],
            auto_generate_image: false,
            prompt_template: None,
        }),
        created_at: chrono::Utc::now(),
    };
    info!(brand = %brand.name, id = %brand.id, "Seeded demo brand");
    brands.insert(brand).await?;
    Ok(())
}
