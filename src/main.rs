use anyhow::Context;
use clap::{Parser, Subcommand};
use config::Config;
use dashboard::DashboardApp;
use image_classifier::gateway::ClassifierGateway;
use image_classifier::impl_fake::ImageClassifierFake;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use std::path::PathBuf;
use std::sync::Arc;

mod config;
mod dashboard;
mod dataset;
mod evaluation;
mod fault;
mod image_classifier;
mod library;

#[derive(Parser)]
#[command(author, version, about = "Solar panel thermal fault detection and tracking")]
struct Args {
    /// Load settings from a YAML file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Override the ONNX model path
    #[arg(long, global = true)]
    model: Option<String>,
    /// Use the built-in deterministic classifier instead of the model
    #[arg(long, global = true, default_value_t = false)]
    fake_classifier: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Classify one thermal image and print the top label
    Predict { image: PathBuf },
    /// Report top-1 / top-5 accuracy over a labelled dataset split
    Evaluate {
        #[arg(long, default_value = "test")]
        split: String,
    },
    /// Print per-class image counts of a dataset split
    Dataset {
        #[arg(long, default_value = "train")]
        split: String,
    },
    /// Open the fault detection dashboard (default)
    Dashboard,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(model) = args.model {
        config.model.onnx_model_path = model;
    }

    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(config.logger_timezone()));

    let gateway = if args.fake_classifier {
        ClassifierGateway::with_classifier(
            Arc::new(ImageClassifierFake::new(logger.clone())),
            logger.clone(),
        )
    } else {
        ClassifierGateway::onnx(config.model.clone(), logger.clone())
    };

    match args.command.unwrap_or(Command::Dashboard) {
        Command::Predict { image } => {
            let _ = logger.info(&format!("Analyzing image: {}", image.display()));
            let classification = gateway
                .classify_path(&image)
                .with_context(|| format!("classifying {}", image.display()))?;

            println!("Prediction: {}", classification.fault_type);
            println!("Confidence: {:.2}%", classification.confidence * 100.0);
        }
        Command::Evaluate { split } => {
            let dir = config.dataset_dir.join(&split);
            let classes = dataset::scan_split(&dir)?;
            let report = evaluation::evaluate(&gateway, &classes, logger.clone())
                .context("evaluating model")?;

            println!("Evaluation on {} ({} images)", dir.display(), report.images);
            println!("Top-1 Accuracy: {:.4}", report.top1_accuracy());
            println!("Top-5 Accuracy: {:.4}", report.top5_accuracy());
            if report.failures > 0 {
                println!("Unreadable images: {}", report.failures);
            }
        }
        Command::Dataset { split } => {
            let dir = config.dataset_dir.join(&split);
            let classes = dataset::scan_split(&dir)?;

            println!("Dataset: {}", dir.display());
            println!("Classes: {}", classes.len());
            for class in &classes {
                let marker = if class.fault_type.is_some() { "" } else { " (not a fault class)" };
                println!("   {}: {} images{}", class.label, class.images.len(), marker);
            }
        }
        Command::Dashboard => {
            let app = DashboardApp::new(config, logger, gateway);
            dashboard::run(app).map_err(|e| anyhow::anyhow!("dashboard failed: {}", e))?;
        }
    }

    Ok(())
}
