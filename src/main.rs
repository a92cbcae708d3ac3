use anyhow::Result;
use clap::Parser;
use receipt_ocr::app::App;
use receipt_ocr::image::mime::normalize_mime;
use receipt_ocr::models::Extraction;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "receipt-ocr")]
#[command(about = "Extract the text of a price receipt with Gemini")]
struct CliArgs {
    /// Receipt image (PNG or JPEG).
    #[arg(value_name = "IMAGE")]
    image: PathBuf,

    /// Media type to declare for the image, e.g. image/png.
    #[arg(long, value_parser = parse_mime_arg)]
    mime_type: Option<String>,

    /// Print the outcome as JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn parse_mime_arg(input: &str) -> std::result::Result<String, String> {
    normalize_mime(input)
        .map(str::to_string)
        .ok_or_else(|| {
            format!(
                "Unsupported media type '{}'. Expected image/png or image/jpeg",
                input
            )
        })
}

fn render_outcome(outcome: &Extraction) -> String {
    match outcome {
        Extraction::Text(text) => format!("Text extracted successfully!\n\n```\n{}\n```", text),
        Extraction::Empty => "Warning: no text was extracted from the image.".to_string(),
    }
}

fn report_failure(err: &receipt_ocr::Error) -> ! {
    eprintln!("Error: {}", err);
    if let Some(hint) = err.hint() {
        eprintln!("{}", hint);
    }
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "receipt_ocr=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    let app = App::new().unwrap_or_else(|e| report_failure(&e));

    info!("Running OCR on {}", args.image.display());
    let outcome = app
        .extract_file(&args.image, args.mime_type.as_deref())
        .await
        .unwrap_or_else(|e| report_failure(&e));

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else if outcome.is_empty() {
        eprintln!("{}", render_outcome(&outcome));
    } else {
        println!("{}", render_outcome(&outcome));
    }

    Ok(())
}
