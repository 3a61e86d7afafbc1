use anyhow::Result;
use chrono::Local;
use clap::Parser;
use copywriting_assistant::app::{App, EMPTY_IMAGES_MESSAGE};
use copywriting_assistant::image::{download_file_name, PngExporter};
use copywriting_assistant::models::{
    AspectRatio, ContentType, ImageOptions, MarketingRequest, Tone, MAX_IMAGES_PER_REQUEST,
};
use copywriting_assistant::Error;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "copywriting-assistant")]
#[command(about = "Generate marketing copy and product images with Gemini")]
struct CliArgs {
    /// Product Description, Ad Headline, Social Media Post or Email Subject Line.
    #[arg(long, value_parser = parse_content_type)]
    content_type: ContentType,

    #[arg(long)]
    product_name: String,

    /// Product description / key features.
    #[arg(long)]
    description: String,

    #[arg(long)]
    audience: String,

    /// Professional, Friendly, Excited, Luxurious, Playful or Direct.
    #[arg(long, value_parser = parse_tone, default_value = "Professional")]
    tone: Tone,

    #[arg(long, default_value_t = copywriting_assistant::ai::DEFAULT_TEMPERATURE)]
    temperature: f32,

    /// Also generate companion image(s).
    #[arg(long)]
    image: bool,

    /// Requested number of image variations; the model may return fewer.
    #[arg(
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u8).range(1..=MAX_IMAGES_PER_REQUEST as i64)
    )]
    count: u8,

    #[arg(long, value_parser = parse_aspect_ratio, default_value = "1:1")]
    aspect_ratio: AspectRatio,

    /// Directory that receives a per-run folder of PNG downloads.
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,
}

fn parse_content_type(input: &str) -> std::result::Result<ContentType, String> {
    input.parse()
}

fn parse_tone(input: &str) -> std::result::Result<Tone, String> {
    input.parse()
}

fn parse_aspect_ratio(input: &str) -> std::result::Result<AspectRatio, String> {
    input.parse()
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "copywriting_assistant=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    let app = match App::new() {
        Ok(app) => app.with_temperature(args.temperature),
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    let request = MarketingRequest {
        content_type: args.content_type,
        product_name: args.product_name.clone(),
        product_description: args.description.clone(),
        target_audience: args.audience.clone(),
        tone: args.tone,
    };
    let image_options = args.image.then_some(ImageOptions {
        count: args.count,
        aspect_ratio: args.aspect_ratio,
    });

    let outcome = match app.generate(&request, image_options.as_ref()).await {
        Ok(outcome) => outcome,
        Err(Error::Validation(message)) => {
            warn!("{}", message);
            eprintln!("{}", message);
            std::process::exit(2);
        }
        Err(e) => {
            error!("Generation failed: {}", e);
            std::process::exit(1);
        }
    };

    println!("Generated Marketing Copy:\n");
    match &outcome.text {
        Ok(text) => println!("{}\n", text),
        Err(e) => eprintln!("{}\n", e),
    }

    if let Some(images) = outcome.images {
        match images {
            Ok(images) if images.is_empty() => eprintln!("{}", EMPTY_IMAGES_MESSAGE),
            Ok(images) => {
                let run_dir = args.output_dir.join(format!(
                    "{}_{}",
                    Local::now().format("%Y-%m-%d"),
                    Uuid::new_v4()
                ));
                let exporter = PngExporter::new(&run_dir)?;

                for (i, image) in images.iter().enumerate() {
                    let file_name =
                        download_file_name(&request.product_name, request.content_type, i);
                    match exporter.save(image, &file_name).await {
                        Ok(path) => println!("Image {}: {}", i + 1, path.display()),
                        Err(e) => error!("Failed to save image {}: {}", i + 1, e),
                    }
                }
                info!("Images written to {}", exporter.output_dir().display());
            }
            Err(e) => eprintln!("{}", e),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_form_fields() {
        let args = CliArgs::try_parse_from([
            "copywriting-assistant",
            "--content-type",
            "ad headline",
            "--product-name",
            "GlowUp Serum",
            "--description",
            "brightens skin",
            "--audience",
            "women 25-45",
            "--tone",
            "excited",
            "--image",
            "--count",
            "2",
            "--aspect-ratio",
            "16:9",
        ])
        .unwrap();

        assert_eq!(args.content_type, ContentType::AdHeadline);
        assert_eq!(args.tone, Tone::Excited);
        assert!(args.image);
        assert_eq!(args.count, 2);
        assert_eq!(args.aspect_ratio, AspectRatio::Widescreen);
        assert_eq!(args.temperature, 0.7);
    }

    #[test]
    fn test_cli_rejects_out_of_range_count() {
        let result = CliArgs::try_parse_from([
            "copywriting-assistant",
            "--content-type",
            "Ad Headline",
            "--product-name",
            "x",
            "--description",
            "y",
            "--audience",
            "z",
            "--count",
            "5",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_aspect_ratio_invalid() {
        let err = parse_aspect_ratio("2:1").unwrap_err();
        assert!(err.contains("16:9"));
    }
}
