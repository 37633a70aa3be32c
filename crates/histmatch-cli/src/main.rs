use std::path::PathBuf;

use clap::Parser;

use histmatch_core::decoders::decode_image;
use histmatch_core::exporters::export_image;
use histmatch_core::models::MatchOptions;
use histmatch_core::pipeline::match_images;

/// Mode token enabling grayscale-routed matching
const GRAYSCALE_FLAG: &str = "-gray";

#[derive(Parser)]
#[command(name = "histmatch")]
#[command(version, about = "Percentile histogram matching between images", long_about = None)]
struct Cli {
    /// Image whose colors will be remapped
    #[arg(value_name = "SOURCE")]
    source: PathBuf,

    /// Image providing the target color distribution
    #[arg(value_name = "REFERENCE")]
    reference: PathBuf,

    /// Output file path (format chosen by extension)
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Optional mode token; "-gray" routes the match through a grayscale
    /// copy of the source, any other value is ignored
    #[arg(value_name = "MODE", allow_hyphen_values = true)]
    mode: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let options = MatchOptions {
        grayscale: cli.mode.as_deref() == Some(GRAYSCALE_FLAG),
    };

    if let Err(e) = run(&cli, &options) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli, options: &MatchOptions) -> Result<(), String> {
    println!(
        "Matching {} against {}...",
        cli.source.display(),
        cli.reference.display()
    );

    println!("Decoding images...");
    let source = decode_image(&cli.source)?;
    println!(
        "  Source: {}x{}, {} channels",
        source.width, source.height, source.channels
    );
    let reference = decode_image(&cli.reference)?;
    println!(
        "  Reference: {}x{}, {} channels",
        reference.width, reference.height, reference.channels
    );

    if options.grayscale {
        println!("Applying grayscale-routed match...");
    } else {
        println!("Applying per-channel match...");
    }
    let result = match_images(&source, &reference, options)?;

    println!("Exporting to {}...", cli.output.display());
    export_image(&result, &cli.output)?;

    println!("Done! Matched image saved to: {}", cli.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_missing_arguments_fail() {
        assert!(Cli::try_parse_from(["histmatch", "a.png", "b.png"]).is_err());
    }

    #[test]
    fn test_gray_token_parses_as_mode() {
        let cli =
            Cli::try_parse_from(["histmatch", "a.png", "b.png", "out.png", "-gray"]).unwrap();

        assert_eq!(cli.mode.as_deref(), Some(GRAYSCALE_FLAG));
    }

    #[test]
    fn test_other_mode_token_leaves_grayscale_off() {
        let cli =
            Cli::try_parse_from(["histmatch", "a.png", "b.png", "out.png", "color"]).unwrap();

        assert_ne!(cli.mode.as_deref(), Some(GRAYSCALE_FLAG));
    }

    #[test]
    fn test_three_arguments_parse_without_mode() {
        let cli = Cli::try_parse_from(["histmatch", "a.png", "b.png", "out.png"]).unwrap();

        assert!(cli.mode.is_none());
        assert_eq!(cli.output, PathBuf::from("out.png"));
    }
}
