// ============================================================================
// ThemeSplit CLI — headless comparison export via command-line arguments
// ============================================================================
//
// Usage examples:
//   themesplit --light light.png --dark dark.png --output comparison.png
//   themesplit -l light.png -d dark.png -o out.jpg --position 35 --quality 85
//   themesplit --light "shots/light/*.png" --dark "shots/dark/*.png" --output-dir out/
//
// Batch mode pairs the two glob expansions by file stem: shots/light/home.png
// is composed with shots/dark/home.png. No GUI is opened in CLI mode; all
// composition runs synchronously on the current thread.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use crate::compose::compose_split;
use crate::io::{SaveFormat, encode_and_write, load_image};

// ============================================================================
// CLI argument definition (clap Derive)
// ============================================================================

/// ThemeSplit headless comparison exporter.
///
/// Compose a light/dark split image from the command line — no GUI required.
#[derive(Parser, Debug)]
#[command(
    name = "themesplit",
    about = "ThemeSplit headless comparison exporter",
    long_about = "Compose light/dark split comparisons without opening the GUI.\n\
                  Output formats: PNG, JPEG, WEBP, BMP.\n\n\
                  Example:\n  \
                  themesplit --light light.png --dark dark.png --output comparison.png\n  \
                  themesplit -l \"light/*.png\" -d \"dark/*.png\" --output-dir out/ --position 35"
)]
pub struct CliArgs {
    /// Light-theme input: a file path or a glob pattern (batch mode).
    #[arg(short = 'l', long, value_name = "FILE|GLOB")]
    pub light: String,

    /// Dark-theme input: a file path or a glob pattern (batch mode).
    #[arg(short = 'd', long, value_name = "FILE|GLOB")]
    pub dark: String,

    /// Split position as a percentage of the width (0 = all dark, 100 = all light).
    #[arg(short, long, default_value_t = 50.0, value_name = "0-100")]
    pub position: f32,

    /// Output file path. Only valid for a single input pair.
    /// For batch input use --output-dir instead.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output directory for batch mode.
    /// Files are written here as "<stem>_split.<ext>".
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Output format: png, jpeg, webp, bmp.
    /// When omitted, the format is inferred from --output's extension, defaulting to png.
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// JPEG quality (1–100, default 90).
    #[arg(short, long, default_value_t = 90, value_name = "1-100")]
    pub quality: u8,

    /// Print per-pair timing information.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliArgs {
    /// Returns `true` when any CLI-mode flag is present in the real process
    /// arguments. Used by `main()` to route before creating an eframe window.
    pub fn is_cli_mode() -> bool {
        std::env::args().any(|a| a == "--light" || a == "-l" || a == "--dark" || a == "-d")
    }
}

// ============================================================================
// Public entry point
// ============================================================================

/// Run all CLI processing and return an OS exit code.
/// `0` = all pairs succeeded, `1` = one or more pairs failed.
pub fn run(args: CliArgs) -> ExitCode {
    if !(0.0..=100.0).contains(&args.position) {
        eprintln!(
            "error: --position must be between 0 and 100 (got {}).",
            args.position
        );
        return ExitCode::FAILURE;
    }

    let lights = resolve_pattern(&args.light);
    let darks = resolve_pattern(&args.dark);
    if lights.is_empty() {
        eprintln!("error: no light input matched '{}'.", args.light);
        return ExitCode::FAILURE;
    }
    if darks.is_empty() {
        eprintln!("error: no dark input matched '{}'.", args.dark);
        return ExitCode::FAILURE;
    }

    // Pair up the inputs
    let (pairs, unmatched_light, unmatched_dark) = if lights.len() == 1 && darks.len() == 1 {
        (
            vec![(lights[0].clone(), darks[0].clone())],
            Vec::new(),
            Vec::new(),
        )
    } else {
        pair_by_stem(&lights, &darks)
    };

    for path in &unmatched_light {
        eprintln!("warning: no dark counterpart for '{}' — skipped.", path.display());
    }
    for path in &unmatched_dark {
        eprintln!("warning: no light counterpart for '{}' — skipped.", path.display());
    }
    if pairs.is_empty() {
        eprintln!("error: no light/dark pairs with matching file stems.");
        return ExitCode::FAILURE;
    }

    // Multiple pairs require --output-dir, not --output
    if pairs.len() > 1 && args.output.is_some() && args.output_dir.is_none() {
        eprintln!(
            "error: {} input pairs given but --output only accepts a single file path.\n\
             Use --output-dir to specify a destination directory for batch mode.",
            pairs.len()
        );
        return ExitCode::FAILURE;
    }

    let format = parse_format(args.format.as_deref(), args.output.as_deref());

    // Create output directory if specified
    if let Some(dir) = &args.output_dir {
        if let Err(e) = std::fs::create_dir_all(dir) {
            eprintln!(
                "error: could not create output directory '{}': {}",
                dir.display(),
                e
            );
            return ExitCode::FAILURE;
        }
    }

    let total = pairs.len();
    let multi = total > 1;
    let mut any_failure = false;

    for (idx, (light_path, dark_path)) in pairs.iter().enumerate() {
        if multi || args.verbose {
            println!(
                "[{}/{}] {} | {}",
                idx + 1,
                total,
                light_path.display(),
                dark_path.display()
            );
        }

        let pair_start = Instant::now();

        let output_path = build_output_path(
            light_path,
            args.output.as_deref(),
            args.output_dir.as_deref(),
            format,
        );

        match run_one(
            light_path,
            dark_path,
            &output_path,
            args.position,
            format,
            args.quality,
        ) {
            Ok(()) => {
                if args.verbose || multi {
                    println!(
                        "  → {} ({:.0}ms)",
                        output_path.display(),
                        pair_start.elapsed().as_secs_f64() * 1000.0
                    );
                }
            }
            Err(e) => {
                eprintln!("  error: {}", e);
                any_failure = true;
            }
        }
    }

    if any_failure { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}

// ============================================================================
// Per-pair pipeline
// ============================================================================

fn run_one(
    light_path: &Path,
    dark_path: &Path,
    output: &Path,
    position: f32,
    format: SaveFormat,
    quality: u8,
) -> Result<(), String> {
    let light = load_image(light_path)
        .map_err(|e| format!("load failed for '{}': {}", light_path.display(), e))?;
    let dark = load_image(dark_path)
        .map_err(|e| format!("load failed for '{}': {}", dark_path.display(), e))?;

    let composed = compose_split(&light, &dark, position);

    encode_and_write(&composed, output, format, quality)
        .map_err(|e| format!("save failed for '{}': {}", output.display(), e))?;

    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

/// Expand a glob pattern or literal path into an ordered list.
fn resolve_pattern(pattern: &str) -> Vec<PathBuf> {
    let as_path = Path::new(pattern);
    if as_path.exists() {
        return vec![as_path.to_path_buf()];
    }

    match glob::glob(pattern) {
        Ok(entries) => {
            let mut result: Vec<PathBuf> = entries.flatten().collect();
            result.sort();
            result
        }
        Err(e) => {
            eprintln!("warning: invalid glob '{}': {}", pattern, e);
            Vec::new()
        }
    }
}

/// Pair light and dark paths whose file stems match.
/// Returns `(pairs, unmatched_light, unmatched_dark)`; pairs follow the
/// light list's order.
pub fn pair_by_stem(
    lights: &[PathBuf],
    darks: &[PathBuf],
) -> (Vec<(PathBuf, PathBuf)>, Vec<PathBuf>, Vec<PathBuf>) {
    let stem_of = |p: &PathBuf| {
        p.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    };

    let mut pairs = Vec::new();
    let mut unmatched_light = Vec::new();
    let mut used_dark = vec![false; darks.len()];

    for light in lights {
        let stem = stem_of(light);
        let hit = darks
            .iter()
            .enumerate()
            .find(|(i, d)| !used_dark[*i] && stem_of(d) == stem);
        match hit {
            Some((i, dark)) => {
                used_dark[i] = true;
                pairs.push((light.clone(), dark.clone()));
            }
            None => unmatched_light.push(light.clone()),
        }
    }

    let unmatched_dark = darks
        .iter()
        .enumerate()
        .filter(|(i, _)| !used_dark[*i])
        .map(|(_, d)| d.clone())
        .collect();

    (pairs, unmatched_light, unmatched_dark)
}

/// Choose the [`SaveFormat`] from the `--format` string or infer it from the
/// output file extension. Defaults to PNG when neither is known.
fn parse_format(format_arg: Option<&str>, output: Option<&Path>) -> SaveFormat {
    if let Some(f) = format_arg {
        return SaveFormat::from_name(f);
    }
    if let Some(out) = output {
        return SaveFormat::from_path(out);
    }
    SaveFormat::Png
}

/// Compute the output path for a single pair.
///
/// Priority:
/// 1. `--output` (explicit path)
/// 2. `--output-dir` (derives "<light_stem>_split.<ext>")
/// 3. Fallback: next to the light input, "<light_stem>_split.<ext>"
fn build_output_path(
    light: &Path,
    output: Option<&Path>,
    output_dir: Option<&Path>,
    format: SaveFormat,
) -> PathBuf {
    if let Some(out) = output {
        return out.to_path_buf();
    }

    let ext = format.extension();
    let stem = light
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "comparison".to_string());
    let name = format!("{}_split.{}", stem, ext);

    match output_dir {
        Some(dir) => dir.join(name),
        None => light.parent().unwrap_or(Path::new(".")).join(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(list: &[&str]) -> Vec<PathBuf> {
        list.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_pair_by_stem_matches_across_directories() {
        let lights = paths(&["shots/light/home.png", "shots/light/settings.png"]);
        let darks = paths(&["shots/dark/settings.png", "shots/dark/home.png"]);
        let (pairs, ul, ud) = pair_by_stem(&lights, &darks);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].0, PathBuf::from("shots/light/home.png"));
        assert_eq!(pairs[0].1, PathBuf::from("shots/dark/home.png"));
        assert!(ul.is_empty() && ud.is_empty());
    }

    #[test]
    fn test_pair_by_stem_reports_leftovers() {
        let lights = paths(&["l/home.png", "l/extra.png"]);
        let darks = paths(&["d/home.png", "d/other.png"]);
        let (pairs, ul, ud) = pair_by_stem(&lights, &darks);
        assert_eq!(pairs.len(), 1);
        assert_eq!(ul, paths(&["l/extra.png"]));
        assert_eq!(ud, paths(&["d/other.png"]));
    }

    #[test]
    fn test_parse_format_priority() {
        // Explicit --format wins over the output extension
        assert_eq!(
            parse_format(Some("webp"), Some(Path::new("out.png"))),
            SaveFormat::Webp
        );
        // Otherwise inferred from the output path
        assert_eq!(
            parse_format(None, Some(Path::new("out.jpg"))),
            SaveFormat::Jpeg
        );
        // Defaults to PNG
        assert_eq!(parse_format(None, None), SaveFormat::Png);
    }

    #[test]
    fn test_build_output_path() {
        // Explicit output wins
        assert_eq!(
            build_output_path(
                Path::new("l/home.png"),
                Some(Path::new("x/y.webp")),
                None,
                SaveFormat::Webp
            ),
            PathBuf::from("x/y.webp")
        );
        // Output dir derives the name from the light stem
        assert_eq!(
            build_output_path(Path::new("l/home.png"), None, Some(Path::new("out")), SaveFormat::Png),
            PathBuf::from("out/home_split.png")
        );
        // Fallback: next to the light input
        assert_eq!(
            build_output_path(Path::new("l/home.png"), None, None, SaveFormat::Jpeg),
            PathBuf::from("l/home_split.jpg")
        );
    }
}
