//! qr-export CLI
//!
//! Usage:
//!   qr-export [OPTIONS] [CONTENT]
//!
//! Options:
//!   -l, --label <TEXT>        Name used for the file and print title
//!   -f, --format <FORMAT>     png, jpg or svg
//!   -s, --size <PRESET>       small, medium, large, print-a4 or custom
//!   -o, --output-dir <DIR>    Where downloads are saved
//!   -c, --config <FILE>       Settings file (TOML format)
//!   --print                   Compose a print document instead of a download
//!   -h, --help                Print help

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;

use qr_export::export::{resolve, size::SizePreset};
use qr_export::logging::{init_logging, LogConfig, LogFormat};
use qr_export::{
    Artifact, Event, ExportError, ExportFormat, FsHost, Host, Outcome, PrintAction, PrintError,
    PrintView, Session, Settings,
};

#[derive(Parser)]
#[command(name = "qr-export")]
#[command(about = "Render a QR code and export it as PNG, JPG, SVG or a print document")]
struct Cli {
    /// Text or URL to encode (reads from stdin if not provided)
    content: Option<String>,

    /// Label used for the file name and print title
    #[arg(short, long)]
    label: Option<String>,

    /// Download format: png, jpg or svg
    #[arg(short, long)]
    format: Option<ExportFormat>,

    /// Size preset: small, medium, large, print-a4 or custom
    #[arg(short, long)]
    size: Option<String>,

    /// Pixel size for the custom preset (50-2048)
    #[arg(long)]
    custom_pixels: Option<u32>,

    /// Directory downloads are saved to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Settings file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Compose a print document and open it (or pass it to the print command)
    #[arg(long)]
    print: bool,

    /// Write the rendered SVG to stdout instead of exporting
    #[arg(long)]
    svg_stdout: bool,

    /// Write the export as a data: URI to stdout instead of saving it
    #[arg(long)]
    data_uri: bool,

    /// List size presets and their pixel sizes
    #[arg(long)]
    presets: bool,

    /// Print an annotated default settings file
    #[arg(long)]
    default_config: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,

    /// Log format: pretty, compact or json
    #[arg(long, default_value = "pretty")]
    log_format: LogFormat,
}

/// Host that writes artifacts to stdout as data URIs
struct DataUriHost;

impl Host for DataUriHost {
    fn save(&mut self, artifact: &Artifact) -> io::Result<PathBuf> {
        println!("{}", artifact.data_uri());
        Ok(PathBuf::from(&artifact.filename))
    }

    fn open_print_view(&mut self, _title: &str) -> Result<Box<dyn PrintView>, PrintError> {
        Err(PrintError::blocked("data URI output cannot print"))
    }
}

fn main() {
    let cli = Cli::parse();

    init_logging(
        &LogConfig::from_verbosity(cli.verbose, cli.quiet)
            .with_format(cli.log_format)
            .with_ansi(io::stderr().is_terminal()),
    );

    // Handle documentation flags first
    if cli.presets {
        print_presets();
        return;
    }

    if cli.default_config {
        print!("{}", qr_export::settings::DEFAULT_SETTINGS);
        return;
    }

    // If no content and stdin is a terminal (interactive), show intro help
    if cli.content.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    let settings = match &cli.config {
        Some(path) => match Settings::from_file(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error loading settings '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };

    let content = match cli.content.clone() {
        Some(content) => content,
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer.trim_end_matches(['\r', '\n']).to_string(),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    if let Err(e) = run(&cli, &settings, content) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli, settings: &Settings, content: String) -> Result<(), ExportError> {
    let config = settings.export_config();
    let mut session = Session::with_parameters(settings.parameters);

    let dir = cli
        .output_dir
        .clone()
        .or_else(|| settings.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    let fs_host = FsHost::new(dir).with_print_action(settings.print_action.clone());
    let mut host: Box<dyn Host> = if cli.data_uri {
        Box::new(DataUriHost)
    } else {
        Box::new(fs_host.clone())
    };

    let mut events = vec![Event::EditContent(content)];
    if let Some(label) = &cli.label {
        events.push(Event::EditLabel(label.clone()));
    }
    if let Some(format) = cli.format {
        events.push(Event::SelectFormat(format));
    }
    if let Some(size) = &cli.size {
        events.push(Event::SelectSize(SizePreset::from_name(size)));
    }
    if let Some(pixels) = cli.custom_pixels {
        events.push(Event::SetCustomPixels(pixels));
    }
    for event in events {
        session.handle(event, &config, host.as_mut())?;
    }

    if session.handle(Event::Generate, &config, host.as_mut())? == Outcome::Ignored {
        return Err(ExportError::EmptyContent);
    }

    if cli.svg_stdout {
        println!("{}", session.surface().extract()?);
        return Ok(());
    }

    let action = if cli.print { Event::Print } else { Event::Download };
    match session.handle(action, &config, host.as_mut())? {
        Outcome::Downloaded(artifact) if !cli.data_uri => {
            eprintln!("Saved {}", artifact.filename);
        }
        Outcome::Printed(document) => {
            let path = fs_host.print_path(&document.title);
            match fs_host.print_action() {
                PrintAction::Open => eprintln!("Opened print document {}", path.display()),
                PrintAction::Command(command) => {
                    eprintln!("Sent {} to `{}`", path.display(), command)
                }
                PrintAction::WriteOnly => eprintln!("Wrote print document {}", path.display()),
            }
        }
        _ => {}
    }
    Ok(())
}

fn print_presets() {
    println!("SIZE PRESETS");
    println!("============");
    for preset in SizePreset::ALL {
        match preset {
            SizePreset::Custom => println!(
                "{:<10} {:<10} --custom-pixels, clamped to 50..2048",
                preset.slug(),
                preset.display_name()
            ),
            _ => println!(
                "{:<10} {:<10} {}x{} px",
                preset.slug(),
                preset.display_name(),
                resolve(preset, 0),
                resolve(preset, 0)
            ),
        }
    }
}

fn print_intro() {
    println!(
        r#"qr-export - render a QR code and export it

USAGE:
    qr-export [OPTIONS] [CONTENT]
    echo 'https://example.com' | qr-export

OPTIONS:
    -l, --label        Name for the file and print title
    -f, --format       png, jpg or svg
    -s, --size         small, medium, large, print-a4 or custom
    --custom-pixels    Size for the custom preset (50-2048)
    -o, --output-dir   Where downloads are saved
    -c, --config       Settings file (TOML)
    --print            Compose a print document instead of a download
    --svg-stdout       Write the SVG to stdout
    --data-uri         Write the export as a data: URI to stdout
    --presets          List size presets
    --default-config   Print an annotated settings file
    -h, --help         Print help

QUICK START:
    qr-export 'https://example.com' -l 'My Site' -f png -s large

This writes my-site-large.png (512x512) to the current directory."#
    );
}
