use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, Command};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use ndrtext::{load_interface, NdrFormatter, OutputFormat, RenderContext, RenderedDocument};

fn build_cli() -> Command {
    Command::new("ndrtext")
        .about("Render decoded NDR interface descriptions as tagged C-like text")
        .arg(
            Arg::new("input")
                .help("Interface description JSON file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .help("Output format")
                .value_parser(["text", "json"])
                .default_value("text"),
        )
        .arg(
            Arg::new("indent")
                .long("indent")
                .help("Spaces per indentation level")
                .value_parser(value_parser!(usize))
                .default_value("4"),
        )
        .arg(
            Arg::new("no-offsets")
                .long("no-offsets")
                .help("Omit structure member offset comments")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("proc-numbers")
                .long("proc-numbers")
                .help("Prefix procedures with their procedure number")
                .action(ArgAction::SetTrue),
        )
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let matches = build_cli().get_matches();

    let input_file = matches
        .get_one::<String>("input")
        .context("Missing input file")?;

    let mut context = RenderContext::new();
    if let Some(width) = matches.get_one::<usize>("indent") {
        context = context.with_indent_width(*width);
    }
    context.show_offsets = !matches.get_flag("no-offsets");
    context.show_proc_numbers = matches.get_flag("proc-numbers");
    context.format = match matches.get_one::<String>("format").map(String::as_str) {
        Some("json") => OutputFormat::Json,
        _ => OutputFormat::Text,
    };

    let interface = load_interface(input_file)?;
    debug!(input = %input_file, "loaded interface description");

    let formatter = NdrFormatter::new(context);
    let builder = formatter
        .format_interface(&interface)
        .with_context(|| format!("Failed to render interface {}", interface.name))?;

    match formatter.context().format {
        OutputFormat::Text => print!("{}", builder),
        OutputFormat::Json => {
            let document = RenderedDocument::from_builder(&builder);
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
    }

    Ok(())
}
