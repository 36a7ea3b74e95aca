use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use playlist_cover::{
    CompositionParameters, CoverDocument, CoverEditor, DirectoryDownloads, Exporter, FontFamily,
    FontLibrary, HorizontalAnchor, LogNotifier, ParamEdit, SoftwareRasterizer, TextEffect,
    VerticalAnchor, text_shadow_for,
};

#[derive(Parser, Debug)]
#[command(name = "playlist-cover", version)]
struct Cli {
    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the cover and save it as playlist-cover.png.
    Export(ExportArgs),
    /// Print the text, position and overlay descriptors as JSON.
    Style(CoverArgs),
    /// List the available fonts.
    Fonts,
    /// List the available text effects.
    Effects,
}

/// Cover inputs: an optional document plus flag overrides applied in order.
#[derive(Args, Debug)]
struct CoverArgs {
    /// Input cover document JSON.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Background image (overrides the document).
    #[arg(long)]
    background: Option<PathBuf>,

    /// Cover text; `\n` starts a new line.
    #[arg(long)]
    text: Option<String>,

    /// Font (sf-pro-display, inter, playfair-display, montserrat, roboto).
    #[arg(long)]
    font: Option<FontFamily>,

    /// Text size in px, clamped to 16..=72.
    #[arg(long, allow_hyphen_values = true)]
    size: Option<i64>,

    /// Vertical anchor (top, center, bottom).
    #[arg(long)]
    vertical: Option<VerticalAnchor>,

    /// Horizontal anchor (left, center, right).
    #[arg(long)]
    horizontal: Option<HorizontalAnchor>,

    /// Text effect (none, shadow-sm, shadow-md, shadow-lg, outline-light, outline-dark).
    #[arg(long)]
    effect: Option<TextEffect>,

    /// Rotation in degrees, clamped to -180..=180.
    #[arg(long, allow_hyphen_values = true)]
    rotation: Option<i64>,

    /// Text color, e.g. #FFFFFF.
    #[arg(long)]
    color: Option<String>,

    /// Region edge in CSS px.
    #[arg(long)]
    size_px: Option<u32>,

    /// Device pixels per CSS px.
    #[arg(long)]
    scale: Option<f32>,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[command(flatten)]
    cover: CoverArgs,

    /// Download directory.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Replace an existing playlist-cover.png instead of numbering a new one.
    #[arg(long, default_value_t = false)]
    overwrite: bool,

    /// Extra directory of .ttf/.otf/.ttc files (repeatable).
    #[arg(long)]
    font_dir: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Export(args) => cmd_export(args),
        Command::Style(args) => cmd_style(args),
        Command::Fonts => cmd_fonts(),
        Command::Effects => cmd_effects(),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn build_editor(args: &CoverArgs) -> anyhow::Result<CoverEditor> {
    let doc = match &args.in_path {
        Some(p) => CoverDocument::from_path(p)?,
        None => CoverDocument::default(),
    };

    let mut settings = doc.render;
    if let Some(size_px) = args.size_px {
        settings.size_px = size_px;
    }
    if let Some(scale) = args.scale {
        settings.scale = scale;
    }
    settings.canvas().context("invalid render settings")?;

    let mut editor = CoverEditor::new(doc.params.clone(), settings);
    editor.apply_all(flag_edits(args));

    match args.background.as_ref().or(doc.background.as_ref()) {
        Some(bg) => editor.load_background_from_path(bg)?,
        None => tracing::debug!("no background given"),
    }
    Ok(editor)
}

fn flag_edits(args: &CoverArgs) -> Vec<ParamEdit> {
    let mut edits = Vec::new();
    if let Some(text) = &args.text {
        edits.push(ParamEdit::Text(text.replace("\\n", "\n")));
    }
    if let Some(f) = args.font {
        edits.push(ParamEdit::FontFamily(f));
    }
    if let Some(px) = args.size {
        edits.push(ParamEdit::FontSize(px));
    }
    if let Some(v) = args.vertical {
        edits.push(ParamEdit::VerticalAnchor(v));
    }
    if let Some(h) = args.horizontal {
        edits.push(ParamEdit::HorizontalAnchor(h));
    }
    if let Some(e) = args.effect {
        edits.push(ParamEdit::TextEffect(e));
    }
    if let Some(deg) = args.rotation {
        edits.push(ParamEdit::Rotation(deg));
    }
    if let Some(c) = &args.color {
        edits.push(ParamEdit::TextColor(c.clone()));
    }
    edits
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let editor = build_editor(&args.cover)?;
    let fonts = FontLibrary::with_dirs(&args.font_dir);
    let downloads = DirectoryDownloads::new(&args.out_dir).overwrite(args.overwrite);
    let mut exporter = Exporter::new(SoftwareRasterizer::new(fonts), downloads, LogNotifier);

    match editor.export(&mut exporter) {
        Ok(cover) => {
            eprintln!(
                "wrote {} ({}x{})",
                cover.saved_to.display(),
                cover.width,
                cover.height
            );
            Ok(())
        }
        Err(e) => {
            let notice = e.notice();
            Err(anyhow::Error::new(e).context(notice.message()))
        }
    }
}

fn cmd_style(args: CoverArgs) -> anyhow::Result<()> {
    let editor = build_editor(&args)?;
    let out = serde_json::json!({
        "params": editor.params(),
        "descriptors": editor.descriptors().to_css_json(),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_fonts() -> anyhow::Result<()> {
    let default = CompositionParameters::default().font_family;
    for f in FontFamily::ALL {
        let marker = if f == default { " (default)" } else { "" };
        println!("{:<18} {}{marker}", f.id(), f.display_name());
    }
    Ok(())
}

fn cmd_effects() -> anyhow::Result<()> {
    for e in TextEffect::ALL {
        println!(
            "{:<14} {:<14} {}",
            e.id(),
            e.display_name(),
            text_shadow_for(e).css()
        );
    }
    Ok(())
}

