//! CLI для NBT-документов.
//!
//! Подкоманды: `dump` (дерево тегов), `info` (сводка о документе) и
//! `convert` (перезапись с другим сжатием).

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nbtree::{init_logging, CompressionMode, Document, Settings, Tag};
use tracing::debug;

/// Аргументы командной строки.
#[derive(Parser)]
#[command(name = "nbtree-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspect and convert named binary tag (NBT) documents", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Читать вход как несжатый, без пробы заголовка
    #[arg(long, global = true)]
    raw: bool,
    /// Лимит вложенности контейнеров
    #[arg(long, global = true)]
    max_depth: Option<usize>,
    /// Файл конфигурации (по умолчанию `nbtree.toml`, если есть)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Подробный вывод (debug)
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Отключить логирование
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Вывести дерево тегов
    Dump {
        file: PathBuf,
    },
    /// Показать сжатие, имя и тип корня
    Info {
        file: PathBuf,
    },
    /// Перезаписать документ, при необходимости сменив сжатие
    Convert {
        input: PathBuf,
        output: PathBuf,
        /// gzip, zlib или none; по умолчанию как у входа
        #[arg(long)]
        compression: Option<CompressionMode>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings =
        Settings::load_from(cli.config.as_deref()).context("Failed to load settings")?;
    if let Some(depth) = cli.max_depth {
        settings.max_depth = depth;
    }

    let mut logging = settings.logging_config();
    if cli.quiet {
        logging.level = "off".to_string();
    } else if cli.verbose {
        logging.level = "debug".to_string();
    }
    init_logging(&logging).context("Failed to initialize logging")?;

    debug!("Settings: {settings:?}");
    run(&cli, &settings)
}

fn run(
    cli: &Cli,
    settings: &Settings,
) -> Result<()> {
    match &cli.command {
        Commands::Dump { file } => {
            let doc = load(file, cli.raw, settings)?;
            print!("{doc}");
        }
        Commands::Info { file } => {
            let doc = load(file, cli.raw, settings)?;
            println!("{}", describe(&doc));
        }
        Commands::Convert {
            input,
            output,
            compression,
        } => {
            let mut doc = load(input, cli.raw, settings)?;
            let fallback = if cli.raw {
                settings.compression
            } else {
                doc.compression()
            };
            doc.set_compression(compression.unwrap_or(fallback));
            doc.save_to_path(output)
                .with_context(|| format!("Failed to write '{}'", output.display()))?;
            debug!(
                "Converted '{}' -> '{}' ({})",
                input.display(),
                output.display(),
                doc.compression()
            );
        }
    }
    Ok(())
}

fn load(
    path: &Path,
    raw: bool,
    settings: &Settings,
) -> Result<Document> {
    let file = File::open(path).with_context(|| format!("Failed to open '{}'", path.display()))?;
    let mut reader = BufReader::new(file);
    let mut doc = Document::new().with_options(settings.decode_options());

    if raw {
        doc.load_raw(&mut reader)
    } else {
        doc.load(&mut reader)
    }
    .with_context(|| format!("Failed to load '{}'", path.display()))?;

    Ok(doc)
}

fn describe(doc: &Document) -> String {
    let mut lines = vec![format!("compression: {}", doc.compression())];
    if let Some(root) = doc.named_root() {
        lines.push(format!("root: '{}' ({})", root.name, root.tag.kind()));
        let children = match &root.tag {
            Tag::Compound(c) => Some(c.len()),
            Tag::List(l) => Some(l.len()),
            _ => None,
        };
        if let Some(n) = children {
            lines.push(format!("entries: {n}"));
        }
    }
    lines.join("\n")
}
