//! lensmark CLI - render a package README to HTML

use std::io::{self, Read, Write};
use std::process::ExitCode;

use lensmark::{Block, Options, PackageDocument, Readme, Theme};

const USAGE: &str = "usage: lensmark [--json] [--blocks] [--dark] [--pad] [FILE|-]";

/// Command-line flags.
#[derive(Debug, Default)]
struct Args {
    json: bool,
    blocks: bool,
    options: Options,
    path: Option<String>,
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args::default();
    for arg in args {
        match arg.as_str() {
            "--json" => parsed.json = true,
            "--blocks" => parsed.blocks = true,
            "--dark" => parsed.options.theme = Theme::Dark,
            "--pad" => parsed.options.pad_rows = true,
            "-h" | "--help" => return Err(USAGE.to_string()),
            flag if flag.starts_with("--") => return Err(format!("unknown flag {flag}\n{USAGE}")),
            _ if parsed.path.is_some() => return Err(format!("unexpected argument {arg}\n{USAGE}")),
            _ => parsed.path = Some(arg),
        }
    }
    Ok(parsed)
}

fn read_input(path: Option<&str>) -> io::Result<String> {
    match path {
        Some(path) if path != "-" => std::fs::read_to_string(path),
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn write_blocks(out: &mut impl Write, blocks: &[Block<'_>]) -> io::Result<()> {
    for block in blocks {
        match block {
            Block::Text(text) => {
                writeln!(out, "[text]")?;
                writeln!(out, "{text}")?;
            }
            Block::Table(rows) => {
                writeln!(out, "[table {} rows]", rows.len())?;
                for row in rows {
                    writeln!(out, "{row}")?;
                }
            }
        }
    }
    Ok(())
}

/// Block listing of a registry description. Only Markdown descriptions are
/// segmented; reStructuredText and plain text are written raw.
fn write_document_blocks(out: &mut impl Write, document: &PackageDocument) -> io::Result<()> {
    let Some(description) = document.description() else {
        log::warn!("package {} has no description", document.info.name);
        return Ok(());
    };
    match document.markdown_description() {
        Some(markdown) => write_blocks(out, &Readme::new(markdown).blocks()),
        None => {
            writeln!(out, "[raw {:?}]", document.content_type())?;
            writeln!(out, "{description}")
        }
    }
}

fn run(args: Args) -> lensmark::Result<()> {
    let input = read_input(args.path.as_deref())?;
    let mut stdout = io::stdout().lock();

    if args.json {
        let document = PackageDocument::from_json(&input)?;
        if args.blocks {
            write_document_blocks(&mut stdout, &document)?;
        } else if let Some(html) = document.readme_html(&args.options) {
            stdout.write_all(html.as_bytes())?;
        } else {
            log::warn!("package {} has no description", document.info.name);
        }
        return Ok(());
    }

    let readme = Readme::new(&input);
    if args.blocks {
        write_blocks(&mut stdout, &readme.blocks())?;
    } else {
        stdout.write_all(readme.to_html(&args.options).as_bytes())?;
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::from(2);
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("lensmark: {err}");
            ExitCode::FAILURE
        }
    }
}
