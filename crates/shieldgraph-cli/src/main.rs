use serde::Serialize;
use serde_json::Value;
use shieldgraph::render::{GraphView, LayoutConfig, RenderOptions, layout};
use shieldgraph::{Finding, FindingsDocument, normalize};
use std::io::Read;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Core(shieldgraph::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Core(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<shieldgraph::Error> for CliError {
    fn from(value: shieldgraph::Error) -> Self {
        Self::Core(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    Normalize,
    Layout,
    #[default]
    Render,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    severity: Option<String>,
    finding_id: Option<String>,
    out: Option<String>,
}

fn usage() -> &'static str {
    "shieldgraph-cli\n\
\n\
USAGE:\n\
  shieldgraph-cli normalize [--pretty] [--finding-id <id>] [<path>|-]\n\
  shieldgraph-cli layout [--pretty] [--finding-id <id>] [<path>|-]\n\
  shieldgraph-cli [render] [--severity <label>] [--finding-id <id>] [--out <path>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - Input may be a bare attack-path object, a finding record (its\n\
    attack_path field is used, severity/finding-id default from the\n\
    record), or a findings feed document ({\"findings\": [...]}); for a\n\
    feed, --finding-id selects a record and the first one is used\n\
    otherwise.\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "normalize" => args.command = Command::Normalize,
            "layout" => args.command = Command::Layout,
            "render" => args.command = Command::Render,
            "--pretty" => args.pretty = true,
            "--severity" => {
                let Some(sev) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.severity = Some(sev.clone());
            }
            "--finding-id" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.finding_id = Some(id.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

/// Unwraps the attack path from whichever of the three accepted input
/// shapes arrived: findings feed, single finding record, bare attack path.
fn resolve_input(
    value: &Value,
    finding_id: Option<&str>,
) -> Result<(Value, Option<Finding>), CliError> {
    let is_feed = value.is_array()
        || value
            .get("findings")
            .is_some_and(Value::is_array);
    if is_feed {
        let doc = FindingsDocument::from_value(value);
        let finding = doc.select(finding_id)?.clone();
        return Ok((finding.attack_path_value().clone(), Some(finding)));
    }

    if value.get("attack_path").is_some() {
        let finding = Finding::from_value(value);
        return Ok((finding.attack_path_value().clone(), Some(finding)));
    }

    Ok((value.clone(), None))
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let value: Value = serde_json::from_str(&text)?;
    let (raw_path, finding) = resolve_input(&value, args.finding_id.as_deref())?;

    match args.command {
        Command::Normalize => {
            write_json(&normalize(&raw_path), args.pretty)?;
            Ok(())
        }
        Command::Layout => {
            let path = normalize(&raw_path);
            write_json(&layout(&path, &LayoutConfig::default()), args.pretty)?;
            Ok(())
        }
        Command::Render => {
            let severity = args
                .severity
                .clone()
                .or_else(|| finding.as_ref().map(|f| f.severity().as_str().to_string()));
            let finding_id = args
                .finding_id
                .clone()
                .or_else(|| finding.as_ref().map(Finding::safe_id));
            let options = RenderOptions {
                severity,
                finding_id,
                ..Default::default()
            };
            let view = GraphView::render(&raw_path, options);
            write_text(&view.svg(), args.out.as_deref())?;
            Ok(())
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
