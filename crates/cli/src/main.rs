//! Command-line front end for dotgraph.
//!
//! Reads a JSON graph description and either prints its DOT text or pipes it
//! through a Graphviz-compatible tool.
//!
//! Usage:
//!   dotgraph graph.json --emit-dot
//!   dotgraph graph.json --tool dot --format png -o graph.png

use anyhow::{bail, Context, Result};
use clap::Parser;
use dotgraph_graph::{GraphDescription, RenderOptions};
use log::info;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "dotgraph", version, about)]
struct Args {
    /// JSON graph description (stdin when omitted or `-`)
    input: Option<PathBuf>,

    /// Print the DOT text instead of rendering it
    #[arg(long, conflicts_with_all = ["tool", "format", "timeout_secs", "strict"])]
    emit_dot: bool,

    /// Layout tool to run, e.g. `dot`
    #[arg(long, required_unless_present = "emit_dot")]
    tool: Option<PathBuf>,

    /// Output format passed to the tool as `-T<format>`
    #[arg(long, short = 'T', required_unless_present = "emit_dot")]
    format: Option<String>,

    /// Kill the tool after this many seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Exit with an error when the tool reports a problem
    #[arg(long)]
    strict: bool,

    /// Write output here instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let source = read_input(args.input.as_deref())?;
    let graph = GraphDescription::from_json(&source)?.into_graph();
    info!(
        "loaded graph '{}' ({} vertices, {} arcs)",
        graph.name(),
        graph.vertex_count(),
        graph.arc_count()
    );

    let bytes = if args.emit_dot {
        let mut text = graph.serialize();
        text.push('\n');
        text.into_bytes()
    } else {
        let options = render_options(&args)?;
        if args.strict {
            let output = graph.try_render(&options)?;
            if output.failed() {
                bail!(
                    "'{}' failed with code {}: {}",
                    options.command_line(),
                    output.exit_code(),
                    output.stderr.trim_end()
                );
            }
            output.stdout
        } else {
            graph.render(&options)
        }
    };

    write_output(args.output.as_deref(), &bytes)
}

fn render_options(args: &Args) -> Result<RenderOptions> {
    let (Some(tool), Some(format)) = (&args.tool, &args.format) else {
        bail!("--tool and --format are required unless --emit-dot is given");
    };
    let mut options = RenderOptions::new(tool, format);
    if let Some(secs) = args.timeout_secs {
        options = options.with_timeout(Duration::from_secs(secs));
    }
    Ok(options)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("Error reading file '{}'", path.display())),
        _ => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("Error reading stdin")?;
            Ok(source)
        }
    }
}

fn write_output(path: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(path) => fs::write(path, bytes)
            .with_context(|| format!("Error writing file '{}'", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(bytes).context("Error writing stdout")?;
            stdout.flush().context("Error writing stdout")
        }
    }
}
