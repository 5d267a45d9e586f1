#![allow(clippy::print_stderr)]

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;

use jsclean::EmitOptions;

#[derive(Parser, Debug)]
#[command(
    name = "jsclean",
    version,
    about = "Normalizes obfuscated JavaScript-like source to canonical, equally-executable text"
)]
struct CliArgs {
    /// Input file. Reads stdin when omitted.
    input: Option<PathBuf>,

    /// Write output to this file instead of stdout.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Print the normalized AST as JSON instead of source text.
    #[arg(long = "dump-ast")]
    dump_ast: bool,

    /// Stop after the fold/normalize stage, skipping declaration and
    /// sequence flattening.
    #[arg(long = "no-flatten")]
    no_flatten: bool,

    /// Suppress non-fatal notices on stderr.
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
}

fn main() -> Result<()> {
    // Honors RUST_LOG; silent by default. Logs go to stderr so stdout
    // stays pipeable.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let (source, file_name) = read_input(&args)?;

    let mut file = jsclean::parse(&source, &file_name)?;
    jsclean::fold_and_normalize(&mut file)?;

    if args.dump_ast {
        let json = serde_json::to_string_pretty(&file.arena).context("serializing AST")?;
        return write_output(args.output.as_deref(), &json);
    }

    let options = EmitOptions::default();
    let mut text = jsclean::render(&file, &options);

    if !args.no_flatten {
        let mut file = jsclean::parse(&text, &file_name)
            .map_err(|err| anyhow!("intermediate render did not re-parse: {err}"))?;
        jsclean::flatten(&mut file)?;
        text = jsclean::render(&file, &options);
    }

    // Final formatting pass; the plain render is already well-formed, so a
    // failure here only costs the reformat.
    match jsclean::pretty_print(&text, &options) {
        Ok(formatted) => text = formatted,
        Err(err) => {
            if !args.quiet {
                eprintln!("jsclean: pretty-print failed ({err}); emitting plain render");
            }
        }
    }

    write_output(args.output.as_deref(), &text)
}

fn read_input(args: &CliArgs) -> Result<(String, String)> {
    match &args.input {
        Some(path) => {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            Ok((source, path.display().to_string()))
        }
        None => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("reading stdin")?;
            Ok((source, "<stdin>".to_string()))
        }
    }
}

fn write_output(output: Option<&std::path::Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("writing {}", path.display())),
        None => {
            print!("{text}");
            Ok(())
        }
    }
}
