mod cli;

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::exit;

use log::{debug, info};
use nfaviz_lib::{Error, Style, dot, parse, render};

fn main() {
    let matches = cli::build_cli().get_matches();

    stderrlog::new()
        .quiet(matches.get_flag("quiet"))
        .verbosity(matches.get_count("verbose") as usize + 1)
        .init()
        .ok();

    let pattern = match matches.get_one::<String>("expr") {
        Some(expr) => expr.clone(),
        None => match read_pattern() {
            Ok(line) => line,
            Err(err) => {
                eprintln!("error: {err}");
                exit(1);
            }
        },
    };

    let nfa = match parse(&pattern) {
        Ok(nfa) => nfa,
        Err(err) => {
            report(&pattern, &err);
            exit(1);
        }
    };
    info!("automaton has {} states", nfa.num_states());

    let out_dir = matches
        .get_one::<PathBuf>("out_dir")
        .unwrap_or_else(|| unreachable!("clap should have defaulted this"));
    let prefix = matches
        .get_one::<String>("prefix")
        .unwrap_or_else(|| unreachable!("clap should have defaulted this"));
    let rasterize = matches.get_flag("render");

    let artifacts = [
        ("verbatim", dot::render(&render::verbatim(&nfa), Style::Tagged)),
        ("canonical", dot::render(&render::canonical(&nfa), Style::Plain)),
    ];

    for (view, text) in artifacts {
        let path = out_dir.join(format!("{prefix}-{view}.dot"));
        if let Err(err) = fs::write(&path, text) {
            eprintln!("error: cannot write {}: {err}", path.display());
            exit(1);
        }
        info!("wrote {}", path.display());

        if rasterize {
            if let Err(err) = rasterize_dot(&path) {
                eprintln!("error: {err}");
                exit(1);
            }
        }
    }
}

/// Prompt on stderr and read one line; a newline or carriage return ends the
/// expression.
fn read_pattern() -> io::Result<String> {
    eprint!("pattern> ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\n', '\r']).to_string())
}

/// Print the diagnostic with a caret marking the offending byte.
fn report(pattern: &str, err: &Error) {
    eprintln!("error: {err}");
    if let Some(offset) = err.offset() {
        eprintln!("  {pattern}");
        eprintln!("  {}^", " ".repeat(offset));
    }
}

fn rasterize_dot(path: &Path) -> io::Result<()> {
    let png = path.with_extension("png");
    let status = std::process::Command::new("dot")
        .arg("-Tpng")
        .arg(path)
        .arg("-o")
        .arg(&png)
        .status()
        .map_err(|err| {
            io::Error::new(
                err.kind(),
                format!("cannot run `dot` (is Graphviz installed?): {err}"),
            )
        })?;
    if !status.success() {
        return Err(io::Error::other(format!("`dot` failed on {}", path.display())));
    }
    debug!("rasterized {}", png.display());
    Ok(())
}
