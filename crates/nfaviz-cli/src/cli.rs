//! Command-line surface.

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, value_parser};

pub fn build_cli() -> Command {
    Command::new("nfaviz")
        .about("Render a regular expression as Thompson NFA diagrams")
        .arg(
            Arg::new("expr")
                .short('e')
                .long("expr")
                .value_name("PATTERN")
                .help("Pattern to render (read from stdin when omitted)"),
        )
        .arg(
            Arg::new("out_dir")
                .short('o')
                .long("out-dir")
                .value_name("DIR")
                .value_parser(value_parser!(PathBuf))
                .default_value(".")
                .help("Directory the DOT artifacts are written to"),
        )
        .arg(
            Arg::new("prefix")
                .long("prefix")
                .value_name("NAME")
                .default_value("nfa")
                .help("Artifact name prefix"),
        )
        .arg(
            Arg::new("render")
                .long("render")
                .action(ArgAction::SetTrue)
                .help("Also rasterize each artifact to PNG with `dot`"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .action(ArgAction::Count)
                .help("Increase log verbosity (-v, -vv)"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Suppress log output"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let matches = build_cli().get_matches_from(["nfaviz"]);
        assert_eq!(
            matches.get_one::<PathBuf>("out_dir"),
            Some(&PathBuf::from("."))
        );
        assert_eq!(matches.get_one::<String>("prefix").map(String::as_str), Some("nfa"));
        assert!(!matches.get_flag("render"));
    }

    #[test]
    fn inline_pattern() {
        let matches = build_cli().get_matches_from(["nfaviz", "-e", "(a|b)*"]);
        assert_eq!(
            matches.get_one::<String>("expr").map(String::as_str),
            Some("(a|b)*")
        );
    }
}
