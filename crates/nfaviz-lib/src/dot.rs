//! Graphviz DOT serialization of renderer event streams.
//!
//! Output lines follow event order, so equal event streams produce
//! byte-identical artifacts. Rasterizing the artifact with the `dot` tool is
//! the caller's concern.

use std::fmt::Write;

use crate::automaton::Tag;
use crate::render::Event;

/// Coloring of the exported diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Color every state and edge by the grammar rule that introduced it.
    Tagged,
    /// No colors; used for the canonical view.
    Plain,
}

fn color(tag: Tag) -> &'static str {
    match tag {
        Tag::Char => "black",
        Tag::ConcatJoin => "gray",
        Tag::Alternation => "blue",
        Tag::Closure => "red",
    }
}

/// Serialize an event stream into a DOT digraph.
pub fn render(events: &[Event], style: Style) -> String {
    let mut out = String::new();
    out.push_str("digraph nfa {\n");
    out.push_str("    rankdir=LR;\n");
    out.push_str("    start [shape=plaintext label=\"\"];\n");
    out.push_str("    node [shape=circle];\n");

    for event in events {
        match *event {
            Event::Initial(id) => {
                let _ = writeln!(out, "    start -> {id};");
            }
            Event::State { id, tag, accepting } => {
                let mut attrs = Vec::new();
                if accepting {
                    attrs.push("shape=doublecircle".to_string());
                }
                if style == Style::Tagged {
                    attrs.push(format!("color={}", color(tag)));
                }
                if attrs.is_empty() {
                    let _ = writeln!(out, "    {id};");
                } else {
                    let _ = writeln!(out, "    {id} [{}];", attrs.join(" "));
                }
            }
            Event::Edge {
                from,
                to,
                label,
                tag,
            } => match style {
                Style::Tagged => {
                    let _ = writeln!(
                        out,
                        "    {from} -> {to} [label=\"{label}\" color={}];",
                        color(tag)
                    );
                }
                Style::Plain => {
                    let _ = writeln!(out, "    {from} -> {to} [label=\"{label}\"];");
                }
            },
        }
    }

    out.push_str("}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::render::{canonical, verbatim};
    use indoc::indoc;

    #[test]
    fn tagged_view_of_a_symbol() {
        let nfa = parse("a").unwrap();
        let artifact = render(&verbatim(&nfa), Style::Tagged);
        assert_eq!(
            artifact,
            indoc! {r#"
                digraph nfa {
                    rankdir=LR;
                    start [shape=plaintext label=""];
                    node [shape=circle];
                    start -> s0;
                    s0 [color=black];
                    s0 -> s1 [label="a" color=black];
                    s1 [shape=doublecircle color=black];
                }
            "#}
        );
    }

    #[test]
    fn plain_view_elides_the_join() {
        let nfa = parse("ab").unwrap();
        let artifact = render(&canonical(&nfa), Style::Plain);
        assert_eq!(
            artifact,
            indoc! {r#"
                digraph nfa {
                    rankdir=LR;
                    start [shape=plaintext label=""];
                    node [shape=circle];
                    start -> s0;
                    s0;
                    s0 -> s2 [label="a"];
                    s2;
                    s2 -> s3 [label="b"];
                    s3 [shape=doublecircle];
                }
            "#}
        );
    }

    #[test]
    fn tagged_view_colors_the_join() {
        let nfa = parse("ab").unwrap();
        let artifact = render(&verbatim(&nfa), Style::Tagged);
        assert!(artifact.contains("s1 [color=gray];"));
        assert!(artifact.contains(r#"s1 -> s2 [label="ε" color=gray];"#));
    }

    #[test]
    fn closure_edges_are_red_and_epsilon_labeled() {
        let nfa = parse("a*").unwrap();
        let artifact = render(&verbatim(&nfa), Style::Tagged);
        assert!(artifact.contains(r#"s1 -> s0 [label="ε" color=red];"#));
        assert!(artifact.contains("s3 [shape=doublecircle color=red];"));
    }
}
