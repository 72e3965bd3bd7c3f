//! Recursive-descent fragment builder.
//!
//! Each grammar rule synthesizes a [`Fragment`] (entry/exit pair) from the
//! fragments of its sub-expressions and composes them by attaching epsilon
//! edges, allocating states into the arena as it reduces. Nothing flows
//! downward: the build is synthesized-attribute-only, which is why every
//! concatenation leaves one epsilon-only join state behind instead of
//! merging — the canonical renderer elides it later.
//!
//! Grammar:
//!
//! ```text
//! Expr    → Seq | Seq `|` Expr        (right-associative)
//! Seq     → Closure | Closure Seq
//! Closure → Atom | Atom `*`
//! Atom    → `(` Expr `)` | symbol
//! ```
//!
//! Note the missing production for a closure over a bare closure: `a**` is
//! a syntax error and `(a*)*` is the required spelling.

use log::debug;

use crate::automaton::{EdgeLabel, Nfa, StateId, Tag};
use crate::lexer::{self, Token, TokenKind};
use crate::{Error, Result};

/// The synthesized attribute of every rule: an entry/exit state pair.
///
/// A freshly built fragment's exit has no outgoing edges (it is a candidate
/// accepting state) until the fragment is composed into a larger one.
struct Fragment {
    entry: StateId,
    exit: StateId,
}

/// Build the automaton for a pattern.
///
/// On success the returned graph is rooted at its entry state; on failure no
/// automaton escapes.
pub fn parse(pattern: &str) -> Result<Nfa> {
    let tokens = lexer::lex(pattern)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        nfa: Nfa::new(),
    };

    let fragment = parser.parse_expr()?;
    if let Some(token) = parser.peek() {
        return Err(Error::UnexpectedToken {
            found: token.kind.describe(),
            at: token.span.start,
        });
    }

    parser.nfa.set_start(fragment.entry);
    debug!(
        "built automaton: {} states, start {}",
        parser.nfa.num_states(),
        fragment.entry
    );
    Ok(parser.nfa)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    nfa: Nfa,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.peek().map(|t| t.kind) == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn at_atom_start(&self) -> bool {
        matches!(
            self.peek(),
            Some(Token {
                kind: TokenKind::Symbol(_) | TokenKind::OpenParen,
                ..
            })
        )
    }

    /// Expr → Seq | Seq `|` Expr
    fn parse_expr(&mut self) -> Result<Fragment> {
        let left = self.parse_seq()?;
        if self.eat(TokenKind::Pipe) {
            let right = self.parse_expr()?;
            return Ok(self.alternate(left, right));
        }
        Ok(left)
    }

    /// Seq → Closure | Closure Seq
    fn parse_seq(&mut self) -> Result<Fragment> {
        let left = self.parse_closure()?;
        if self.at_atom_start() {
            let right = self.parse_seq()?;
            return Ok(self.concatenate(left, right));
        }
        Ok(left)
    }

    /// Closure → Atom | Atom `*`
    fn parse_closure(&mut self) -> Result<Fragment> {
        let atom = self.parse_atom()?;
        if self.eat(TokenKind::Star) {
            if let Some(token) = self.peek()
                && token.kind == TokenKind::Star
            {
                return Err(Error::ChainedClosure {
                    at: token.span.start,
                });
            }
            return Ok(self.close(atom));
        }
        Ok(atom)
    }

    /// Atom → `(` Expr `)` | symbol
    fn parse_atom(&mut self) -> Result<Fragment> {
        let Some(token) = self.peek().cloned() else {
            return Err(Error::UnexpectedEnd);
        };

        match token.kind {
            TokenKind::Symbol(c) => {
                self.pos += 1;
                Ok(self.symbol(c))
            }
            TokenKind::OpenParen => {
                self.pos += 1;
                let inner = self.parse_expr()?;
                if !self.eat(TokenKind::CloseParen) {
                    return Err(Error::UnclosedGroup {
                        open: token.span.start,
                    });
                }
                // Grouping is a pass-through; no states are allocated.
                Ok(inner)
            }
            kind => Err(Error::UnexpectedToken {
                found: kind.describe(),
                at: token.span.start,
            }),
        }
    }

    /// Two fresh states joined by a single labeled edge.
    fn symbol(&mut self, c: char) -> Fragment {
        let entry = self.nfa.alloc(Tag::Char);
        let exit = self.nfa.alloc(Tag::Char);
        let state = self.nfa.state_mut(entry);
        state.label = EdgeLabel::Symbol(c);
        state.out[0] = Some(exit);
        Fragment { entry, exit }
    }

    /// Concatenation keeps `left.exit` in the graph as an epsilon-only hop
    /// to `right.entry`, retagged as the join of the two fragments.
    fn concatenate(&mut self, left: Fragment, right: Fragment) -> Fragment {
        let join = self.nfa.state_mut(left.exit);
        join.tag = Tag::ConcatJoin;
        join.label = EdgeLabel::Epsilon;
        join.out[0] = Some(right.entry);
        Fragment {
            entry: left.entry,
            exit: right.exit,
        }
    }

    /// Fresh entry forking into both operands, operand exits funneled into a
    /// shared fresh exit.
    fn alternate(&mut self, left: Fragment, right: Fragment) -> Fragment {
        let entry = self.nfa.alloc(Tag::Alternation);
        let exit = self.nfa.alloc(Tag::Alternation);
        self.nfa.state_mut(entry).out = [Some(left.entry), Some(right.entry)];
        for branch_exit in [left.exit, right.exit] {
            let state = self.nfa.state_mut(branch_exit);
            state.tag = Tag::Alternation;
            state.label = EdgeLabel::Epsilon;
            state.out[0] = Some(exit);
        }
        Fragment { entry, exit }
    }

    /// Fresh entry that either enters or skips the body; the body exit
    /// either leaves or repeats. The repeat edge is the sole source of
    /// cycles in the whole graph.
    fn close(&mut self, body: Fragment) -> Fragment {
        let entry = self.nfa.alloc(Tag::Closure);
        let exit = self.nfa.alloc(Tag::Closure);
        self.nfa.state_mut(entry).out = [Some(body.entry), Some(exit)];
        let state = self.nfa.state_mut(body.exit);
        state.tag = Tag::Closure;
        state.label = EdgeLabel::Epsilon;
        state.out = [Some(exit), Some(body.entry)];
        Fragment { entry, exit }
    }
}
