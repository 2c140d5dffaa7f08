//! Regression table for the comment grammar.
//!
//! Runs a fixed set of known-good and known-bad comment lines through
//! [recognize](crate::recognize) without touching any file.

use crate::comment::{recognize, CommentSyntax};
use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Expectation {
    /// The line is recognized as an inline comment with the given syntax and payload.
    Accept {
        syntax: CommentSyntax,
        payload: &'static str,
    },
    Reject,
}

#[derive(Debug, Copy, Clone)]
pub struct SelfTestCase {
    pub line: &'static str,
    pub expect: Expectation,
}

const fn accept(line: &'static str, payload: &'static str) -> SelfTestCase {
    SelfTestCase {
        line,
        expect: Expectation::Accept {
            syntax: CommentSyntax::Line,
            payload,
        },
    }
}

const fn accept_css(line: &'static str, payload: &'static str) -> SelfTestCase {
    SelfTestCase {
        line,
        expect: Expectation::Accept {
            syntax: CommentSyntax::Block,
            payload,
        },
    }
}

const fn reject(line: &'static str) -> SelfTestCase {
    SelfTestCase {
        line,
        expect: Expectation::Reject,
    }
}

#[rustfmt::skip]
pub const SELF_TEST_CASES: &[SelfTestCase] = &[
    accept("//# sourceMappingURL=data:application/json;base64,", ""),
    accept("//# sourceMappingURL=data:application/json;base64,eh==", "eh=="),
    accept("//# sourceMappingURL=data:application/json;base64,foo=", "foo="),
    accept("//# sourceMappingURL=data:application/json;base64,Zm9v", "Zm9v"),
    accept("//# sourceMappingURL=data:application/json;base64,Zm9veh==", "Zm9veh=="),
    accept("//# sourceMappingURL=data:application/json;base64,Zm9vfoo=", "Zm9vfoo="),
    accept("//# sourceMappingURL=data:application/json;base64,Zm9vYmFy\n", "Zm9vYmFy"),
    accept("//# sourceMappingURL=data:application/json;charset=iso-ir-6;base64,foo=", "foo="),
    accept("//# sourceMappingURL=data:application/json;charset=ANSI_X3.4-1968;base64,foo=", "foo="),
    accept("//# sourceMappingURL=data:application/json;charset=ANSI_X3.4-1986;base64,foo=", "foo="),
    accept(
        "//# sourceMappingURL=data:application/json;charset=ISO_646.irv:1991;base64,foo=",
        "foo=",
    ),
    accept("//# sourceMappingURL=data:application/json;charset=ISO646-US;base64,foo=", "foo="),
    accept("//# sourceMappingURL=data:application/json;charset=US-ASCII;base64,foo=", "foo="),
    accept("//# sourceMappingURL=data:application/json;charset=us;base64,foo=", "foo="),
    accept("//# sourceMappingURL=data:application/json;charset=IBM367;base64,foo=", "foo="),
    accept("//# sourceMappingURL=data:application/json;charset=cp367;base64,foo=", "foo="),
    accept("//# sourceMappingURL=data:application/json;charset=csASCII;base64,foo=", "foo="),
    accept("//# sourceMappingURL=data:application/json;charset=UTF-8;base64,foo=", "foo="),
    accept("//# sourceMappingURL=data:application/json;charset=csUTF8;base64,foo=", "foo="),
    accept("//# sourceMappingURL=data:application/json;charset:utf8;base64,foo=", "foo="),
    accept("//# sourceMappingURL=data:application/json;charset:ascii;base64,foo=", "foo="),
    accept_css("/*# sourceMappingURL=data:application/json;base64,css= */", "css="),
    reject("//# sourceMappingURL=data:application/json;charset:latin1;base64,foo="),
    reject("//# sourceMappingURL=data:application/json;charset:ascii;base64,foo"),
    reject("//# sourceMappingURL=data:application/json;charset:ascii;base64,foo-"),
    reject("//# sourceMappingURL=data:application/json;base64,Zm9vYmFy\r\n"),
];

/// What happened to one case.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Outcome {
    Passed,
    /// An expected match failed, with the reason.
    NoMatch(String),
    /// Recognized, but with the wrong syntax or payload.
    Mismatch {
        syntax: CommentSyntax,
        payload: Option<String>,
    },
    /// A line that should be rejected was recognized.
    BogusMatch,
}

#[derive(Debug, Clone)]
pub struct CaseReport {
    pub case: SelfTestCase,
    pub outcome: Outcome,
}

impl CaseReport {
    #[inline]
    pub fn passed(&self) -> bool {
        self.outcome == Outcome::Passed
    }
}

impl Display for CaseReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let line = self.case.line.escape_debug();
        match &self.outcome {
            Outcome::Passed => write!(f, "ok      {line}"),
            Outcome::NoMatch(reason) => write!(f, "FAILED  {line}: no match ({reason})"),
            Outcome::Mismatch { syntax, payload } => write!(
                f,
                "FAILED  {line}: got {syntax:?} comment with payload {payload:?}"
            ),
            Outcome::BogusMatch => write!(f, "FAILED  {line}: bogus match"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SelfTestReport {
    pub cases: Vec<CaseReport>,
}

impl SelfTestReport {
    pub fn passed(&self) -> bool {
        self.cases.iter().all(CaseReport::passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &CaseReport> {
        self.cases.iter().filter(|case| !case.passed())
    }
}

pub fn check(case: SelfTestCase) -> CaseReport {
    let outcome = match (case.expect, recognize(case.line)) {
        (Expectation::Accept { syntax, payload }, Ok(comment)) => {
            if comment.syntax == syntax && comment.payload() == Some(payload) {
                Outcome::Passed
            } else {
                Outcome::Mismatch {
                    syntax: comment.syntax,
                    payload: comment.payload().map(str::to_owned),
                }
            }
        }
        (Expectation::Accept { .. }, Err(reason)) => Outcome::NoMatch(reason.to_string()),
        (Expectation::Reject, Ok(..)) => Outcome::BogusMatch,
        (Expectation::Reject, Err(..)) => Outcome::Passed,
    };
    CaseReport { case, outcome }
}

/// Runs every case of [SELF_TEST_CASES].
pub fn run() -> SelfTestReport {
    SelfTestReport {
        cases: SELF_TEST_CASES.iter().copied().map(check).collect(),
    }
}
