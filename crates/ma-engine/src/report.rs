//! Outcomes of evaluated checks and their reporting

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use serde::Serialize;

use crate::error::{AssertError, AssertResult};
use crate::kind::AssertionKind;

/// Result of one evaluated check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    /// Path as displayed, `field` or `field.subfield`
    pub path: String,
    pub kind: AssertionKind,
    pub passed: bool,
    pub message: String,
}

/// Successes and failures collected during one run
#[derive(Debug, Clone, Default)]
pub struct Outcomes {
    successes: Vec<Outcome>,
    failures: Vec<Outcome>,
}

impl Outcomes {
    pub fn record(&mut self, outcome: Outcome) {
        if outcome.passed {
            self.successes.push(outcome);
        } else {
            self.failures.push(outcome);
        }
    }

    pub fn successes(&self) -> &[Outcome] {
        &self.successes
    }

    pub fn failures(&self) -> &[Outcome] {
        &self.failures
    }

    pub fn len(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    pub fn clear(&mut self) {
        self.successes.clear();
        self.failures.clear();
    }
}

/// Summary of a run in which every check passed
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub type_name: String,
    pub successes: Vec<Outcome>,
    pub elapsed_ms: f64,
}

impl RunReport {
    pub fn check_count(&self) -> usize {
        self.successes.len()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Destination of the lines a run reports
pub trait Reporter {
    fn report(&mut self, line: &str);
}

/// Prints report lines to standard output
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutReporter;

impl Reporter for StdoutReporter {
    fn report(&mut self, line: &str) {
        println!("{}", line);
    }
}

/// Keeps report lines in memory
///
/// Clones share the same buffer, so one clone can be handed to a builder and
/// the other inspected after the run.
#[derive(Debug, Clone, Default)]
pub struct BufferReporter {
    lines: Rc<RefCell<Vec<String>>>,
}

impl BufferReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    /// Lines containing `needle`
    pub fn matching(&self, needle: &str) -> Vec<String> {
        self.lines
            .borrow()
            .iter()
            .filter(|line| line.contains(needle))
            .cloned()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.borrow().is_empty()
    }
}

impl Reporter for BufferReporter {
    fn report(&mut self, line: &str) {
        self.lines.borrow_mut().push(line.to_string());
    }
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, line: &str) {
        (**self).report(line);
    }
}

pub(crate) fn start_line(type_name: &str) -> String {
    format!("=> MultiAssert is testing two objects of the type '{}'.", type_name)
}

fn success_summary(type_name: &str, elapsed: Duration) -> String {
    format!(
        "=> MultiAssert tests for two '{}' ended successfully with no errors and lasted {:.3} milliseconds.",
        type_name,
        millis(elapsed)
    )
}

fn failure_summary(type_name: &str, count: usize, elapsed: Duration) -> String {
    format!(
        "=> MultiAssert tests for '{}' ended with {} error(s) and lasted {:.3} milliseconds.",
        type_name,
        count,
        millis(elapsed)
    )
}

fn millis(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() * 1000.0
}

/// Report the end of a run, failing it if any check failed
///
/// Failure messages are always reported; summaries only when verbose.
pub(crate) fn finish(
    type_name: &str,
    outcomes: &Outcomes,
    elapsed: Duration,
    verbose: bool,
    reporter: &mut dyn Reporter,
) -> AssertResult<RunReport> {
    let failures = outcomes.failures();
    if !failures.is_empty() {
        for failure in failures {
            reporter.report(&failure.message);
        }
        if verbose {
            reporter.report(&failure_summary(type_name, failures.len(), elapsed));
            reporter.report("");
        }
        return Err(AssertError::Aggregate {
            count: failures.len(),
        });
    }

    if verbose {
        reporter.report(&success_summary(type_name, elapsed));
        reporter.report("");
    }
    Ok(RunReport {
        type_name: type_name.to_string(),
        successes: outcomes.successes().to_vec(),
        elapsed_ms: millis(elapsed),
    })
}
