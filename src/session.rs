use crate::{StatementOutcome, interpreter::environment::Environment, run_statement};

/// One interactive or scripted session.
///
/// A session owns the [`Environment`] that persists between statements. It is
/// created when a driver starts, receives one line per [`Session::run`] call,
/// and its bindings are dropped with it. Independent sessions share nothing
/// and may live on different threads.
///
/// # Example
/// ```
/// use stackcalc::{Session, StatementOutcome};
///
/// let mut session = Session::new();
/// session.run("x = 2 + 3*4");
/// assert_eq!(session.run("print x + 1"), StatementOutcome::Printed(15.0));
/// ```
#[derive(Debug, Default)]
pub struct Session {
    env: Environment,
}

impl Session {
    /// Starts a session with no variables bound.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one statement against this session's environment.
    pub fn run(&mut self, text: &str) -> StatementOutcome {
        run_statement(text, &mut self.env)
    }

    /// Returns all variables ordered by name.
    #[must_use]
    pub fn variables(&self) -> Vec<(&str, f64)> {
        self.env.sorted()
    }

    /// Read access to the underlying environment.
    #[must_use]
    pub const fn environment(&self) -> &Environment {
        &self.env
    }
}
