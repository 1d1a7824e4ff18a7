use krawl_core::{SearchEngine, SearchOutcome};
use std::io::{self, BufRead, Write};

/// Input that ends the session.
pub const QUIT: &str = "q";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    AwaitingQuery,
    Processing(String),
    Terminated,
}

/// Interactive query loop over a loaded engine.
///
/// `feed` takes a line while awaiting a query, `process` runs it and goes
/// back to awaiting. `q` or `cancel` (end of input in `run`) terminates.
pub struct Session<'a> {
    engine: &'a SearchEngine,
    state: State,
}

impl<'a> Session<'a> {
    pub fn new(engine: &'a SearchEngine) -> Self {
        Self { engine, state: State::AwaitingQuery }
    }

    pub fn state(&self) -> &State { &self.state }

    pub fn is_terminated(&self) -> bool { self.state == State::Terminated }

    /// Lines arriving in any state other than `AwaitingQuery` are ignored.
    pub fn feed(&mut self, line: &str) -> &State {
        if self.state == State::AwaitingQuery {
            let query = line.trim();
            self.state = if query == QUIT {
                State::Terminated
            } else {
                State::Processing(query.to_string())
            };
        }
        &self.state
    }

    /// Run the pending query, if any.
    pub fn process(&mut self) -> Option<(String, SearchOutcome)> {
        match std::mem::replace(&mut self.state, State::AwaitingQuery) {
            State::Processing(query) => {
                let outcome = self.engine.search(&query);
                Some((query, outcome))
            }
            other => {
                self.state = other;
                None
            }
        }
    }

    pub fn cancel(&mut self) {
        self.state = State::Terminated;
    }

    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut out: W) -> io::Result<()> {
        let mut line = String::new();
        while !self.is_terminated() {
            write!(out, "query (q to quit) => ")?;
            out.flush()?;
            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                self.cancel();
                break;
            }
            self.feed(&line);
            if let Some((query, outcome)) = self.process() {
                render(&mut out, &query, &outcome)?;
            }
        }
        tracing::debug!("search session terminated");
        Ok(())
    }
}

pub fn render<W: Write>(out: &mut W, query: &str, outcome: &SearchOutcome) -> io::Result<()> {
    writeln!(out, "results for => {query}")?;
    match outcome {
        SearchOutcome::EmptyQuery => writeln!(out, "query has no searchable terms")?,
        SearchOutcome::NoResults => writeln!(out, "no results")?,
        SearchOutcome::Ranked { results, total_hits } => {
            for (rank, hit) in results.iter().enumerate() {
                writeln!(out, "{:>2}. {} (score {:.4})", rank + 1, hit.path, hit.score)?;
            }
            writeln!(out, "{} of {} matching documents", results.len(), total_hits)?;
        }
    }
    Ok(())
}
