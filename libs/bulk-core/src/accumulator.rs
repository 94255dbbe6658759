//! Line-driven record accumulator shared by the bulk parsers.
//!
//! A grammar classifies each line; the accumulator owns the record under
//! construction and the finished records. It is a two-state machine: either
//! no record is open, or one draft is accumulating lines. Whenever a boundary
//! or a new record start is seen the draft is flushed: kept if the grammar's
//! `finish` accepts it, silently dropped otherwise.

/// What a single line means to a grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified<S, L> {
    /// Nothing but whitespace. Never opens or closes a record.
    Blank,
    /// Explicit record separator (`---`).
    Boundary,
    /// Closes the open record and begins a new one.
    Start(S),
    /// Folds into the open record.
    Continue(L),
    /// Not part of any record.
    Orphan,
}

/// A per-kind grammar plugged into [`Accumulator`].
pub trait LineGrammar {
    /// Payload of a line that starts a record, borrowing from the input.
    type Start<'a>;
    /// Payload of a line folded into the open record.
    type Line<'a>;
    /// Record under construction.
    type Draft;
    /// Finished record.
    type Record;

    /// Classify one line. `accumulating` tells whether a draft is open.
    fn classify<'a>(
        &self,
        line: &'a str,
        accumulating: bool,
    ) -> Classified<Self::Start<'a>, Self::Line<'a>>;

    /// Begin a draft from a `Start` line.
    fn open(&self, start: Self::Start<'_>) -> Self::Draft;

    /// Fold a `Continue` line into the open draft.
    fn extend(&self, draft: &mut Self::Draft, line: Self::Line<'_>);

    /// Turn a draft into a record, or `None` if it is incomplete.
    fn finish(&self, draft: Self::Draft) -> Option<Self::Record>;
}

/// Parse state for one pass over a document.
pub struct Accumulator<G: LineGrammar> {
    grammar: G,
    current: Option<G::Draft>,
    records: Vec<G::Record>,
}

impl<G: LineGrammar> Accumulator<G> {
    pub fn new(grammar: G) -> Self {
        Self {
            grammar,
            current: None,
            records: Vec::new(),
        }
    }

    /// Whether a draft is currently open.
    pub fn is_accumulating(&self) -> bool {
        self.current.is_some()
    }

    /// Feed one line (without its newline).
    pub fn feed(&mut self, line: &str) {
        let line = line.trim_end();
        match self.grammar.classify(line, self.current.is_some()) {
            Classified::Blank | Classified::Orphan => {}
            Classified::Boundary => self.flush(),
            Classified::Start(parsed) => {
                self.flush();
                self.current = Some(self.grammar.open(parsed));
            }
            Classified::Continue(parsed) => {
                if let Some(ref mut draft) = self.current {
                    self.grammar.extend(draft, parsed);
                }
            }
        }
    }

    fn flush(&mut self) {
        if let Some(draft) = self.current.take() {
            if let Some(record) = self.grammar.finish(draft) {
                self.records.push(record);
            }
        }
    }

    /// Flush the last draft and return every committed record in input order.
    pub fn finish(mut self) -> Vec<G::Record> {
        self.flush();
        self.records
    }
}

/// Run a grammar over a whole document.
pub fn parse_with<G: LineGrammar>(grammar: G, text: &str) -> Vec<G::Record> {
    let normalized = normalize_newlines(text);
    let mut acc = Accumulator::new(grammar);
    for line in normalized.split('\n') {
        acc.feed(line);
    }
    acc.finish()
}

/// Rewrite `\r\n` and lone `\r` as `\n`.
fn normalize_newlines(text: &str) -> std::borrow::Cow<'_, str> {
    if text.contains('\r') {
        std::borrow::Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        std::borrow::Cow::Borrowed(text)
    }
}
