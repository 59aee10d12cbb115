use dataconsole::{Namespace, extract_names};
use rustyline::Context;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;

/// Line-editor helper completing chained expressions against a [`Namespace`].
pub struct ConsoleHelper {
    namespace: Namespace,
}

impl ConsoleHelper {
    pub fn new(namespace: Namespace) -> Self {
        ConsoleHelper { namespace }
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Returns the byte offset the candidates replace from, and the candidates.
    pub fn candidates(&self, line: &str, pos: usize) -> (usize, Vec<Pair>) {
        let names = extract_names(line, pos);
        let partial = names.last().map_or(0, |name| name.len());
        let start = pos.min(line.len()).saturating_sub(partial);

        let pairs = self
            .namespace
            .complete(&names)
            .into_iter()
            .map(|c| Pair {
                display: c.display,
                replacement: c.replacement,
            })
            .collect::<Vec<_>>();
        log::debug!("completion at {pos}: chain={names:?} candidates={}", pairs.len());
        (start, pairs)
    }
}

impl Completer for ConsoleHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self.candidates(line, pos))
    }
}

impl Hinter for ConsoleHelper {
    type Hint = String;
}

impl Highlighter for ConsoleHelper {}

impl Validator for ConsoleHelper {}

impl rustyline::Helper for ConsoleHelper {}

#[cfg(test)]
mod tests {
    use super::ConsoleHelper;
    use dataconsole::Namespace;

    fn replacements(line: &str, pos: usize) -> (usize, Vec<String>) {
        let helper = ConsoleHelper::new(Namespace::builtin());
        let (start, pairs) = helper.candidates(line, pos);
        (start, pairs.into_iter().map(|p| p.replacement).collect())
    }

    #[test]
    fn test_replacement_starts_at_partial_name() {
        let line = "Requests.indexRequests.index('index_name').ty";
        assert_eq!(replacements(line, line.len()), (line.len() - 2, vec!["type(".to_string()]));
    }

    #[test]
    fn test_empty_partial_lists_all_members() {
        let (start, items) = replacements("es.", 3);
        assert_eq!(start, 3);
        assert_eq!(items, ["index(", "get(", "delete(", "search(", "count(", "createIndex("]);
    }

    #[test]
    fn test_cursor_in_middle_of_line() {
        // completing "Req" with "uests" still to the right of the cursor
        assert_eq!(replacements("Requests", 3), (0, vec!["Requests".to_string()]));
    }

    #[test]
    fn test_globals_after_boundary() {
        let (start, items) = replacements("x = ", 4);
        assert_eq!(start, 4);
        assert_eq!(items, ["Requests", "es"]);
    }

    #[test]
    fn test_unknown_chain_has_no_candidates() {
        let (start, items) = replacements("foo.ba", 6);
        assert_eq!(start, 4);
        assert!(items.is_empty());
    }
}
