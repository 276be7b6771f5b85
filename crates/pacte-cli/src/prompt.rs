use crate::display::{format_timestamp, preview_line};
use pacte_core::Operation;
use pacte_ops::Selector;
use std::io::Write;

fn read_answer() -> Option<String> {
    let _ = std::io::stderr().flush();
    let mut input = String::new();
    std::io::stdin().read_line(&mut input).ok()?;
    Some(input)
}

/// Ask a yes/no question on stderr. Anything but `y`/`yes` is a no.
pub fn confirm(question: &str) -> bool {
    eprint!("{question} [y/N] ");
    read_answer().is_some_and(|a| is_yes(&a))
}

fn is_yes(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

/// Parse a 1-based choice out of `len` items into an index.
fn parse_choice(input: &str, len: usize) -> Option<usize> {
    let n: usize = input.trim().parse().ok()?;
    (1..=len).contains(&n).then(|| n - 1)
}

/// Line-based selector for when no interactive terminal is available.
pub struct NumberedSelector {
    datetime_format: String,
}

impl NumberedSelector {
    pub fn new(datetime_format: &str) -> Self {
        Self {
            datetime_format: datetime_format.to_string(),
        }
    }
}

impl Selector for NumberedSelector {
    fn select(&mut self, operations: &[Operation]) -> Option<Operation> {
        for (i, op) in operations.iter().enumerate() {
            eprintln!(
                "{:>3}. {}  [{}] {} - {}",
                i + 1,
                format_timestamp(&op.timestamp, &self.datetime_format),
                op.kind,
                op.target_path.display(),
                preview_line(op)
            );
        }
        eprint!("Undo which operation? [1-{}, empty to cancel] ", operations.len());
        let answer = read_answer()?;
        parse_choice(&answer, operations.len()).and_then(|i| operations.get(i).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yes_answers() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("\n"));
        assert!(!is_yes("n"));
        assert!(!is_yes("yep"));
    }

    #[test]
    fn choices_are_one_based_and_bounded() {
        assert_eq!(parse_choice("1\n", 3), Some(0));
        assert_eq!(parse_choice(" 3 ", 3), Some(2));
        assert_eq!(parse_choice("0", 3), None);
        assert_eq!(parse_choice("4", 3), None);
        assert_eq!(parse_choice("", 3), None);
        assert_eq!(parse_choice("two", 3), None);
    }
}
