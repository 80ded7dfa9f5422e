//! The names file: one item per line as `<id> <sort-score>`.

use std::io::BufRead;

use crate::{Error, NameRegistry, Result};

/// Parses item names and their sort scores, registering each name and
/// returning the scores indexed by the assigned ids.
///
/// A name that appears more than once keeps its first id and its last
/// score. Blank lines are skipped.
///
/// # Errors
///
/// `InvalidInput` on a line without a name and a parseable score; `Io` on
/// read failure.
pub fn parse_names<R: BufRead>(input: R, registry: &mut NameRegistry) -> Result<Vec<f64>> {
    let mut scores: Vec<f64> = Vec::new();
    for line in input.lines() {
        let line = line?;
        let mut fields = line.split_whitespace();
        let Some(name) = fields.next() else {
            continue;
        };
        let score_field = fields.next().ok_or_else(|| {
            Error::InvalidInput(format!("missing sort-score in names line: {line}"))
        })?;
        let score: f64 = score_field.parse().map_err(|_| {
            Error::InvalidInput(format!("bad sort-score '{score_field}' in names line: {line}"))
        })?;

        let id = registry.add(name);
        if scores.len() < id + 1 {
            scores.resize(id + 1, 0.0);
        }
        scores[id] = score;
    }
    Ok(scores)
}

#[cfg(test)]
mod tests {
    use super::parse_names;
    use crate::{NameRegistry, Result};

    #[test]
    fn registers_names_and_collects_scores() -> Result<()> {
        let input = "1cukA01 71.4\n1bvsA01 58.01\n1hvxA00 47.8\n";
        let mut registry = NameRegistry::new();
        let scores = parse_names(input.as_bytes(), &mut registry)?;
        assert_eq!(scores, vec![71.4, 58.01, 47.8]);
        assert_eq!(registry.id_of("1bvsA01")?, 1);
        Ok(())
    }

    #[test]
    fn a_repeated_name_keeps_its_id_and_takes_the_last_score() -> Result<()> {
        let input = "dom1 3.0\ndom2 2.0\ndom1 9.0\n";
        let mut registry = NameRegistry::new();
        let scores = parse_names(input.as_bytes(), &mut registry)?;
        assert_eq!(registry.len(), 2);
        assert_eq!(scores, vec![9.0, 2.0]);
        Ok(())
    }

    #[test]
    fn malformed_lines_are_rejected() {
        let mut registry = NameRegistry::new();
        assert!(parse_names("dom1\n".as_bytes(), &mut registry).is_err());
        assert!(parse_names("dom1 not-a-number\n".as_bytes(), &mut registry).is_err());
    }
}
