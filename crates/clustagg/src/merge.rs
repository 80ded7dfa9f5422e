//! The record of one cluster merge, and the merge-list file format.

use std::fmt;
use std::io::{BufRead, Write};

use serde::{Deserialize, Serialize};

use crate::{Error, Item, Result, Strength};

/// The atomic event of fusing two active clusters into a new one.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct Merge {
    /// The lower-numbered merged cluster.
    pub node_a: Item,
    /// The higher-numbered merged cluster.
    pub node_b: Item,
    /// The id assigned to the newly created cluster; strictly greater than
    /// both endpoints.
    pub merge_node: Item,
    /// The dissimilarity at which the merge happened.
    pub dissim: Strength,
}

impl Merge {
    /// Creates a merge record.
    pub const fn new(node_a: Item, node_b: Item, merge_node: Item, dissim: Strength) -> Self {
        Self {
            node_a,
            node_b,
            merge_node,
            dissim,
        }
    }
}

impl fmt::Display for Merge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "merge[{:5} + {:5} -> {:5} ({})]",
            self.node_a, self.node_b, self.merge_node, self.dissim
        )
    }
}

/// Writes a merge list, one merge per line: the two endpoint ids and the
/// new cluster id as width-5 fields, then the dissimilarity with six
/// decimals, all tab-separated.
///
/// # Errors
///
/// `Io` on write failure.
pub fn write_merge_list<W: Write>(out: &mut W, merges: &[Merge]) -> Result<()> {
    for merge in merges {
        writeln!(
            out,
            "{:5}\t{:5}\t{:5}\t{:.6}",
            merge.node_a, merge.node_b, merge.merge_node, merge.dissim
        )?;
    }
    Ok(())
}

/// Reads a merge list written by [`write_merge_list`].
///
/// # Errors
///
/// `InvalidInput` if a line does not hold exactly four parseable fields;
/// `Io` on read failure.
pub fn read_merge_list<R: BufRead>(input: R) -> Result<Vec<Merge>> {
    let mut merges = Vec::new();
    for line in input.lines() {
        let line = line?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        if fields.len() != 4 {
            return Err(Error::InvalidInput(format!(
                "expected exactly four fields in merge-list line: {line}"
            )));
        }
        let parse_item = |field: &str| -> Result<Item> {
            field
                .parse()
                .map_err(|_| Error::InvalidInput(format!("bad id '{field}' in merge-list line: {line}")))
        };
        let dissim: Strength = fields[3].parse().map_err(|_| {
            Error::InvalidInput(format!("bad dissimilarity '{}' in merge-list line: {line}", fields[3]))
        })?;
        merges.push(Merge::new(
            parse_item(fields[0])?,
            parse_item(fields[1])?,
            parse_item(fields[2])?,
            dissim,
        ));
    }
    Ok(merges)
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::{read_merge_list, write_merge_list, Merge};
    use crate::Result;

    #[test]
    fn writes_fixed_width_fields() -> Result<()> {
        let merges = vec![Merge::new(0, 1, 4, 1.0), Merge::new(2, 3, 5, 22.5)];
        let mut out = Vec::new();
        write_merge_list(&mut out, &merges)?;
        let text = String::from_utf8(out).map_err(|e| crate::Error::InvalidInput(e.to_string()))?;
        assert_eq!(text, "    0\t    1\t    4\t1.000000\n    2\t    3\t    5\t22.500000\n");
        Ok(())
    }

    #[test]
    fn reading_recovers_what_was_written() -> Result<()> {
        let merges = vec![Merge::new(0, 1, 4, 1.0), Merge::new(2, 3, 5, 22.5)];
        let mut out = Vec::new();
        write_merge_list(&mut out, &merges)?;
        assert_eq!(read_merge_list(out.as_slice())?, merges);
        Ok(())
    }

    #[test_case("0\t1\t4\n" ; "too few fields")]
    #[test_case("0\t1\t4\t1.0\t9\n" ; "too many fields")]
    #[test_case("a\tb\tc\td\n" ; "unparseable fields")]
    fn malformed_lines_are_rejected(line: &str) {
        assert!(read_merge_list(line.as_bytes()).is_err());
    }
}
