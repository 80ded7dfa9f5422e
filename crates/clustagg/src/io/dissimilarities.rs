//! The links file: one link per line as `<id1> <id2> ...columns...`.

use std::io::BufRead;

use crate::{Error, LinkDirn, Links, NameRegistry, Result, Strength};

/// Parses links, registering item names on first occurrence.
///
/// `column` selects (1-based, counting the two id fields) the column
/// holding the link value; with [`LinkDirn::Strength`] the value is
/// negated into a dissimilarity. Self-links are silently ignored, as are
/// blank lines.
///
/// # Errors
///
/// `InvalidInput` if `column` points at one of the id fields or a line
/// lacks a parseable value there; `Io` on read failure.
pub fn parse_dissimilarities<R: BufRead>(
    input: R,
    registry: &mut NameRegistry,
    link_dirn: LinkDirn,
    column: usize,
) -> Result<Links> {
    if column < 3 {
        return Err(Error::InvalidInput(format!(
            "links column {column} would read an id field; the value columns start at 3"
        )));
    }

    let mut links = Links::new();
    for line in input.lines() {
        let line = line?;
        let mut fields = line.split_whitespace();
        let Some(name_a) = fields.next() else {
            continue;
        };
        let name_b = fields
            .next()
            .ok_or_else(|| Error::InvalidInput(format!("missing second id in links line: {line}")))?;
        let value_field = fields.nth(column - 3).ok_or_else(|| {
            Error::InvalidInput(format!("missing column {column} in links line: {line}"))
        })?;
        let value: Strength = value_field.parse().map_err(|_| {
            Error::InvalidInput(format!("bad link value '{value_field}' in links line: {line}"))
        })?;

        let dissim = match link_dirn {
            LinkDirn::Strength => -value,
            LinkDirn::Dissimilarity => value,
        };
        let id_a = registry.add(name_a);
        let id_b = registry.add(name_b);
        if id_a != id_b {
            links.add_link_symmetrically(id_a, id_b, dissim)?;
        }
    }
    Ok(links)
}
