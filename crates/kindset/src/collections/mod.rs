//! Kind-locked collections
//!
//! - `Set`: unordered unique members with set algebra
//! - `Stack`: LIFO sequence
//! - `Queue`: FIFO sequence
//!
//! All three admit values through a [`KindGate`](crate::gate::KindGate).

pub mod queue;
pub mod set;
pub mod stack;

use crate::element::Element;
use std::fmt;

/// Render `[a b c]`, cutting off after `limit` elements with `...`
pub(crate) fn write_elements<'a, I>(
    f: &mut fmt::Formatter<'_>,
    elements: I,
    limit: Option<usize>,
) -> fmt::Result
where
    I: ExactSizeIterator<Item = &'a Element>,
{
    let total = elements.len();
    let shown = limit.map_or(total, |limit| limit.min(total));

    f.write_str("[")?;
    for (i, element) in elements.take(shown).enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{}", element)?;
    }
    if shown < total {
        if shown > 0 {
            f.write_str(" ")?;
        }
        f.write_str("...")?;
    }
    f.write_str("]")
}
