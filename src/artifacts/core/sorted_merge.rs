//! Linear merge of two ascending sequences
//!
//! Walks both inputs once, pairing up items with equal keys. Both inputs must
//! already be sorted ascending by key and free of duplicate keys.

use std::cmp::Ordering;
use std::iter::Peekable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Merged<L, R> {
    /// Present only in the left sequence
    Left(L),
    /// Present only in the right sequence
    Right(R),
    /// Present in both
    Both(L, R),
}

pub struct SortedMerge<LI: Iterator, RI: Iterator, F> {
    left: Peekable<LI>,
    right: Peekable<RI>,
    compare: F,
}

impl<LI, RI, F> Iterator for SortedMerge<LI, RI, F>
where
    LI: Iterator,
    RI: Iterator,
    F: FnMut(&LI::Item, &RI::Item) -> Ordering,
{
    type Item = Merged<LI::Item, RI::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let ordering = match (self.left.peek(), self.right.peek()) {
            (None, None) => return None,
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (Some(left), Some(right)) => (self.compare)(left, right),
        };

        match ordering {
            Ordering::Less => self.left.next().map(Merged::Left),
            Ordering::Greater => self.right.next().map(Merged::Right),
            Ordering::Equal => match (self.left.next(), self.right.next()) {
                (Some(left), Some(right)) => Some(Merged::Both(left, right)),
                _ => None,
            },
        }
    }
}

pub fn sorted_merge<L, R, F>(left: L, right: R, compare: F) -> SortedMerge<L::IntoIter, R::IntoIter, F>
where
    L: IntoIterator,
    R: IntoIterator,
    F: FnMut(&L::Item, &R::Item) -> Ordering,
{
    SortedMerge {
        left: left.into_iter().peekable(),
        right: right.into_iter().peekable(),
        compare,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pairs_equal_keys_and_keeps_order() {
        let merged = sorted_merge([1, 3, 5], [2, 3, 6], |l, r| l.cmp(r)).collect::<Vec<_>>();

        assert_eq!(
            merged,
            vec![
                Merged::Left(1),
                Merged::Right(2),
                Merged::Both(3, 3),
                Merged::Left(5),
                Merged::Right(6),
            ]
        );
    }

    #[test]
    fn drains_the_longer_side() {
        let merged = sorted_merge(Vec::<u8>::new(), [7, 8], |l, r| l.cmp(r)).collect::<Vec<_>>();
        assert_eq!(merged, vec![Merged::Right(7), Merged::Right(8)]);
    }
}
