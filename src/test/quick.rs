use quickcheck::{Arbitrary, Gen};

/// An enum for the various kinds of "things" to do to
/// binary search trees in a quicktest.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op<K> {
    /// Insert the K into the data structure
    Insert(K),
    /// Look up the K and its neighbours
    Find(K),
    /// Empty the data structure
    Clear,
    /// Rebuild the tree balanced
    Rebalance,
    /// Compare iterators
    Iter,
}

impl<K> Arbitrary for Op<K>
where
    K: Arbitrary,
{
    /// Tells quickcheck how to randomly choose an operation. Inserts are weighted up so
    /// trees actually grow between clears.
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 0, 1, 1, 2, 3, 4]).unwrap() {
            0 => Op::Insert(K::arbitrary(g)),
            1 => Op::Find(K::arbitrary(g)),
            2 => Op::Clear,
            3 => Op::Rebalance,
            4 => Op::Iter,
            _ => unreachable!(),
        }
    }
}
