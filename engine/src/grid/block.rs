use std::fmt;

use super::Position;

/// Block type value. Two adjacent blocks join the same group when their types
/// are equal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockType(pub i16);

/// Identifier of a connected group. `GroupId::NONE` marks a block that has not
/// been assigned yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub u64);

impl GroupId {
    pub const NONE: GroupId = GroupId(0);

    pub fn is_assigned(self) -> bool {
        self != Self::NONE
    }

    pub(crate) fn next(self) -> GroupId {
        GroupId(self.0 + 1)
    }
}

/// Labeling pass counter. `Epoch::NEVER` is older than every real pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Epoch(pub u64);

impl Epoch {
    pub const NEVER: Epoch = Epoch(0);

    /// The following epoch, `None` once `u64::MAX` has been used.
    pub fn next(self) -> Option<Epoch> {
        self.0.checked_add(1).map(Epoch)
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single grid cell (32 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Block {
    pub block_type: BlockType,
    pub group: GroupId,
    pub position: Position,
    /// Epoch of the pass that last assigned `group`.
    pub last_labeled: Epoch,
}

impl Block {
    pub fn new(block_type: BlockType, position: Position) -> Self {
        Self {
            block_type,
            group: GroupId::NONE,
            position,
            last_labeled: Epoch::NEVER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn new_block_is_unassigned() {
        let block = Block::new(BlockType(3), Position::new(1, 2));
        assert!(!block.group.is_assigned());
        assert_eq!(block.last_labeled, Epoch::NEVER);
    }

    #[test]
    fn epoch_next_stops_at_the_last_value() {
        assert_eq!(Epoch::NEVER.next(), Some(Epoch(1)));
        assert_eq!(Epoch(u64::MAX - 1).next(), Some(Epoch(u64::MAX)));
        assert_eq!(Epoch(u64::MAX).next(), None);
    }

    #[test]
    fn document_block_size() {
        assert_eq!(size_of::<BlockType>(), 2);
        assert_eq!(size_of::<Position>(), 8);
        assert_eq!(size_of::<Block>(), 32);
    }
}
