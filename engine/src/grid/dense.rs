use crate::error::{GridError, Result};

use super::{Block, BlockType, Position, SparseGrid, TypeLookup};

/// Fixed size grid stored row-major (`y` outer, `x` inner).
///
/// Every coordinate in `0..width x 0..height` holds exactly one [`Block`].
/// Dimensions never change after construction.
#[derive(Clone, Debug)]
pub struct DenseGrid {
    width: u32,
    height: u32,
    blocks: Vec<Block>,
}

impl DenseGrid {
    /// Create a grid where every block has the same type.
    pub fn new(width: u32, height: u32, fill: BlockType) -> Result<Self> {
        let len = Self::checked_len(width, height)?;
        Self::from_types(width, height, vec![fill; len])
    }

    /// Create a grid from row-major block types.
    pub fn from_types(width: u32, height: u32, types: Vec<BlockType>) -> Result<Self> {
        let expected = Self::checked_len(width, height)?;
        if types.len() != expected {
            return Err(GridError::LengthMismatch {
                width,
                height,
                expected,
                actual: types.len(),
            });
        }

        let blocks = types
            .into_iter()
            .enumerate()
            .map(|(index, block_type)| {
                let x = (index % width as usize) as i32;
                let y = (index / width as usize) as i32;
                Block::new(block_type, Position::new(x, y))
            })
            .collect();

        Ok(Self {
            width,
            height,
            blocks,
        })
    }

    /// Create a grid from rows of raw type values, first row is `y == 0`.
    ///
    /// Mostly handy for writing small grids by hand.
    pub fn from_rows(rows: &[&[i16]]) -> Result<Self> {
        let (width, height) =
            Self::checked_dimensions(rows.first().map_or(0, |row| row.len()), rows.len())?;
        let types: Vec<BlockType> = rows
            .iter()
            .flat_map(|row| row.iter().copied().map(BlockType))
            .collect();
        if rows.iter().any(|row| row.len() != width as usize) {
            return Err(GridError::LengthMismatch {
                width,
                height,
                expected: (width as usize).saturating_mul(height as usize),
                actual: types.len(),
            });
        }
        Self::from_types(width, height, types)
    }

    /// Converts `usize` extents, saturating the reported value when one does
    /// not fit in `u32`.
    fn checked_dimensions(width: usize, height: usize) -> Result<(u32, u32)> {
        match (u32::try_from(width), u32::try_from(height)) {
            (Ok(width), Ok(height)) => Ok((width, height)),
            _ => Err(GridError::InvalidDimensions {
                width: u32::try_from(width).unwrap_or(u32::MAX),
                height: u32::try_from(height).unwrap_or(u32::MAX),
            }),
        }
    }

    fn checked_len(width: u32, height: u32) -> Result<usize> {
        let invalid = GridError::InvalidDimensions { width, height };
        if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(invalid);
        }
        (width as usize)
            .checked_mul(height as usize)
            .ok_or(invalid)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Bounds check. `None` for any coordinate outside the grid.
    #[inline]
    pub fn index_of(&self, position: Position) -> Option<usize> {
        if position.x < 0
            || position.y < 0
            || position.x as u32 >= self.width
            || position.y as u32 >= self.height
        {
            return None;
        }
        Some(position.y as usize * self.width as usize + position.x as usize)
    }

    /// Inverse of [`index_of`](Self::index_of).
    #[inline]
    pub fn position_of(&self, index: usize) -> Position {
        Position::new(
            (index % self.width as usize) as i32,
            (index / self.width as usize) as i32,
        )
    }

    pub fn contains(&self, position: Position) -> bool {
        self.index_of(position).is_some()
    }

    pub fn get(&self, position: Position) -> Option<&Block> {
        self.index_of(position).map(|index| &self.blocks[index])
    }

    pub fn get_mut(&mut self, position: Position) -> Option<&mut Block> {
        self.index_of(position).map(|index| &mut self.blocks[index])
    }

    /// Replace the type of a block and return the previous one.
    ///
    /// Group and epoch are left as they are; relabeling is the labeler's job.
    pub fn set_block_type(&mut self, position: Position, block_type: BlockType) -> Result<BlockType> {
        let (width, height) = (self.width, self.height);
        let block = self.get_mut(position).ok_or(GridError::OutOfBounds {
            position,
            width,
            height,
        })?;
        Ok(std::mem::replace(&mut block.block_type, block_type))
    }

    /// Blocks in row-major order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub(crate) fn blocks_mut(&mut self) -> &mut [Block] {
        &mut self.blocks
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    /// Equivalent sparse grid, positions inserted in row-major order.
    pub fn to_sparse(&self) -> SparseGrid {
        let mut sparse = SparseGrid::with_capacity(self.blocks.len());
        for block in &self.blocks {
            sparse.insert(block.position, block.block_type);
        }
        sparse
    }
}

impl TypeLookup for DenseGrid {
    #[inline]
    fn block_type_at(&self, position: Position) -> Option<BlockType> {
        self.get(position).map(|block| block.block_type)
    }
}
