use log::trace;

use crate::error::{GridError, Result};

use super::Executor;

/// Apply `f` to every element of `items`, one task per `chunk_size` elements.
///
/// Chunks are disjoint, so each task gets exclusive access to its elements.
/// Returns once every element has been visited.
pub fn for_each_chunked<T, F>(
    executor: &Executor,
    items: &mut [T],
    chunk_size: usize,
    f: F,
) -> Result<()>
where
    T: Send,
    F: Fn(&mut T) + Sync,
{
    if chunk_size == 0 {
        return Err(GridError::InvalidChunkSize);
    }
    if items.is_empty() {
        return Ok(());
    }

    trace!(
        "parallel for over {} items in chunks of {} on {} workers",
        items.len(),
        chunk_size,
        executor.size()
    );

    let f = &f;
    executor.scope(|s| {
        for chunk in items.chunks_mut(chunk_size) {
            s.spawn(move || {
                for item in chunk {
                    f(item);
                }
            });
        }
    });
    Ok(())
}

/// Like [`for_each_chunked`], but `f` also gets the element's index.
pub fn for_each_indexed<T, F>(
    executor: &Executor,
    items: &mut [T],
    chunk_size: usize,
    f: F,
) -> Result<()>
where
    T: Send,
    F: Fn(usize, &mut T) + Sync,
{
    if chunk_size == 0 {
        return Err(GridError::InvalidChunkSize);
    }

    let f = &f;
    executor.scope(|s| {
        for (chunk_index, chunk) in items.chunks_mut(chunk_size).enumerate() {
            let offset = chunk_index * chunk_size;
            s.spawn(move || {
                for (i, item) in chunk.iter_mut().enumerate() {
                    f(offset + i, item);
                }
            });
        }
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_element_is_visited_once() {
        let executor = Executor::new(4);
        for chunk_size in [1, 3, 128, 10_000] {
            let mut values = vec![0u32; 1000];
            for_each_chunked(&executor, &mut values, chunk_size, |v| *v += 1).unwrap();
            assert!(values.iter().all(|v| *v == 1), "chunk size {chunk_size}");
        }
    }

    #[test]
    fn zero_chunk_size_is_rejected() {
        let executor = Executor::new(1);
        let mut values = vec![1, 2, 3];
        assert_eq!(
            for_each_chunked(&executor, &mut values, 0, |v| *v += 1),
            Err(GridError::InvalidChunkSize)
        );
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn empty_slice_is_a_no_op() {
        let executor = Executor::new(2);
        let mut values: Vec<f32> = Vec::new();
        assert!(for_each_chunked(&executor, &mut values, 16, |v| *v += 1.0).is_ok());
    }

    #[test]
    fn indices_line_up_across_chunks() {
        let executor = Executor::new(3);
        let mut values = vec![0usize; 257];
        for_each_indexed(&executor, &mut values, 16, |i, v| *v = i * 2).unwrap();
        assert!(values.iter().enumerate().all(|(i, v)| *v == i * 2));
    }
}
