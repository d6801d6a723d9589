use crate::error::FrameworkError;

/// Split `items` into consecutive chunks of `size`; the last chunk holds the
/// remainder.
pub fn chunk_list<T: Clone>(items: &[T], size: usize) -> Result<Vec<Vec<T>>, FrameworkError> {
    if size == 0 {
        return Err(FrameworkError::InvalidChunkSize);
    }
    Ok(items.chunks(size).map(<[T]>::to_vec).collect())
}
