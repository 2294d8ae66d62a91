use crate::error::ResampleError;

/// Rounds a timestamp up to the next multiple of `interval`.
///
/// Timestamps already on a boundary are returned unchanged.
#[inline(always)]
pub fn quantize(timestamp: u32, interval: u32) -> Result<u32, ResampleError> {
    if interval == 0 {
        return Err(ResampleError::ZeroInterval);
    }
    if timestamp % interval == 0 {
        return Ok(timestamp);
    }
    ((timestamp / interval) * interval)
        .checked_add(interval)
        .ok_or(ResampleError::Overflow {
            timestamp,
            interval,
        })
}
