use thiserror::Error;

/// Everything that can go wrong while building a grid.
///
/// Input points never produce an error: points that cannot be placed are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResampleError {
    #[error("interval must be greater than 0")]
    ZeroInterval,
    #[error("timestamp {timestamp} cannot be aligned to interval {interval} within u32")]
    Overflow { timestamp: u32, interval: u32 },
    #[error("aligned window end {to} precedes aligned window start {from}")]
    InvertedWindow { from: u32, to: u32 },
}
