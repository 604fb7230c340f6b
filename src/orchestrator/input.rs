//! Cycle count sources
//!
//! The orchestrator asks a [`CycleSource`] how many cycles to run next.
//! [`PromptCycleSource`] asks an operator on a terminal; [`FixedCycles`]
//! replays a fixed list for scripted runs.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{error, info, warn};

use crate::error::{Error, Result};

/// Smallest accepted cycle count
pub const MIN_CYCLES: u32 = 1;

/// Largest accepted cycle count
pub const MAX_CYCLES: u32 = 100;

/// Prompt shown before each batch of cycles
pub const CYCLE_PROMPT: &str =
    "Enter the number of transactions per wallet for this cycle (1-100): ";

/// Yields the next cycle count, `None` when there is nothing more to run
#[async_trait]
pub trait CycleSource: Send {
    async fn next_cycle_count(&mut self) -> Result<Option<u32>>;
}

/// Parse a cycle count typed by an operator
///
/// Only the leading integer counts: `12abc` is 12 and `3.5` is 3. Input
/// without leading digits is not a number.
pub fn parse_cycle_count(input: &str) -> Result<u32> {
    let trimmed = input.trim();
    let unsigned = trimmed
        .strip_prefix(|c: char| c == '+' || c == '-')
        .unwrap_or(trimmed);
    let sign_len = trimmed.len() - unsigned.len();
    let digits = unsigned.bytes().take_while(|b| b.is_ascii_digit()).count();

    if digits == 0 {
        return Err(Error::InvalidCycleCount(format!(
            "'{}' is not a number",
            trimmed
        )));
    }

    let negative = trimmed.starts_with('-');
    // Overflowing digit runs are simply out of range
    let value: i64 = trimmed[..sign_len + digits]
        .parse()
        .unwrap_or(if negative { i64::MIN } else { i64::MAX });

    if value < MIN_CYCLES as i64 || value > MAX_CYCLES as i64 {
        return Err(Error::InvalidCycleCount(format!(
            "{} is outside {}-{}",
            &trimmed[..sign_len + digits],
            MIN_CYCLES,
            MAX_CYCLES
        )));
    }

    Ok(value as u32)
}

/// Interactive prompt; re-asks until the input is valid
pub struct PromptCycleSource<R, W> {
    reader: R,
    writer: W,
}

impl<R, W> PromptCycleSource<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Give back the writer, mostly to inspect what was shown
    pub fn into_writer(self) -> W {
        self.writer
    }
}

#[async_trait]
impl<R, W> CycleSource for PromptCycleSource<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn next_cycle_count(&mut self) -> Result<Option<u32>> {
        loop {
            self.writer.write_all(CYCLE_PROMPT.as_bytes()).await?;
            self.writer.flush().await?;

            let mut raw = Vec::new();
            if self.reader.read_until(b'\n', &mut raw).await? == 0 {
                warn!("Input closed, stopping");
                return Ok(None);
            }

            match parse_cycle_count(&String::from_utf8_lossy(&raw)) {
                Ok(count) => {
                    info!("Set {} transactions per wallet for this cycle.", count);
                    return Ok(Some(count));
                }
                Err(e) => {
                    error!(
                        "Invalid input. Please enter a number between {} and {}. ({})",
                        MIN_CYCLES, MAX_CYCLES, e
                    );
                }
            }
        }
    }
}

/// Pre-set cycle counts for unattended runs
#[derive(Debug, Clone)]
pub struct FixedCycles {
    counts: VecDeque<u32>,
}

impl FixedCycles {
    pub fn new(counts: impl IntoIterator<Item = u32>) -> Result<Self> {
        let counts: VecDeque<u32> = counts.into_iter().collect();
        for count in &counts {
            if !(MIN_CYCLES..=MAX_CYCLES).contains(count) {
                return Err(Error::InvalidCycleCount(format!(
                    "{} is outside {}-{}",
                    count, MIN_CYCLES, MAX_CYCLES
                )));
            }
        }
        Ok(Self { counts })
    }

    pub fn once(count: u32) -> Result<Self> {
        Self::new([count])
    }
}

#[async_trait]
impl CycleSource for FixedCycles {
    async fn next_cycle_count(&mut self) -> Result<Option<u32>> {
        Ok(self.counts.pop_front())
    }
}
