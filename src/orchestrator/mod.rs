//! Transaction orchestration
//!
//! ```text
//! CycleSource → CycleOrchestrator → WalletSequencer → ActionExecutor → ChainClient
//!  (count N)     (N × identities)    (plan, in order)   (one call)
//! ```
//!
//! Everything runs on one task, one wallet at a time. Delays between
//! transactions are the only pacing.

pub mod cycle;
pub mod input;
pub mod sequencer;

pub use cycle::CycleOrchestrator;
pub use input::{parse_cycle_count, CycleSource, FixedCycles, PromptCycleSource};
pub use sequencer::{WalletReport, WalletSequencer};
