/// Greedy assignment of one candidate over empty cells
pub mod assignment;
/// Completion detection and fill progress
pub mod completion;
/// Timer-driven acquisition and fill loop
pub mod scheduler;
