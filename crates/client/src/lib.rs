//! Command-line client for the ballpark simulator.
//!
//! # Architecture
//!
//! ```text
//! main (composition root)
//!   ├─→ config     (environment → ClientConfig)
//!   ├─→ logging    (tracing subscriber)
//!   ├─→ bootstrap  (content files → OracleManager → Simulator)
//!   └─→ report     (plate log → line score / play-by-play)
//! ```
//!
//! Games are independent, so the binary plays them on tokio's blocking pool and
//! prints the results in creation order.

pub mod bootstrap;
pub mod config;
pub mod logging;
pub mod report;

pub use bootstrap::{build_simulator, load_oracles};
pub use config::ClientConfig;
pub use report::{LineScore, describe};
