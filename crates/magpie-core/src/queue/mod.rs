//! Spontaneous messaging: queue, injected hooks, and the periodic ticker.

pub mod hooks;
#[allow(clippy::module_inception)]
pub mod queue;
pub mod scheduler;

pub use hooks::{MessageDeliverer, MessageFormatter, SessionProvider, SKIP_SENTINEL};
pub use queue::{ProcessParams, ProcessReport, QueueMetrics, QueueStatus, SpontaneousQueue};
pub use scheduler::{QueueScheduler, TickerHooks};
