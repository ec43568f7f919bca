mod order;
pub use order::{Max, Min, OrderPolicy};

mod monotonic_queue;
pub use monotonic_queue::MonotonicQueue;

mod heap;
pub use heap::Heap;
