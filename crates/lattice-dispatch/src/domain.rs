use std::fmt;

/// Execution domain for dispatched operations.
///
/// The domain is an explicit handle passed into `parallel_for_each`, never
/// ambient configuration. `Host` runs invocations sequentially on the
/// calling thread and is the first-class test double; every contract holds
/// identically on both variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Domain {
    /// Sequential execution on the calling thread.
    #[default]
    Host,
    /// Concurrent execution on the dedicated worker pool with this index.
    Accelerator(usize),
}

impl Domain {
    /// Whether this is the sequential host domain.
    pub fn is_host(&self) -> bool {
        matches!(self, Domain::Host)
    }

    /// Whether this is an accelerator domain.
    pub fn is_accelerator(&self) -> bool {
        matches!(self, Domain::Accelerator(_))
    }

    /// The accelerator index, if applicable.
    pub fn accelerator_index(&self) -> Option<usize> {
        match self {
            Domain::Accelerator(idx) => Some(*idx),
            _ => None,
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Domain::Host => write!(f, "host"),
            Domain::Accelerator(idx) => write!(f, "accel:{idx}"),
        }
    }
}
