use std::fmt;

/// Host operating system family.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Os {
    Linux,
    Macos,
    Windows,
    Other,
}

impl Os {
    pub fn current() -> Self {
        match std::env::consts::OS {
            "linux" => Os::Linux,
            "macos" => Os::Macos,
            "windows" => Os::Windows,
            _ => Os::Other,
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Os::Linux => "Linux",
            Os::Macos => "macOS",
            Os::Windows => "Windows",
            Os::Other => "Other",
        })
    }
}

/// Logical processors available to the process; at least 1.
pub fn processor_count() -> usize {
    std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}
