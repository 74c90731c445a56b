use crate::settings::AllocatorSettings;

/// One step of the probe sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    /// Zero-based position in the sequence.
    pub attempt: u32,
    /// Salt fed to the fingerprinter.
    pub salt: u32,
    /// Width of the derived code.
    pub width: usize,
}

/// The ordered candidates tried for one allocation.
///
/// Salts `0..=max_collision_retries` at `code_length`, then, if any retries
/// are allowed, salt 0 at `code_length + 1`. The widened candidate cannot
/// clash with a narrower one since stored codes differ in length.
///
/// The salts are only used as-is in idempotent mode; otherwise the service
/// replaces each one with a random salt and keeps the attempt and width.
#[derive(Debug, Clone)]
pub struct Probe {
    code_length: usize,
    retries: u32,
    next: u32,
}

impl Probe {
    pub fn new(settings: &AllocatorSettings) -> Self {
        Self {
            code_length: settings.code_length,
            retries: settings.max_collision_retries,
            next: 0,
        }
    }

    /// Total number of candidates in the sequence.
    pub fn total(&self) -> u32 {
        if self.retries == 0 {
            1
        } else {
            self.retries + 2
        }
    }
}

impl Iterator for Probe {
    type Item = Candidate;

    fn next(&mut self) -> Option<Self::Item> {
        let attempt = self.next;
        if attempt >= self.total() {
            return None;
        }
        self.next += 1;

        let candidate = if attempt <= self.retries {
            Candidate {
                attempt,
                salt: attempt,
                width: self.code_length,
            }
        } else {
            Candidate {
                attempt,
                salt: 0,
                width: self.code_length + 1,
            }
        };
        Some(candidate)
    }
}
