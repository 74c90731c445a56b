use burrow_core::base62;
use burrow_core::AllocatorError;
use typed_builder::TypedBuilder;

pub const DEFAULT_CODE_LENGTH: usize = 6;
pub const DEFAULT_MAX_COLLISION_RETRIES: u32 = 5;

const MIN_CODE_LENGTH: usize = 4;
const MAX_CODE_LENGTH: usize = 16;
const MAX_COLLISION_RETRIES: u32 = 64;

/// Configures an [`AllocatorService`][crate::AllocatorService].
#[derive(Debug, Clone, Copy, PartialEq, Eq, TypedBuilder)]
pub struct AllocatorSettings {
    /// Width of allocated codes before any widening.
    #[builder(default = DEFAULT_CODE_LENGTH)]
    pub code_length: usize,
    /// Reuse the existing code when the same URL is allocated again.
    #[builder(default = true)]
    pub idempotent: bool,
    /// Salted retries at `code_length` after the primary candidate collides.
    ///
    /// When non-zero, one extra candidate one character wider is tried after
    /// these are used up.
    #[builder(default = DEFAULT_MAX_COLLISION_RETRIES)]
    pub max_collision_retries: u32,
}

impl Default for AllocatorSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl AllocatorSettings {
    pub fn validate(&self) -> Result<(), AllocatorError> {
        if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&self.code_length) {
            return Err(AllocatorError::InvalidSettings(format!(
                "code_length must be between {} and {}, got {}",
                MIN_CODE_LENGTH, MAX_CODE_LENGTH, self.code_length
            )));
        }

        if self.max_collision_retries > MAX_COLLISION_RETRIES {
            return Err(AllocatorError::InvalidSettings(format!(
                "max_collision_retries must be at most {}, got {}",
                MAX_COLLISION_RETRIES, self.max_collision_retries
            )));
        }

        debug_assert!(self.max_width() <= base62::MAX_WIDTH);

        Ok(())
    }

    /// Widest code this configuration can hand out.
    pub fn max_width(&self) -> usize {
        if self.max_collision_retries > 0 {
            self.code_length + 1
        } else {
            self.code_length
        }
    }
}
