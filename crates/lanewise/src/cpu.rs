//! Run-time CPU capability check
//!
//! The backend is chosen at build time. A binary built with `avx2` still
//! starts on a CPU without AVX2 and faults on the first vector instruction,
//! so applications should call [`check_cpu_support`] once at start-up.
//! Detection uses `cpufeatures` (CPUID on x86, cached after the first call).
//! On aarch64, NEON is part of the baseline and needs no detection.

use crate::error::{Error, Result};
use crate::isa::Isa;
use crate::ActiveIsa;

/// SIMD capabilities of the running CPU
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CpuFeatures {
    /// SSE4.1 (x86)
    pub has_sse41: bool,

    /// AVX2 (x86)
    pub has_avx2: bool,

    /// FMA3, required alongside AVX2 (x86)
    pub has_fma: bool,

    /// Advanced SIMD (aarch64)
    pub has_neon: bool,
}

impl CpuFeatures {
    /// Detect the running CPU's features
    pub fn detect() -> Self {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        {
            cpufeatures::new!(cpuid_sse41, "sse4.1");
            cpufeatures::new!(cpuid_avx2, "avx2");
            cpufeatures::new!(cpuid_fma, "fma");

            Self {
                has_sse41: cpuid_sse41::get(),
                has_avx2: cpuid_avx2::get(),
                has_fma: cpuid_fma::get(),
                has_neon: false,
            }
        }

        #[cfg(target_arch = "aarch64")]
        {
            Self {
                has_neon: true,
                ..Self::default()
            }
        }

        #[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
        {
            Self::default()
        }
    }

    /// Whether these features are enough to run the backend named `name`
    ///
    /// `name` is an [`Isa::NAME`]. The scalar and generic backends run
    /// everywhere; a name that matches no backend is never supported.
    pub fn supports(&self, name: &str) -> bool {
        match name {
            "scalar" | "generic128" | "generic256" => true,
            "sse4.1" => self.has_sse41,
            "avx2" => self.has_avx2 && self.has_fma,
            "neon" => self.has_neon,
            _ => false,
        }
    }

    /// Whether these features are enough to run the backend tagged `I`
    #[inline]
    pub fn supports_isa<I: Isa>(&self) -> bool {
        self.supports(I::NAME)
    }
}

/// Name of the backend this crate was compiled for
#[inline]
pub fn active_backend() -> &'static str {
    ActiveIsa::NAME
}

/// Verify that the running CPU can execute the compiled backend
///
/// ```rust
/// lanewise::cpu::check_cpu_support().expect("rebuild with a narrower backend");
/// ```
pub fn check_cpu_support() -> Result<()> {
    let features = CpuFeatures::detect();
    let backend = active_backend();

    if features.supports_isa::<ActiveIsa>() {
        #[cfg(feature = "tracing")]
        tracing::debug!(backend, ?features, "CPU supports the compiled vector backend");
        Ok(())
    } else {
        #[cfg(feature = "tracing")]
        tracing::warn!(backend, ?features, "CPU lacks the compiled vector backend");
        Err(Error::UnsupportedCpu { backend })
    }
}
