//! CPU feature detection for hardware AES support

/// AES-NI feature flag: CPUID leaf 1, bit 25 of ECX.
#[cfg(target_arch = "x86_64")]
const AES_FEATURE_BIT: u32 = 1 << 25;

/// Report whether the host CPU supports the AES-NI instruction set.
///
/// Queries CPUID leaf 0 for the highest supported function id and, when
/// leaf 1 is available, reads the AES feature bit from ECX. The answer is
/// stable for the lifetime of the process.
#[cfg(target_arch = "x86_64")]
pub fn cpu_supports_aes() -> bool {
    use core::arch::x86_64::__cpuid;

    // SAFETY: the cpuid instruction is available on every x86-64 CPU.
    let highest = unsafe { __cpuid(0) };
    if highest.eax < 1 {
        return false;
    }

    // SAFETY: leaf 1 support was just confirmed.
    let features = unsafe { __cpuid(1) };
    features.ecx & AES_FEATURE_BIT != 0
}

/// Report whether the host CPU supports the AES-NI instruction set.
///
/// Always `false` on non-x86-64 targets.
#[cfg(not(target_arch = "x86_64"))]
pub fn cpu_supports_aes() -> bool {
    false
}
