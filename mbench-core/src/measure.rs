//! High-Precision Timing
//!
//! Uses RDTSCP on x86_64 and CNTVCT_EL0 on AArch64 for minimal overhead
//! tick counting, with monotonic nanoseconds on other platforms.

use std::sync::OnceLock;

/// Read the CPU cycle counter.
#[cfg(target_arch = "x86_64")]
#[inline(always)]
pub fn read_ticks() -> u64 {
    // SAFETY: RDTSCP is available on all x86_64 CPUs since ~2006 and waits
    // for prior instructions to retire before reading the counter.
    unsafe {
        let mut _aux: u32 = 0;
        std::arch::x86_64::__rdtscp(&mut _aux)
    }
}

/// Read the virtual counter timer.
#[cfg(target_arch = "aarch64")]
#[inline(always)]
pub fn read_ticks() -> u64 {
    let cnt: u64;
    // SAFETY: CNTVCT_EL0 is readable from EL0 on all AArch64 implementations.
    unsafe {
        std::arch::asm!("mrs {}, cntvct_el0", out(reg) cnt, options(nostack, nomem));
    }
    cnt
}

/// Nanoseconds since the first call in this process.
#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
#[inline(always)]
pub fn read_ticks() -> u64 {
    static EPOCH: OnceLock<std::time::Instant> = OnceLock::new();
    EPOCH.get_or_init(std::time::Instant::now).elapsed().as_nanos() as u64
}

/// Whether ticks are hardware cycles (x86_64 RDTSCP or AArch64 CNTVCT_EL0).
pub const HAS_CYCLE_COUNTER: bool = cfg!(target_arch = "x86_64") || cfg!(target_arch = "aarch64");

/// Unit of every tick count reported by this crate
pub const TICK_UNIT: &str = if HAS_CYCLE_COUNTER { "cycles" } else { "ns" };

/// Empty measurements taken when calibrating the overhead
pub const CALIBRATION_ROUNDS: usize = 1000;

/// Tick timer
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start: u64,
}

impl Timer {
    /// Start a new timer
    #[inline(always)]
    pub fn start() -> Self {
        Self {
            start: read_ticks(),
        }
    }

    /// Ticks since `start`
    #[inline(always)]
    pub fn stop(&self) -> u64 {
        read_ticks().saturating_sub(self.start)
    }
}

/// Timing capability consumed by the measurement loop
pub trait Clock {
    /// Fixed cost of an empty measurement, in ticks
    fn overhead(&self) -> u64;

    /// Raw ticks spent running `f`
    fn elapsed<R>(&self, f: impl FnOnce() -> R) -> u64;

    /// Ticks spent running `f`, minus the overhead, clamped at zero
    #[inline(always)]
    fn measure<R>(&self, f: impl FnOnce() -> R) -> u64 {
        self.elapsed(f).saturating_sub(self.overhead())
    }
}

/// Clock backed by `read_ticks` with a process-wide calibrated overhead
#[derive(Debug, Clone, Copy)]
pub struct TscClock {
    overhead: u64,
}

impl TscClock {
    /// Clock using the overhead calibrated once per process
    pub fn calibrated() -> Self {
        static OVERHEAD: OnceLock<u64> = OnceLock::new();
        Self {
            overhead: *OVERHEAD.get_or_init(calibrate),
        }
    }

    /// Clock with an explicit overhead
    pub fn with_overhead(overhead: u64) -> Self {
        Self { overhead }
    }
}

impl Clock for TscClock {
    fn overhead(&self) -> u64 {
        self.overhead
    }

    #[inline(always)]
    fn elapsed<R>(&self, f: impl FnOnce() -> R) -> u64 {
        let timer = Timer::start();
        std::hint::black_box(f());
        timer.stop()
    }
}

/// Smallest tick count of an empty measurement over `CALIBRATION_ROUNDS`
fn calibrate() -> u64 {
    let overhead = (0..CALIBRATION_ROUNDS)
        .map(|_| {
            let timer = Timer::start();
            std::hint::black_box(());
            timer.stop()
        })
        .min()
        .unwrap_or(0);
    tracing::debug!(overhead, unit = TICK_UNIT, "calibrated clock overhead");
    overhead
}

/// Set CPU affinity to pin the current thread to a specific core
///
/// Keeps the tick counter from jumping between cores mid-run.
#[cfg(target_os = "linux")]
pub fn pin_to_cpu(cpu: usize) -> Result<(), std::io::Error> {
    use std::mem::MaybeUninit;

    // SAFETY: the set is zero-initialized before use and only passed to libc.
    unsafe {
        let mut set = MaybeUninit::<libc::cpu_set_t>::zeroed();
        let set_ref = set.assume_init_mut();
        libc::CPU_ZERO(set_ref);
        libc::CPU_SET(cpu, set_ref);

        if libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), set_ref) == 0 {
            Ok(())
        } else {
            Err(std::io::Error::last_os_error())
        }
    }
}

/// Set CPU affinity (unsupported here; always succeeds)
#[cfg(not(target_os = "linux"))]
pub fn pin_to_cpu(_cpu: usize) -> Result<(), std::io::Error> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    struct FixedClock {
        overhead: u64,
        raw: u64,
    }

    impl Clock for FixedClock {
        fn overhead(&self) -> u64 {
            self.overhead
        }

        fn elapsed<R>(&self, f: impl FnOnce() -> R) -> u64 {
            f();
            self.raw
        }
    }

    #[test]
    fn test_timer_advances() {
        let timer = Timer::start();
        std::thread::sleep(Duration::from_millis(5));
        assert!(timer.stop() > 0);
    }

    #[test]
    fn test_ticks_monotonic() {
        let a = read_ticks();
        let b = read_ticks();
        assert!(b >= a);
    }

    #[test]
    fn test_measure_subtracts_overhead() {
        let clock = FixedClock {
            overhead: 30,
            raw: 100,
        };
        assert_eq!(clock.measure(|| ()), 70);
    }

    #[test]
    fn test_measure_clamps_at_zero() {
        let clock = FixedClock {
            overhead: 100,
            raw: 40,
        };
        assert_eq!(clock.measure(|| ()), 0);
    }

    #[test]
    fn test_calibration_is_cached() {
        assert_eq!(
            TscClock::calibrated().overhead(),
            TscClock::calibrated().overhead()
        );
    }

    #[test]
    fn test_measure_runs_closure_once() {
        let clock = TscClock::with_overhead(0);
        let mut calls = 0;
        clock.measure(|| calls += 1);
        assert_eq!(calls, 1);
    }
}
