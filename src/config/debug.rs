//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so release
//! builds remain quiet. Every flag is additionally gated by `cfg(debug_assertions)`.

pub struct DebugFlags {
    /// Emit the full indicator snapshot for every classified series.
    pub print_indicator_snapshots: bool,
    /// Emit per-pair vote breakdowns while building trading signals.
    pub print_signal_votes: bool,
    /// Emit wall-clock timings for each scan cycle.
    pub print_scan_timings: bool,
    /// Emit notification ledger hits (suppressed duplicate alerts).
    pub print_notification_dedup: bool,
    /// Emit details of cache file serialization.
    pub print_serde: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_indicator_snapshots: false,
    print_signal_votes: false,
    print_scan_timings: true,
    print_notification_dedup: false,
    print_serde: false,
};
