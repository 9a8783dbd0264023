#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use std::time::Instant;
#[cfg(feature = "cli")]
use sysinfo::{Pid, RefreshKind, System};

/// Optional per-phase resource logging for the CLI. Disabled instances cost
/// nothing beyond the flag check.
#[cfg(feature = "cli")]
pub struct SystemMonitor {
    state: Option<Mutex<MonitorState>>,
    start_time: Instant,
}

#[cfg(feature = "cli")]
struct MonitorState {
    system: System,
    pid: Pid,
    peak_memory_mb: u64,
}

#[cfg(feature = "cli")]
impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        let state = enabled.then(|| {
            let mut system = System::new_with_specifics(RefreshKind::everything());
            system.refresh_all();
            let pid = sysinfo::get_current_pid().expect("Failed to get current PID");
            Mutex::new(MonitorState {
                system,
                pid,
                peak_memory_mb: 0,
            })
        });
        Self {
            state,
            start_time: Instant::now(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.state.is_some()
    }

    pub fn log_stats(&self, phase: &str) {
        let Some(state) = &self.state else {
            return;
        };
        let Ok(mut state) = state.lock() else {
            return;
        };
        state.system.refresh_all();
        let pid = state.pid;
        let Some(process) = state.system.process(pid) else {
            return;
        };
        let memory_mb = process.memory() / 1024 / 1024;
        let cpu_usage = process.cpu_usage();
        state.peak_memory_mb = state.peak_memory_mb.max(memory_mb);
        tracing::info!(
            "📊 {} - CPU: {:.1}%, Memory: {}MB, Peak: {}MB, Time: {:?}",
            phase,
            cpu_usage,
            memory_mb,
            state.peak_memory_mb,
            self.start_time.elapsed()
        );
    }

    pub fn log_final_stats(&self) {
        let Some(state) = &self.state else {
            return;
        };
        let Ok(state) = state.lock() else {
            return;
        };
        tracing::info!(
            "📊 Final Stats - Total Time: {:?}, Peak Memory: {}MB",
            self.start_time.elapsed(),
            state.peak_memory_mb
        );
    }
}

// Empty implementation for builds without the CLI feature.
#[cfg(not(feature = "cli"))]
pub struct SystemMonitor;

#[cfg(not(feature = "cli"))]
impl SystemMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn is_enabled(&self) -> bool {
        false
    }

    pub fn log_stats(&self, _phase: &str) {}

    pub fn log_final_stats(&self) {}
}
