use serde::Serialize;
use std::time::Duration;
use sysinfo::{CpuRefreshKind, Networks, ProcessRefreshKind, ProcessesToUpdate, System};
use tracing::debug;

pub const CONNECTIVITY_CHECK_URL: &str = "https://www.google.com";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SystemInfo {
    pub os: String,
    pub os_version: String,
    pub kernel: String,
    pub machine: String,
    pub processor: String,
    pub hostname: String,
}

impl SystemInfo {
    /// Label/value pairs in display order.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("OS", self.os.as_str()),
            ("OS Version", self.os_version.as_str()),
            ("Kernel", self.kernel.as_str()),
            ("Machine", self.machine.as_str()),
            ("Processor", self.processor.as_str()),
            ("Host", self.hostname.as_str()),
        ]
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SystemStatus {
    pub ram_usage_gb: f64,
    pub info: SystemInfo,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct NetworkStats {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ConnectionStatus {
    pub internet_connection: bool,
    pub network_stats: Option<NetworkStats>,
    pub text_to_speech: bool,
}

pub fn system_info() -> SystemInfo {
    let mut sys = System::new();
    sys.refresh_cpu_list(CpuRefreshKind::everything());
    let processor = sys
        .cpus()
        .first()
        .map(|cpu| cpu.brand().trim().to_string())
        .filter(|b| !b.is_empty())
        .unwrap_or_else(|| "N/A".to_string());

    SystemInfo {
        os: System::name().unwrap_or_else(|| std::env::consts::OS.to_string()),
        os_version: System::os_version().unwrap_or_else(|| "N/A".to_string()),
        kernel: System::kernel_version().unwrap_or_else(|| "N/A".to_string()),
        machine: System::cpu_arch(),
        processor,
        hostname: System::host_name().unwrap_or_else(|| "N/A".to_string()),
    }
}

/// Resident memory of this process in GiB.
pub fn ram_usage_gb() -> f64 {
    let Ok(pid) = sysinfo::get_current_pid() else {
        return 0.0;
    };
    let mut sys = System::new();
    sys.refresh_processes_specifics(
        ProcessesToUpdate::Some(&[pid]),
        true,
        ProcessRefreshKind::nothing().with_memory(),
    );
    sys.process(pid)
        .map(|p| p.memory() as f64 / f64::from(1u32 << 30))
        .unwrap_or(0.0)
}

pub fn system_status() -> SystemStatus {
    SystemStatus {
        ram_usage_gb: ram_usage_gb(),
        info: system_info(),
    }
}

/// Totals across every interface since boot.
pub fn network_stats() -> Option<NetworkStats> {
    let networks = Networks::new_with_refreshed_list();
    if networks.iter().next().is_none() {
        return None;
    }
    let (bytes_sent, bytes_recv) = networks.iter().fold((0u64, 0u64), |(tx, rx), (_, data)| {
        (
            tx.saturating_add(data.total_transmitted()),
            rx.saturating_add(data.total_received()),
        )
    });
    Some(NetworkStats {
        bytes_sent,
        bytes_recv,
    })
}

/// Reachability check with a 3 second budget.
pub async fn check_internet_connection(client: &reqwest::Client, url: &str) -> bool {
    let result = client
        .get(url)
        .timeout(Duration::from_secs(3))
        .send()
        .await;
    match result {
        Ok(_) => true,
        Err(e) => {
            debug!(error = %e, "connectivity check failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_info_is_populated() {
        let info = system_info();
        assert!(!info.os.is_empty());
        assert!(!info.machine.is_empty());
        assert_eq!(info.fields().len(), 6);
        assert_eq!(info.fields()[0].0, "OS");
    }

    #[test]
    fn ram_usage_is_non_negative() {
        assert!(ram_usage_gb() >= 0.0);
    }

    #[tokio::test]
    async fn unreachable_host_reports_offline() {
        let client = reqwest::Client::new();
        // port 9 on loopback is the discard service and is closed on test hosts
        assert!(!check_internet_connection(&client, "http://127.0.0.1:9/").await);
    }
}
