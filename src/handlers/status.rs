use super::{HandlerContext, Reply};
use crate::service::system::{
    ConnectionStatus, check_internet_connection, network_stats, system_status,
};
use crate::ui::View;
use tracing::info;

pub fn handle_system_status() -> Reply {
    let status = system_status();
    info!(ram_gb = status.ram_usage_gb, "system status check performed");

    let mut text = format!("System Status:\nRAM Usage: {:.2} GB\n", status.ram_usage_gb);
    for (label, value) in status.info.fields() {
        text.push_str(&format!("{label}: {value}\n"));
    }
    Reply::with_view(text, View::SystemStatus(status))
}

pub async fn handle_connection_status(ctx: &mut HandlerContext) -> Reply {
    let status = ConnectionStatus {
        internet_connection: check_internet_connection(&ctx.http, &ctx.connectivity_url).await,
        network_stats: network_stats(),
        text_to_speech: ctx.speaker.is_available().await,
    };
    info!(
        internet = status.internet_connection,
        "connection status check performed"
    );
    Reply::with_view(connection_text(&status), View::ConnectionStatus(status))
}

fn connection_text(status: &ConnectionStatus) -> String {
    let mut text = format!(
        "Connection Status:\nInternet Connection: {}\n",
        if status.internet_connection {
            "Available"
        } else {
            "Unavailable"
        }
    );
    if let Some(stats) = status.network_stats {
        text.push_str("\nNetwork Statistics:\n");
        text.push_str(&format!("  - Bytes Sent: {} bytes\n", stats.bytes_sent));
        text.push_str(&format!("  - Bytes Received: {} bytes\n", stats.bytes_recv));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::system::NetworkStats;

    #[test]
    fn system_status_text_lists_fields() {
        let reply = handle_system_status();
        assert!(reply.text.starts_with("System Status:\nRAM Usage: "));
        assert!(reply.text.contains("\nOS: "));
        assert!(matches!(reply.view, Some(View::SystemStatus(_))));
    }

    #[test]
    fn connection_text_includes_counters_when_known() {
        let offline = ConnectionStatus {
            internet_connection: false,
            network_stats: None,
            text_to_speech: false,
        };
        assert_eq!(
            connection_text(&offline),
            "Connection Status:\nInternet Connection: Unavailable\n"
        );

        let online = ConnectionStatus {
            internet_connection: true,
            network_stats: Some(NetworkStats {
                bytes_sent: 5,
                bytes_recv: 7,
            }),
            text_to_speech: true,
        };
        assert_eq!(
            connection_text(&online),
            "Connection Status:\nInternet Connection: Available\n\nNetwork Statistics:\n  - Bytes Sent: 5 bytes\n  - Bytes Received: 7 bytes\n"
        );
    }
}
