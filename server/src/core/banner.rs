//! Startup banner

use super::config::is_all_interfaces;
use super::constants::APP_NAME;
use crate::utils::terminal::terminal_link;

const LABEL_WIDTH: usize = 10;

fn row(label: &str, value: &str) {
    println!("  \x1b[32m➜\x1b[0m  \x1b[1m{:<LABEL_WIDTH$}\x1b[0m {}", label, value);
}

fn hint(label: &str, text: &str) {
    println!("  \x1b[90m➜  {:<LABEL_WIDTH$} {}\x1b[0m", label, text);
}

/// Addresses other machines can use to reach a server bound to `host`
fn network_hosts(host: &str) -> Vec<String> {
    if !is_all_interfaces(host) {
        return vec![host.to_string()];
    }
    local_ip_address::list_afinet_netifas()
        .map(|interfaces| {
            interfaces
                .into_iter()
                .filter(|(_, ip)| ip.is_ipv4() && !ip.is_loopback())
                .map(|(_, ip)| ip.to_string())
                .collect()
        })
        .unwrap_or_default()
}

pub fn print_banner(host: &str, port: u16, max_clauses: usize) {
    let local = if is_all_interfaces(host) { "localhost" } else { host };

    println!();
    println!(
        "  \x1b[1m\x1b[36m{}\x1b[0m \x1b[90mv{}\x1b[0m",
        APP_NAME,
        env!("CARGO_PKG_VERSION")
    );
    println!();

    row("API:", &terminal_link(&format!("http://{}:{}/api/v1", local, port)));
    row("Docs:", &terminal_link(&format!("http://{}:{}/api/docs", local, port)));

    if matches!(host, "127.0.0.1" | "localhost") {
        hint("Network:", "use --host 0.0.0.0 to expose");
    } else {
        for ip in network_hosts(host) {
            row("Network:", &terminal_link(&format!("http://{}:{}", ip, port)));
        }
    }
    hint("Filters:", &format!("up to {} clauses per expression", max_clauses));

    println!();
}
