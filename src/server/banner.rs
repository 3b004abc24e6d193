// Startup banner module
// Lists the local and network URLs the experiment can be opened on

use std::io::{self, Write};
use std::net::{IpAddr, Ipv4Addr};

use crate::logger;

/// Non-loopback IPv4 addresses of all local interfaces
///
/// Enumeration failure is logged and yields an empty list.
pub fn network_addresses() -> Vec<Ipv4Addr> {
    match if_addrs::get_if_addrs() {
        Ok(interfaces) => interfaces
            .iter()
            .filter(|iface| !iface.is_loopback())
            .filter_map(|iface| match iface.ip() {
                IpAddr::V4(ip) => Some(ip),
                IpAddr::V6(_) => None,
            })
            .collect(),
        Err(e) => {
            logger::log_warning(&format!("Could not enumerate network interfaces: {e}"));
            Vec::new()
        }
    }
}

/// Render the bilingual startup banner
pub fn render_banner(port: u16, addresses: &[Ipv4Addr]) -> Vec<String> {
    let rule = "=".repeat(58);
    let mut lines = vec![
        rule.clone(),
        "  情绪调节实验服务器".to_string(),
        "  Emotion Regulation Experiment Server".to_string(),
        String::new(),
        format!("  服务器运行端口 Server port: {port}"),
        String::new(),
        "  本机访问 Local access:".to_string(),
        format!("  -> http://localhost:{port}/"),
        String::new(),
    ];

    if !addresses.is_empty() {
        lines.push("  网络访问 Network access:".to_string());
        lines.extend(addresses.iter().map(|ip| format!("  -> http://{ip}:{port}/")));
        lines.push(String::new());
    }

    lines.extend([
        "  按 Ctrl+C 停止服务器".to_string(),
        "  Press Ctrl+C to stop the server".to_string(),
        String::new(),
        format!("  确保防火墙允许端口 {port} 访问"),
        format!("  Ensure firewall allows port {port} access"),
        rule,
    ]);
    lines
}

/// Print the banner on the console, whatever the log targets are
pub fn print_banner(port: u16, addresses: &[Ipv4Addr]) {
    if let Err(e) = write_banner(&mut io::stdout().lock(), port, addresses) {
        logger::log_warning(&format!("Could not print startup banner: {e}"));
    }
}

fn write_banner(out: &mut impl Write, port: u16, addresses: &[Ipv4Addr]) -> io::Result<()> {
    for line in render_banner(port, addresses) {
        writeln!(out, "{line}")?;
    }
    out.flush()
}
