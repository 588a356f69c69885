//! Listener Config

use clap::Args;

/// Address the HTTP listener binds to.
#[derive(Debug, Args)]
pub struct ListenConfig {
    /// Interface to bind, `0.0.0.0` for every interface
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// TCP port
    #[arg(short, long, env = "SERVER_PORT", default_value_t = 8698_u16)]
    pub port: u16,
}

impl ListenConfig {
    /// `host:port`, bracketing bare IPv6 hosts.
    #[must_use]
    pub fn socket_addr(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ipv6_hosts_are_bracketed() {
        let listen = ListenConfig {
            host: "::1".to_string(),
            port: 8698,
        };

        assert_eq!(listen.socket_addr(), "[::1]:8698");
    }

    #[test]
    fn ipv4_hosts_are_joined_with_port() {
        let listen = ListenConfig {
            host: "127.0.0.1".to_string(),
            port: 9000,
        };

        assert_eq!(listen.socket_addr(), "127.0.0.1:9000");
    }
}
