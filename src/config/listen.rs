// Listen address parsing
// Accepts `[host]:port` the way Go-style servers do: `:5000` binds every
// IPv4 interface, `[::1]:80` is an IPv6 literal, host names are resolved once.

use std::net::{IpAddr, Ipv4Addr, SocketAddr, ToSocketAddrs};

use crate::error::StartupError;

pub fn parse_listen_addr(value: &str) -> Result<SocketAddr, StartupError> {
    let invalid = |reason: &str| StartupError::InvalidListenAddr {
        addr: value.to_string(),
        reason: reason.to_string(),
    };

    let (host, port) = value
        .trim()
        .rsplit_once(':')
        .ok_or_else(|| invalid("expected [host]:port"))?;
    let port: u16 = port
        .parse()
        .map_err(|_| invalid("port must be a number from 0 to 65535"))?;

    let host = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);

    if host.is_empty() {
        return Ok(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)));
    }
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(SocketAddr::new(ip, port));
    }

    (host, port)
        .to_socket_addrs()
        .map_err(|e| invalid(&format!("cannot resolve host: {e}")))?
        .next()
        .ok_or_else(|| invalid("host resolved to no addresses"))
}
