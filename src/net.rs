use nix::ifaddrs::getifaddrs;
use tracing::debug;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInterface {
    pub name: String,
    pub ifindex: usize,
}

/// Finds the link-layer entry of the interface called `name`.
pub fn lookup_interface(name: &str) -> Result<NetworkInterface> {
    for interface in getifaddrs()? {
        if interface.interface_name != name {
            continue;
        }
        let Some(storage) = interface.address else {
            continue;
        };
        if let Some(link_addr) = storage.as_link_addr() {
            debug!(?link_addr);
            let ni = NetworkInterface {
                name: interface.interface_name.clone(),
                ifindex: link_addr.ifindex(),
            };
            debug!(?ni);
            return Ok(ni);
        }
    }
    Err(Error::InterfaceNotFound(name.to_string()))
}
