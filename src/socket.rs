use nix::errno::Errno;
use nix::sys::socket::{sendto, setsockopt, sockopt, MsgFlags, SockaddrIn};
use nix::unistd::close;
use std::ffi::OsString;
use std::net::{Ipv4Addr, SocketAddrV4};
use std::os::fd::RawFd;
use tracing::{debug, warn};

use crate::error::{Error, Result};

struct FileDesc {
    fd: RawFd,
}

impl FileDesc {
    fn new(fd: RawFd) -> Self {
        Self { fd }
    }
}

impl Drop for FileDesc {
    fn drop(&mut self) {
        if let Err(err) = close(self.fd) {
            warn!(fd = self.fd, %err, "close failed");
        }
    }
}

/// Sends complete IPv4 datagrams (header included) out of one interface.
/// Routing and neighbour resolution are left to the kernel.
pub struct Sender {
    socket: FileDesc,
}

impl Sender {
    pub fn open(ifname: &str) -> Result<Self> {
        // IPPROTO_RAW implies IP_HDRINCL
        let fd = unsafe {
            nix::libc::socket(
                nix::libc::AF_INET,
                nix::libc::SOCK_RAW,
                nix::libc::IPPROTO_RAW,
            )
        };
        if fd < 0 {
            return Err(Error::Socket(Errno::last()));
        }
        let socket = FileDesc::new(fd);
        debug!(?fd, ifname);

        setsockopt(socket.fd, sockopt::BindToDevice, &OsString::from(ifname))?;
        Ok(Self { socket })
    }

    /// Sends `packet` once to `dst`; a partial write is an error.
    pub fn send(&self, packet: &[u8], dst: Ipv4Addr) -> Result<usize> {
        let addr = SockaddrIn::from(SocketAddrV4::new(dst, 0));
        debug!(?addr);
        let sent = sendto(self.socket.fd, packet, &addr, MsgFlags::empty())?;
        if sent != packet.len() {
            return Err(Error::Send {
                sent,
                len: packet.len(),
            });
        }
        Ok(sent)
    }
}
