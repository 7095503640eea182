use std::io;
use std::io::ErrorKind::{ConnectionRefused, TimedOut, WouldBlock};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};
use std::time::{Duration, Instant};

use log::{debug, trace, warn};
use socket2::{Domain, Protocol, SockAddr, Socket, Type};

/// Datagram exchange with a single name server
pub trait Transport {
    fn send(&mut self, packet: &[u8]) -> io::Result<()>;

    /// Waits up to `timeout` for one datagram
    ///
    /// Returns `Ok(None)` when nothing arrived in time.
    fn recv(&mut self, buf: &mut [u8], timeout: Duration) -> io::Result<Option<usize>>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send(&mut self, packet: &[u8]) -> io::Result<()> {
        (**self).send(packet)
    }

    fn recv(&mut self, buf: &mut [u8], timeout: Duration) -> io::Result<Option<usize>> {
        (**self).recv(buf, timeout)
    }
}

/// A UDP socket connected to the name server
///
/// Connecting makes the kernel drop datagrams from any other peer. An ICMP
/// port unreachable reported on the connected socket is not a reply, so the
/// transport keeps waiting as if the server were silent. The socket is
/// closed when the transport is dropped.
pub struct UdpTransport {
    socket: UdpSocket,
    server: SocketAddr,
}

impl UdpTransport {
    pub fn connect(server: SocketAddr) -> io::Result<UdpTransport> {
        let domain = Domain::for_address(server);
        let any: IpAddr = if domain == Domain::IPV6 {
            Ipv6Addr::UNSPECIFIED.into()
        } else {
            Ipv4Addr::UNSPECIFIED.into()
        };
        let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
        socket.bind(&SockAddr::from(SocketAddr::new(any, 0)))?;
        socket.connect(&SockAddr::from(server))?;
        trace!("opened socket for {}", server);

        Ok(UdpTransport {
            socket: socket.into(),
            server,
        })
    }
}

impl Transport for UdpTransport {
    fn send(&mut self, packet: &[u8]) -> io::Result<()> {
        trace!("sending packet to {:?}", self.server);
        let sent = match self.socket.send(packet) {
            // error left over from an earlier datagram, nothing was sent
            Err(ref err) if err.kind() == ConnectionRefused => {
                debug!("{} refused an earlier datagram", self.server);
                self.socket.send(packet)?
            }
            sent => sent?,
        };
        if sent != packet.len() {
            warn!("failed to send entire packet");
        }
        Ok(())
    }

    fn recv(&mut self, buf: &mut [u8], timeout: Duration) -> io::Result<Option<usize>> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining == Duration::from_secs(0) {
                return Ok(None);
            }
            self.socket.set_read_timeout(Some(remaining))?;
            match self.socket.recv(buf) {
                Ok(len) => {
                    trace!("received {} bytes from {:?}", len, self.server);
                    return Ok(Some(len));
                }
                Err(ref err) if err.kind() == WouldBlock || err.kind() == TimedOut => {
                    return Ok(None)
                }
                Err(ref err) if err.kind() == ConnectionRefused => {
                    debug!("{} is not listening", self.server);
                }
                Err(err) => return Err(err),
            }
        }
    }
}

impl Drop for UdpTransport {
    fn drop(&mut self) {
        trace!("closing socket for {}", self.server);
    }
}
