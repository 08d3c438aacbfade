//! Blocking UDP transport.
//!
//! One socket, bound once at startup and shared for the life of the
//! process. An exchange sends a single datagram and blocks for a single
//! reply under the configured timeout; a timeout is reported distinctly
//! from a send failure so the engine can log them apart, but both downgrade
//! to an empty round.

use std::io;
use std::net::{SocketAddr, UdpSocket};
use std::time::Duration;
use thiserror::Error;

use peregrine_proto::MAX_UDP_MESSAGE_SIZE;

/// Transport errors for one UDP exchange.
#[derive(Error, Debug)]
pub enum TransportError {
    /// No reply arrived within the receive timeout.
    #[error("timed out waiting for a response")]
    Timeout,

    /// The query datagram could not be sent.
    #[error("send failed: {0}")]
    Send(#[source] io::Error),

    /// Receiving the reply failed for a reason other than the timeout.
    #[error("receive failed: {0}")]
    Recv(#[source] io::Error),
}

/// A synchronous request/response datagram exchange.
pub trait Transport {
    /// Sends `payload` to `server` and waits for one reply datagram.
    fn exchange(&self, payload: &[u8], server: SocketAddr) -> Result<Vec<u8>, TransportError>;
}

/// UDP transport over a single shared socket.
#[derive(Debug)]
pub struct UdpTransport {
    socket: UdpSocket,
}

impl UdpTransport {
    /// Binds the socket and sets the receive timeout.
    ///
    /// Failure here is fatal for the process: no resolution can happen
    /// without transport, so the caller exits non-zero.
    pub fn bind(timeout: Duration) -> io::Result<Self> {
        let socket = UdpSocket::bind(("0.0.0.0", 0))?;
        socket.set_read_timeout(Some(timeout))?;
        Ok(Self { socket })
    }
}

impl Transport for UdpTransport {
    fn exchange(&self, payload: &[u8], server: SocketAddr) -> Result<Vec<u8>, TransportError> {
        self.socket
            .send_to(payload, server)
            .map_err(TransportError::Send)?;

        let mut buf = [0u8; MAX_UDP_MESSAGE_SIZE];
        loop {
            match self.socket.recv_from(&mut buf) {
                Ok((len, from)) => {
                    // A datagram from some other endpoint is not our answer.
                    if from != server {
                        continue;
                    }
                    return Ok(buf[..len].to_vec());
                }
                Err(e)
                    if e.kind() == io::ErrorKind::WouldBlock
                        || e.kind() == io::ErrorKind::TimedOut =>
                {
                    return Err(TransportError::Timeout);
                }
                Err(e) => return Err(TransportError::Recv(e)),
            }
        }
    }
}
