//! Multiplexed forwarder (spec.md §4.F): one long-lived connected UDP
//! socket, a sender thread and a receiver thread, demultiplexed by
//! transaction ID.
//!
//! Grounded on `AdvancedForwardUDPResolver` in `advanced_forward.go`
//! (`sender`/`receiver` goroutines, `IndexAllocator`, `failedReserveTotal`/
//! `clientGoneTotal` counters) and on the teacher's threaded-loop style in
//! `dns_server.rs`'s `serve_udp` (500ms read timeout, `Permit::is_revoked`
//! as the stop condition).

use std::collections::HashMap;
use std::net::UdpSocket;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use log::warn;
use permit::Permit;

use crate::error::ResolveError;
use crate::idalloc::IdAllocator;
use crate::wire::Message;

const UDP_PAYLOAD_LIMIT: usize = 512;
const SOCKET_POLL_INTERVAL: Duration = Duration::from_millis(500);

type Sink = mpsc::Sender<Result<Message, ResolveError>>;

struct PendingRequest {
    message: Message,
    sink: Sink,
}

/// A single shared upstream UDP socket serving many concurrent callers.
pub struct MultiplexedForwarder {
    intake: mpsc::Sender<PendingRequest>,
    failed_reserve_total: Arc<AtomicU64>,
    client_gone_total: Arc<AtomicU64>,
    sender_handle: Option<JoinHandle<()>>,
    receiver_handle: Option<JoinHandle<()>>,
}

impl MultiplexedForwarder {
    /// Bind a connected socket to `upstream` and spawn the sender/receiver
    /// threads. Both threads stop once `permit` is revoked.
    pub fn new(upstream: &str, pool_size: u16, permit: Permit) -> std::io::Result<Self> {
        let socket = UdpSocket::bind("0.0.0.0:0")?;
        socket.connect(upstream)?;
        socket.set_read_timeout(Some(SOCKET_POLL_INTERVAL))?;

        let ids = Arc::new(IdAllocator::new(pool_size));
        let sinks: Arc<Mutex<HashMap<u16, Sink>>> = Arc::new(Mutex::new(HashMap::new()));
        let failed_reserve_total = Arc::new(AtomicU64::new(0));
        let client_gone_total = Arc::new(AtomicU64::new(0));

        let (intake_tx, intake_rx) = mpsc::channel::<PendingRequest>();

        let sender_handle = {
            let socket = socket.try_clone()?;
            let ids = Arc::clone(&ids);
            let sinks = Arc::clone(&sinks);
            let failed_reserve_total = Arc::clone(&failed_reserve_total);
            let permit = permit.clone();
            std::thread::spawn(move || {
                sender_loop(&permit, &intake_rx, &socket, &ids, &sinks, &failed_reserve_total);
            })
        };

        let receiver_handle = {
            let socket = socket.try_clone()?;
            let ids = Arc::clone(&ids);
            let sinks = Arc::clone(&sinks);
            let client_gone_total = Arc::clone(&client_gone_total);
            let permit = permit.clone();
            std::thread::spawn(move || {
                receiver_loop(&permit, &socket, &ids, &sinks, &client_gone_total);
            })
        };

        Ok(Self {
            intake: intake_tx,
            failed_reserve_total,
            client_gone_total,
            sender_handle: Some(sender_handle),
            receiver_handle: Some(receiver_handle),
        })
    }

    #[must_use]
    pub fn failed_reserve_total(&self) -> u64 {
        self.failed_reserve_total.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn client_gone_total(&self) -> u64 {
        self.client_gone_total.load(Ordering::Relaxed)
    }

    /// Resolve `message` against the shared upstream socket. Blocks until
    /// a reply arrives, `permit` is revoked, or the sink is closed because
    /// the ID pool is exhausted.
    pub fn resolve(&self, permit: &Permit, message: Message) -> Result<Message, ResolveError> {
        let (sink, result_rx) = mpsc::channel();
        self.intake
            .send(PendingRequest { message, sink })
            .map_err(|_| ResolveError::UpstreamUnavailable("forwarder shut down".to_string()))?;

        loop {
            if permit.is_revoked() {
                return Err(ResolveError::DeadlineExceeded);
            }
            match result_rx.recv_timeout(SOCKET_POLL_INTERVAL) {
                Ok(result) => return result,
                Err(mpsc::RecvTimeoutError::Timeout) => continue,
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    return Err(ResolveError::UpstreamUnavailable("not available".to_string()))
                }
            }
        }
    }
}

impl Drop for MultiplexedForwarder {
    fn drop(&mut self) {
        if let Some(h) = self.sender_handle.take() {
            let _ = h.join();
        }
        if let Some(h) = self.receiver_handle.take() {
            let _ = h.join();
        }
    }
}

fn sender_loop(
    permit: &Permit,
    intake: &mpsc::Receiver<PendingRequest>,
    socket: &UdpSocket,
    ids: &IdAllocator,
    sinks: &Mutex<HashMap<u16, Sink>>,
    failed_reserve_total: &AtomicU64,
) {
    while !permit.is_revoked() {
        let request = match intake.recv_timeout(SOCKET_POLL_INTERVAL) {
            Ok(request) => request,
            Err(mpsc::RecvTimeoutError::Timeout) => continue,
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        };

        let id = match ids.reserve() {
            Ok(id) => id,
            Err(_) => {
                failed_reserve_total.fetch_add(1, Ordering::Relaxed);
                // Dropping the sink closes the caller's channel; `resolve`
                // observes "not available".
                continue;
            }
        };
        sinks.lock().unwrap().insert(id, request.sink);

        let mut query = request.message;
        query.header.id = id;
        let mut buf = [0u8; UDP_PAYLOAD_LIMIT];
        match query.write(&mut buf) {
            Ok(n) => {
                if let Err(e) = socket.send(&buf[..n]) {
                    warn!("multiplexed forwarder: send failed: {e}");
                }
            }
            Err(e) => warn!("multiplexed forwarder: encode failed: {e}"),
        }
    }
}

fn receiver_loop(
    permit: &Permit,
    socket: &UdpSocket,
    ids: &IdAllocator,
    sinks: &Mutex<HashMap<u16, Sink>>,
    client_gone_total: &AtomicU64,
) {
    let mut buf = [0u8; UDP_PAYLOAD_LIMIT];
    while !permit.is_revoked() {
        let n = match socket.recv(&mut buf) {
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock || e.kind() == std::io::ErrorKind::TimedOut => {
                continue;
            }
            Err(e) => {
                warn!("multiplexed forwarder: receiver terminating: {e}");
                return;
            }
        };

        let message = match Message::parse(&buf[..n]) {
            Ok(m) => m,
            Err(e) => {
                warn!("multiplexed forwarder: dropping undecodable packet: {e}");
                continue;
            }
        };

        let id = message.header.id;
        let sink = sinks.lock().unwrap().remove(&id);
        ids.free(&[id]);

        match sink {
            None => warn!("multiplexed forwarder: unclaimed reply for id {id}"),
            Some(sink) => {
                if sink.send(Ok(message)).is_err() {
                    client_gone_total.fetch_add(1, Ordering::Relaxed);
                }
            }
        }
    }
}
