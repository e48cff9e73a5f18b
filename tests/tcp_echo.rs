//! End-to-end: a real OS-level client talking to a server built from
//! `TcpListener`/`TcpStream`/`Handler`/`Server`/`block_on`.

use fibra::block_on;
use fibra::net::{Handler, Server, TcpStream};

use std::future::Future;
use std::io::{Read, Write};
use std::net::Shutdown;
use std::sync::mpsc;
use std::thread;

struct Echo;

impl Handler for Echo {
    fn handle_request(&self, stream: TcpStream) -> impl Future<Output = ()> + 'static {
        async move {
            let mut buf = [0u8; 4096];
            loop {
                match stream.read_at_most(&mut buf).await {
                    Ok(n) => {
                        if stream.send_all(&buf[..n]).await.is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }
        }
    }
}

/// Property 6 (§8): a client that sends N bytes and half-closes must
/// receive exactly N bytes back, in order, before the connection closes —
/// regardless of how the reactor chunks readiness events.
#[test]
fn echo_under_load() {
    let (addr_tx, addr_rx) = mpsc::channel();

    thread::spawn(move || {
        block_on(async move {
            let server = Server::bind("127.0.0.1:0", Echo).expect("bind");
            addr_tx
                .send(server.local_addr().expect("local_addr"))
                .expect("send addr");
            server.serve().await.expect("serve");
        });
    });

    let addr = addr_rx.recv().expect("server never reported its address");

    let payload: Vec<u8> = (0..65_536u32).map(|i| (i % 251) as u8).collect();

    let mut client = std::net::TcpStream::connect(addr).expect("connect");
    client.write_all(&payload).expect("write_all");
    client
        .shutdown(Shutdown::Write)
        .expect("half-close the write side");

    let mut received = Vec::new();
    client.read_to_end(&mut received).expect("read_to_end");

    assert_eq!(received, payload);
}

/// A client that sends nothing and closes immediately should not hang the
/// handler or the accept loop.
#[test]
fn immediate_close_does_not_hang_the_handler() {
    let (addr_tx, addr_rx) = mpsc::channel();

    thread::spawn(move || {
        block_on(async move {
            let server = Server::bind("127.0.0.1:0", Echo).expect("bind");
            addr_tx
                .send(server.local_addr().expect("local_addr"))
                .expect("send addr");
            server.serve().await.expect("serve");
        });
    });

    let addr = addr_rx.recv().expect("server never reported its address");

    let client = std::net::TcpStream::connect(addr).expect("connect");
    drop(client);

    // A second, well-behaved connection must still be served correctly,
    // proving the first connection's abrupt close didn't wedge the loop.
    let mut client = std::net::TcpStream::connect(addr).expect("connect");
    client.write_all(b"still alive").expect("write_all");
    client
        .shutdown(Shutdown::Write)
        .expect("half-close the write side");

    let mut received = Vec::new();
    client.read_to_end(&mut received).expect("read_to_end");
    assert_eq!(received, b"still alive");
}
