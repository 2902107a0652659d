//! Stress-test client, grounded in the teacher's `bin/irc_client_tests.rs`:
//! spawn many virtual users against a running server, join a common
//! channel, and send PRIVMSGs on an interval to exercise the broadcast
//! path. Invocation: `loadtest <host:port> <password> [num_clients]`.

use std::error::Error;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::{self, Duration};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let addr = args.next().unwrap_or_else(|| "127.0.0.1:6667".to_string());
    let password = args.next().unwrap_or_else(|| "changeme".to_string());
    let num_clients: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(100);

    println!("Starting load test: {num_clients} clients against {addr}");

    for id in 0..num_clients {
        let addr = addr.clone();
        let password = password.clone();
        tokio::spawn(async move {
            if let Err(err) = run_client(id, &addr, &password).await {
                eprintln!("client {id} error: {err}");
            }
        });
        time::sleep(Duration::from_millis(5)).await;
    }

    std::future::pending::<()>().await;
    Ok(())
}

async fn run_client(id: usize, addr: &str, password: &str) -> std::io::Result<()> {
    let mut stream = TcpStream::connect(addr).await?;
    let nick = format!("bot{id}");

    let handshake = format!(
        "PASS {password}\r\nNICK {nick}\r\nUSER {nick} 0 * :Load Tester\r\n"
    );
    stream.write_all(handshake.as_bytes()).await?;
    stream.write_all(b"JOIN #stress_test\r\n").await?;

    let mut ticker = time::interval(Duration::from_secs(1));
    let mut count = 0usize;
    loop {
        ticker.tick().await;
        let line = format!("PRIVMSG #stress_test :load test message {count} from {nick}\r\n");
        count += 1;
        if stream.write_all(line.as_bytes()).await.is_err() {
            break;
        }
    }
    Ok(())
}
