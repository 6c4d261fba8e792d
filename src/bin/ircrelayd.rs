use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use flexi_logger::{Duplicate, Logger};
use log::info;
use socket2::{Domain, Socket, Type};
use tokio::net::TcpListener;

use ircrelay::{session, RelayError, Registry};

/// Minimal IRC-style chat relay.
#[derive(Parser, Debug)]
#[command(name = "ircrelayd")]
struct Args {
    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on.
    #[arg(long, default_value_t = 6667)]
    port: u16,
}

fn bind_listener(addr: SocketAddr) -> Result<TcpListener, RelayError> {
    let domain = if addr.is_ipv6() { Domain::IPV6 } else { Domain::IPV4 };
    let socket = Socket::new(domain, Type::STREAM, None).map_err(|source| RelayError::Bind {
        addr: addr.to_string(),
        source,
    })?;
    socket
        .set_reuse_address(true)
        .map_err(|source| RelayError::Bind {
            addr: addr.to_string(),
            source,
        })?;
    socket.bind(&addr.into()).map_err(|source| RelayError::Bind {
        addr: addr.to_string(),
        source,
    })?;
    socket.listen(1024).map_err(|source| RelayError::Bind {
        addr: addr.to_string(),
        source,
    })?;
    socket.set_nonblocking(true).map_err(|source| RelayError::Bind {
        addr: addr.to_string(),
        source,
    })?;
    TcpListener::from_std(socket.into()).map_err(|source| RelayError::Bind {
        addr: addr.to_string(),
        source,
    })
}

#[tokio::main]
async fn main() -> Result<(), RelayError> {
    Logger::try_with_str("info")
        .and_then(|logger| {
            logger
                .log_to_stderr()
                .duplicate_to_stderr(Duplicate::All)
                .start()
        })
        .map_err(RelayError::from)?;

    let args = Args::parse();
    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|_| RelayError::Bind {
            addr: format!("{}:{}", args.host, args.port),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "unparsable address"),
        })?;

    let listener = bind_listener(addr)?;
    info!("listening on {addr}");

    let registry = Arc::new(Registry::new());

    loop {
        let (stream, peer) = listener.accept().await?;
        info!("accepted connection from {peer}");
        let registry = registry.clone();
        tokio::spawn(async move {
            session::run(registry, stream).await;
        });
    }
}
