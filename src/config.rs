use clap::Parser;

/// Six-seat No-Limit Hold'em server.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about)]
pub struct ServerConfig {
    /// PRNG seed; a given seed reproduces a given sequence of deals.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Starting chip stack for every seat.
    #[arg(long, default_value_t = 100)]
    pub stack: i64,

    /// Seat 0 listens on this port; seats 1..5 listen on base+1..base+5.
    #[arg(long = "base-port", default_value_t = 2201)]
    pub base_port: u16,
}

/// Scripted client driver: connects to one seat and plays a line-oriented
/// command script from stdin.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about)]
pub struct ClientConfig {
    /// Seat index 0..5 to connect as.
    pub seat: u8,

    /// Server host.
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Seat 0's port; this client connects to `base_port + seat`.
    #[arg(long = "base-port", default_value_t = 2201)]
    pub base_port: u16,
}
