//! Example: logging in and accessing variables
//!
//! Run with: cargo run --example read_write -- <address> [password]
//!
//! This example demonstrates:
//! - Connecting and running the login handshake
//! - Writing an output
//! - Reading digital and analog variables
//! - Converting values with the utility functions

use logo_web::utils::{format_bool, parse_bool, parse_int};
use logo_web::{Client, ClientConfig, VariableKind, VariableRef, DEFAULT_PASSWORD};

fn main() -> logo_web::Result<()> {
    let mut args = std::env::args().skip(1);
    let address = args.next().unwrap_or_else(|| "192.168.1.10".to_string());
    let password = args.next().unwrap_or_else(|| DEFAULT_PASSWORD.to_string());

    let config = ClientConfig::new(&address).with_password(password);
    let client = Client::connect(config)?;
    println!("Connected to {}", client.session().endpoint());

    // Switch output Q1 on
    client.set("Q1", format_bool(true))?;

    // Digital values come back as "0"/"1"
    let q1 = parse_bool(&client.get("Q1")?)?;
    println!("Q1  = {}", q1);

    // Variable memory, raw text
    println!("VM0 = {}", client.get("VM0")?);

    // Analog inputs via the typed API
    for address in 1..=4 {
        let var = VariableRef::new(VariableKind::AI, address);
        let value = parse_int(&client.get_variable(var)?)?;
        println!("{:<4}= {} ({})", var.to_string(), value, var.kind.description());
    }

    Ok(())
}
