//! Confirm a foreign VAT number against the live eVatR service.
//!
//! ```text
//! cargo run --example evatr_check -- DE115235681 "LU 26375245"
//! cargo run --example evatr_check -- DE212442423 LU26375245 "AMAZON EUROPE CORE S.A R.L." Luxembourg
//! ```
//!
//! `EVATR_URL` and `EVATR_TIMEOUT_SECS` override the endpoint and timeout;
//! `RUST_LOG=evatr=debug` shows request tracing.

use evatr::check::Checker;
use evatr::core::*;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 {
        eprintln!("usage: evatr_check <own DE VAT> <foreign VAT> [company name] [city] [post code] [street]");
        std::process::exit(2);
    }

    let checker = match Checker::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    if args.len() == 2 {
        match checker.check_simple(&SimpleCheckInput::new(&args[0], &args[1])) {
            Ok(r) => {
                println!("  {} => error code {}", r.validated_vat_number, r.error_code);
                println!("    valid={}", r.is_valid);
                if let Some(from) = r.valid_from {
                    println!("    valid from {from}");
                }
                if let Some(until) = r.valid_until {
                    println!("    valid until {until}");
                }
            }
            Err(e) => report(&e),
        }
        return;
    }

    let arg = |i: usize| args.get(i).cloned().unwrap_or_default();
    let input = QualifiedCheckInput::new(&args[0], &args[1])
        .company_name(arg(2))
        .city(arg(3))
        .post_code(arg(4))
        .street(arg(5));

    match checker.check_qualified(&input) {
        Ok(r) => {
            println!("  {} => error code {}", r.validated_vat_number, r.error_code);
            println!("    name:      {}", r.name);
            println!("    city:      {}", r.city);
            println!("    post code: {}", r.post_code);
            println!("    street:    {}", r.street);
        }
        Err(e) => report(&e),
    }
}

fn report(e: &EvatrError) {
    if e.is_input_error() {
        eprintln!("fix the input: {e}");
    } else {
        eprintln!("request failed, try again later: {e}");
    }
    std::process::exit(1);
}
