//! Simple inspector for share links.
//!
//! Prints which shape a link matches and what its payload looks like. The
//! recovered phrase itself is never printed, only its size.
//!
//! ```text
//! cargo run --example inspect_link -- 'https://vaultaire.app/s#...'
//! RUST_LOG=vaultaire_share=debug cargo run --example inspect_link -- '...'
//! ```

use tracing_subscriber::EnvFilter;
use url::Url;
use vaultaire_share::codec::{base58, inspect_payload, PayloadVersion};
use vaultaire_share::{LinkConfig, ShareLinks};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let input = std::env::args().nth(1).unwrap_or_else(|| {
        let sample = "zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo wrong";
        ShareLinks::new(LinkConfig::new()).build_url(sample)
    });

    println!("Link: {} ({} chars)", input, input.len());

    let url = match Url::parse(&input) {
        Ok(url) => url,
        Err(e) => {
            println!("Not a URL: {}", e);
            return;
        }
    };

    let links = ShareLinks::new(LinkConfig::new());

    println!("\n=== Shape ===");
    match links.classify(&url) {
        Some(shape) => println!("Matched: {:?}", shape),
        None => {
            println!("Not a share link");
            return;
        }
    }

    println!("\n=== Token ===");
    let Some(token) = links.extract_token(&url) else {
        println!("No token in fragment or query");
        return;
    };
    let source = if url.fragment().is_some_and(|f| !f.is_empty()) {
        "fragment"
    } else {
        "query"
    };
    println!("Source: {}", source);
    println!("Length: {} chars", token.len());

    let payload = match base58::decode(&token) {
        Ok(payload) => payload,
        Err(e) => {
            println!("Invalid token: {}", e);
            return;
        }
    };

    println!("\n=== Payload ===");
    println!("Size: {} bytes", payload.len());
    match inspect_payload(&payload) {
        Ok(info) => {
            let version = match info.version {
                PayloadVersion::Raw => "raw",
                PayloadVersion::Deflate => "deflate",
            };
            println!("Version: {:#04x} ({})", info.version.as_byte(), version);
            println!("Content: {} bytes", info.content_len);
        }
        Err(e) => {
            println!("Invalid payload: {}", e);
            return;
        }
    }

    println!("\n=== Phrase ===");
    match links.try_phrase_from_url(&url) {
        Ok(phrase) => {
            let words = phrase.split_whitespace().count();
            println!("Recovered: {} bytes, {} words", phrase.len(), words);
        }
        Err(e) => println!("Rejected: {}", e),
    }
}
