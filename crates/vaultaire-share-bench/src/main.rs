//! Benchmark for share link encoding using a phrase corpus.
//!
//! Reads phrases from a JSON file (`[{"phrase": "...", "label": "..."}]`) or,
//! without one, generates word-list phrases of the usual recovery lengths.

use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use serde::Deserialize;
use vaultaire_share::codec::{base58, build_payload, inspect_payload, parse_payload, PayloadVersion};
use vaultaire_share::{build_url, phrase_from_url};

// =============================================================================
// SYNTHETIC CORPUS
// =============================================================================

/// Word list used for generated phrases.
const WORDS: &[&str] = &[
    "abandon", "ability", "able", "about", "above", "absent", "absorb", "abstract", "absurd",
    "abuse", "access", "accident", "account", "accuse", "achieve", "acid", "acoustic", "acquire",
    "across", "act", "action", "actor", "actress", "actual", "adapt", "add", "addict", "address",
    "adjust", "admit", "adult", "advance", "advice", "aerobic", "affair", "afford", "afraid",
    "again", "age", "agent", "agree", "ahead", "aim", "air", "airport", "aisle", "alarm", "album",
    "legal", "winner", "thank", "year", "wave", "sausage", "worth", "useful", "yellow", "zoo",
    "wrong", "letter", "advice", "cage", "absurd", "amount", "doctor", "acoustic", "avoid",
];

/// Recovery phrase lengths in words.
const PHRASE_LENGTHS: &[usize] = &[12, 15, 18, 21, 24];

const GENERATED_PER_LENGTH: usize = 200;

/// Deterministic xorshift so runs are comparable.
struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
}

fn generate_corpus() -> Vec<PhraseRecord> {
    let mut rng = XorShift(0x9E37_79B9_7F4A_7C15);
    let mut records = Vec::with_capacity(PHRASE_LENGTHS.len() * GENERATED_PER_LENGTH);
    for &len in PHRASE_LENGTHS {
        for _ in 0..GENERATED_PER_LENGTH {
            let words: Vec<&str> = (0..len)
                .map(|_| WORDS[(rng.next() % WORDS.len() as u64) as usize])
                .collect();
            records.push(PhraseRecord {
                phrase: words.join(" "),
                label: Some(format!("{}-words", len)),
            });
        }
    }
    records
}

// =============================================================================
// JSON DATA STRUCTURES
// =============================================================================

#[derive(Debug, Deserialize)]
struct PhraseRecord {
    phrase: String,
    #[serde(default)]
    label: Option<String>,
}

#[derive(Debug, Default)]
struct SizeStats {
    count: usize,
    deflate: usize,
    raw_bytes: usize,
    payload_bytes: usize,
    token_chars: usize,
    max_token_chars: usize,
    url_chars: usize,
}

impl SizeStats {
    fn record(&mut self, phrase: &str, payload: &[u8], token: &str, url: &str) {
        self.count += 1;
        self.raw_bytes += phrase.len();
        self.payload_bytes += payload.len();
        self.token_chars += token.len();
        self.max_token_chars = self.max_token_chars.max(token.len());
        self.url_chars += url.len();
        if matches!(
            inspect_payload(payload).map(|info| info.version),
            Ok(PayloadVersion::Deflate)
        ) {
            self.deflate += 1;
        }
    }

    fn avg(&self, total: usize) -> f64 {
        total as f64 / self.count.max(1) as f64
    }
}

fn per_item(elapsed: Duration, count: usize) -> Duration {
    elapsed / count.max(1) as u32
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let records = match std::env::args().nth(1) {
        Some(path) => {
            println!("Loading phrases from: {}", path);
            let json = fs::read_to_string(Path::new(&path)).expect("Failed to read phrase file");
            serde_json::from_str::<Vec<PhraseRecord>>(&json).expect("Failed to parse JSON")
        }
        None => {
            println!("No phrase file given, generating corpus");
            generate_corpus()
        }
    };

    println!("Loaded {} phrases", records.len());

    // Encode everything once for size statistics
    let mut stats = SizeStats::default();
    let mut urls = Vec::with_capacity(records.len());
    for record in &records {
        let payload = build_payload(&record.phrase);
        let token = base58::encode(&payload);
        let url = build_url(&record.phrase);
        stats.record(&record.phrase, &payload, &token, &url);
        urls.push(url);
    }

    println!("\n=== Sizes ===");
    println!(
        "Deflate chosen: {} of {} ({:.1}%)",
        stats.deflate,
        stats.count,
        100.0 * stats.deflate as f64 / stats.count.max(1) as f64
    );
    println!("Avg phrase: {:.1} bytes", stats.avg(stats.raw_bytes));
    println!("Avg payload: {:.1} bytes", stats.avg(stats.payload_bytes));
    println!(
        "Avg token: {:.1} chars (max {})",
        stats.avg(stats.token_chars),
        stats.max_token_chars
    );
    println!("Avg URL: {:.1} chars", stats.avg(stats.url_chars));

    // Per-label breakdown, in first-seen order
    let mut labels: Vec<&str> = Vec::new();
    for record in &records {
        let label = record.label.as_deref().unwrap_or("unlabeled");
        if !labels.contains(&label) {
            labels.push(label);
        }
    }
    if labels.len() > 1 {
        println!("\n=== By Label ===");
        for label in labels {
            let mut label_stats = SizeStats::default();
            for (record, url) in records.iter().zip(&urls) {
                if record.label.as_deref().unwrap_or("unlabeled") != label {
                    continue;
                }
                let payload = build_payload(&record.phrase);
                let token = base58::encode(&payload);
                label_stats.record(&record.phrase, &payload, &token, url);
            }
            println!(
                "{:>12}: {} phrases, deflate {:.0}%, avg token {:.1} chars",
                label,
                label_stats.count,
                100.0 * label_stats.deflate as f64 / label_stats.count.max(1) as f64,
                label_stats.avg(label_stats.token_chars)
            );
        }
    }

    const ITERS: usize = 5;

    // Benchmark payload building
    let start = Instant::now();
    let mut payloads = Vec::new();
    for _ in 0..ITERS {
        payloads = records.iter().map(|r| build_payload(&r.phrase)).collect();
    }
    let build_time = start.elapsed();
    println!("\n=== Timing (avg of {} iterations) ===", ITERS);
    println!("Build payload: {:?}/phrase", per_item(build_time, ITERS * records.len()));

    // Benchmark base58
    let start = Instant::now();
    let mut tokens = Vec::new();
    for _ in 0..ITERS {
        tokens = payloads.iter().map(|p| base58::encode(p)).collect();
    }
    let encode_time = start.elapsed();
    println!("Base58 encode: {:?}/phrase", per_item(encode_time, ITERS * records.len()));

    let start = Instant::now();
    for _ in 0..ITERS {
        for (token, payload) in tokens.iter().zip(&payloads) {
            let decoded = base58::decode(token).expect("Failed to decode token");
            assert_eq!(&decoded, payload);
        }
    }
    let decode_time = start.elapsed();
    println!("Base58 decode: {:?}/phrase", per_item(decode_time, ITERS * records.len()));

    let start = Instant::now();
    for _ in 0..ITERS {
        for (payload, record) in payloads.iter().zip(&records) {
            let phrase = parse_payload(payload).expect("Failed to parse payload");
            assert_eq!(phrase, record.phrase);
        }
    }
    let parse_time = start.elapsed();
    println!("Parse payload: {:?}/phrase", per_item(parse_time, ITERS * records.len()));

    // End-to-end through the URL layer
    let start = Instant::now();
    for (url, record) in urls.iter().zip(&records) {
        let phrase = phrase_from_url(url).expect("Failed to recover phrase");
        assert_eq!(phrase, record.phrase);
    }
    let url_time = start.elapsed();
    println!("URL to phrase: {:?}/phrase", per_item(url_time, records.len()));

    println!("\n=== Summary ===");
    println!("Phrases: {}", records.len());
    println!("All round trips verified");
}
