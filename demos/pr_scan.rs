//! Scan a listing of stored PR result paths and keep a window of PR numbers.
//!
//! The listing is simulated with an async stream; in a real job it would come
//! from a blob store. Run with `RUST_LOG`-style verbosity via the fmt subscriber.

use pipefeed::prelude::*;
use tokio_stream::StreamExt;

const LOW: u32 = 7;
const HIGH: u32 = 10;

fn pr_number(path: String) -> Result<u32> {
    let number = path
        .rsplit('/')
        .nth(1)
        .ok_or_else(|| Error::custom(format!("too few segments in {}", path)))?;
    let number: u32 = number.parse().into_transform_error()?;

    if (LOW..=HIGH).contains(&number) {
        Ok(number)
    } else {
        Err(Error::Skip)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== PR Scan Example ===");

    let token = CancellationToken::new();
    let listing = tokio_stream::iter((0..20).map(|i| format!("pr-logs/pull/{}/junit.xml", i)))
        .chain(tokio_stream::once("pr-logs/pull/abc/junit.xml".to_string()));

    let paths = Producer::new(StreamCursor::new(listing))
        .name("listing")
        .with_setup(|| async {
            println!("Connecting to storage...");
            Ok(())
        })
        .start(token.clone(), 16);

    let numbers = Transformer::new()
        .name("pr-number")
        .transform(token, paths, pr_number);

    let (outputs, errors) = partition(numbers).await;

    println!("PR numbers in [{}, {}]: {:?}", LOW, HIGH, outputs);
    for error in errors {
        println!("Failed: {}", error);
    }

    println!("PR scan completed!\n");
    Ok(())
}
