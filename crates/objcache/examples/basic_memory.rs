//! Basic example demonstrating objcache with the in-memory store

use objcache::TracingMetrics;
use objcache::prelude::*;
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    println!("=== objcache Basic Example ===\n");

    let config = CacheConfig::tenant("1")
        .salt("demo_")
        .non_persistent_groups(["sessions"]);
    let cache = ObjectCache::with_codec_and_metrics(
        MemoryStore::new(),
        WireCodec::new(JsonSerializer),
        TracingMetrics::new()
            .with_service_name("basic-memory")
            .with_slow_threshold(Duration::from_millis(5)),
        config,
    );

    // Store-backed, per-tenant group
    println!("Derived key: {}", cache.build_key("hello-world", "posts"));
    cache.set("hello-world", "Hello, world!", "posts", 300).await;
    if let CacheResult::Hit(post) = cache.get("hello-world", "posts").await {
        println!("Post: {:?}", post);
    }

    // add refuses to overwrite
    let added = cache.add("hello-world", "Again", "posts", 0).await;
    println!("Second add accepted: {}", added);

    // Global groups ignore the tenant
    cache.set(42, "alice", "users", 0).await;
    println!("User key: {}", cache.build_key(42, "users"));

    // Non-persistent counters never leave the process
    cache.set("views", 1, "counts", 0).await;
    let views = cache.increment("views", 3, "counts").await;
    println!("Views: {:?}", views);

    let posts = cache.group("posts");
    posts.set("draft", "Work in progress", 0).await;
    println!("Draft removed: {}", posts.delete("draft").await);

    let stats = cache.stats();
    println!(
        "\nHits: {} (runtime {}, backend {}), misses: {}, writes: {}",
        stats.hits(),
        stats.runtime_hits,
        stats.backend_hits,
        stats.misses,
        stats.writes
    );

    cache.flush(Duration::from_millis(100)).await;
    println!("After flush: {:?}", cache.get("hello-world", "posts").await);

    Ok(())
}
