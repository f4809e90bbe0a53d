use objcache::prelude::*;
use std::time::Duration;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let host = std::env::var("REDIS_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let redis = RedisConfig::new(host, 6379)
        .database(0)
        .pool_size(5)
        .connection_timeout(Duration::from_secs(2));

    println!("Connecting to Redis at {}", redis.url());

    // Two tenants of the same installation sharing one database
    let config = CacheConfig::tenant("1").salt("example_");
    match ObjectCache::connect(redis.clone(), config).await {
        Ok(tenant_one) => {
            let tenant_two =
                ObjectCache::connect(redis, CacheConfig::tenant("2").salt("example_")).await?;

            tenant_one.set("hello", "world", "posts", 300).await;
            match tenant_one.get("hello", "posts").await {
                CacheResult::Hit(value) => println!("Hit: {:?}", value),
                CacheResult::Miss => println!("Miss"),
            }

            // Tenant-local groups do not leak
            println!(
                "Tenant 2 sees post: {}",
                tenant_two.get("hello", "posts").await.is_hit()
            );

            // Global groups are shared
            tenant_one.set(1, "sachin", "users", 0).await;
            println!(
                "Tenant 2 sees user: {:?}",
                tenant_two.get(1, "users").await
            );

            // Counters are atomic on the server
            let first = tenant_one.increment("page-views", 1, "stats").await;
            let second = tenant_one.increment("page-views", 1, "stats").await;
            println!("Page views: {:?} -> {:?}", first, second);

            tenant_one.delete("hello", "posts").await;
            tenant_one.delete(1, "users").await;
            tenant_one.delete("page-views", "stats").await;

            println!("Stats: {:?}", tenant_one.stats());
        }
        Err(e) => {
            println!("Skipping Redis example: {}", e);
        }
    }

    Ok(())
}
