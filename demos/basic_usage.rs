//! Basic usage example for service_kit
//!
//! Demonstrates:
//! - Building a logger from environment configuration
//! - Derived loggers with names, fields and request context
//! - Sugared key/value logging and the formatting macros
//! - Timing operations with a performance monitor

use service_kit::core::{http_request_fields, service_fields, FieldGroup};
use service_kit::prelude::*;
use service_kit::{info, warn};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn main() -> service_kit::Result<()> {
    println!("=== service_kit Basic Usage Example ===\n");

    // LOG_FORMAT=json or ENVIRONMENT=production switch to JSON lines
    let config = LoggerConfig::from_env()?;
    let logger = build_logger(&LoggerConfig {
        level: LogLevel::Debug,
        ..config
    })?;
    LoggerRegistry::global().set(Arc::clone(&logger));

    println!("1. Leveled logging with typed fields:");
    logger.debug("cache warmed", &[Field::uint32("entries", 1024)]);
    logger.info("server starting", &[Field::uint16("port", 8080)]);
    logger.warn("config file missing, using defaults", &[]);

    println!("\n2. Derived loggers:");
    let service = logger
        .named("billing")
        .with(&FieldGroup::from(service_fields("billing", "1.4.2", "development")).into_fields());
    service.info("ready", &[]);

    println!("\n3. Request context:");
    let ctx = RequestContext::new()
        .with_request_id("req-8f2c")
        .with_user_id("user-42");
    let request_logger = service.with_context(&ctx);
    request_logger.info(
        "request served",
        &http_request_fields("GET", "/invoices", 200, Duration::from_millis(18)),
    );

    println!("\n4. Optional and lazy fields:");
    let coupon: Option<&str> = None;
    request_logger.info(
        "checkout",
        &[
            Field::nullable("coupon", coupon),
            Field::conditional(true, "express", true),
            Field::lazy("checked_at", || FieldValue::Time(chrono::Utc::now())),
        ],
    );

    println!("\n5. Sugar and macros:");
    logger.sugar().infow("user signed in", &[&"user", &"alice", &"attempt", &2]);
    info!(logger, "processed {} jobs in {}ms", 12, 340);
    warn!(logger, "queue depth {} above {}", 910, 500);

    println!("\n6. Performance monitoring:");
    let monitor = PerformanceMonitor::start(Arc::clone(&logger), "generate_report")
        .with_field(Field::string("format", "pdf"));
    thread::sleep(Duration::from_millis(25));
    monitor.finish();

    let total = track(Arc::clone(&logger), "sum_invoices", || (1..=100).sum::<u32>());
    logger.info("invoice total", &[Field::uint32("total", total)]);

    logger.sync()?;
    println!("\n=== Example completed ===");
    Ok(())
}
