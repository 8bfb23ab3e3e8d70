//! Integration tests for the generation scheduler.

mod common;

use chrono::{TimeZone, Utc};
use common::*;
use herald_bot::GenerationScheduler;
use herald_core::{ContentStatus, Frequency, GenerationStatus, Platform, SystemMode};
use herald_store::ContentStore;
use std::sync::Arc;

// 2026-08-03 is a Monday.
fn monday_at(hour: u32, minute: u32, second: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 3, hour, minute, second).unwrap()
}

fn tuesday_at(hour: u32, minute: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 4, hour, minute, 0).unwrap()
}

#[tokio::test]
async fn daily_slot_creates_exactly_one_item() {
    let h = harness();
    seed_brand(
        &h,
        Some(schedule(
            Frequency::Daily,
            vec![],
            &["09:00"],
            vec![Platform::LinkedIn],
        )),
    )
    .await;
    let scheduler = GenerationScheduler::new(h.orchestrator.clone());

    assert_eq!(scheduler.tick(monday_at(9, 0, 10)).await.unwrap(), 1);

    let items = h.content.list(None, None).await.unwrap();
    assert_eq!(items.len(), 1);
    let item = &items[0];
    assert_eq!(item.platform, Platform::LinkedIn);
    assert_eq!(item.status, ContentStatus::Pending);
    assert_eq!(item.generation_status, Some(GenerationStatus::Completed));
    assert!(!item.body.text.is_empty());

    // Off-slot minute does nothing.
    assert_eq!(scheduler.tick(monday_at(9, 1, 0)).await.unwrap(), 0);
    assert_eq!(h.content.list(None, None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn second_tick_in_same_minute_is_a_no_op() {
    let h = harness();
    seed_brand(
        &h,
        Some(schedule(
            Frequency::Daily,
            vec![],
            &["09:00"],
            vec![Platform::LinkedIn],
        )),
    )
    .await;
    let scheduler = GenerationScheduler::new(h.orchestrator.clone());

    assert_eq!(scheduler.tick(monday_at(9, 0, 5)).await.unwrap(), 1);
    // Same minute key: a slow first tick must not double-fire.
    assert_eq!(scheduler.tick(monday_at(9, 0, 45)).await.unwrap(), 0);
    assert_eq!(h.content.list(None, None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn weekly_with_no_days_fires_only_on_monday() {
    let h = harness();
    seed_brand(
        &h,
        Some(schedule(
            Frequency::Weekly,
            vec![],
            &["09:00"],
            vec![Platform::LinkedIn],
        )),
    )
    .await;
    let scheduler = GenerationScheduler::new(h.orchestrator.clone());

    assert_eq!(scheduler.tick(monday_at(9, 0, 0)).await.unwrap(), 1);
    assert_eq!(scheduler.tick(tuesday_at(9, 0)).await.unwrap(), 0);
    assert_eq!(h.content.list(None, None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn custom_frequency_fires_only_on_listed_days() {
    let h = harness();
    // Tuesday is day 2.
    seed_brand(
        &h,
        Some(schedule(
            Frequency::Custom,
            vec![2],
            &["14:30"],
            vec![Platform::Facebook],
        )),
    )
    .await;
    let scheduler = GenerationScheduler::new(h.orchestrator.clone());

    assert_eq!(scheduler.tick(monday_at(14, 30, 0)).await.unwrap(), 0);
    assert_eq!(scheduler.tick(tuesday_at(14, 30)).await.unwrap(), 1);
}

#[tokio::test]
async fn fans_out_one_item_per_platform() {
    let h = harness();
    seed_brand(
        &h,
        Some(schedule(
            Frequency::Daily,
            vec![],
            &["09:00"],
            vec![Platform::LinkedIn, Platform::Twitter],
        )),
    )
    .await;
    let scheduler = GenerationScheduler::new(h.orchestrator.clone());

    assert_eq!(scheduler.tick(monday_at(9, 0, 0)).await.unwrap(), 2);

    let items = h.content.list(None, None).await.unwrap();
    assert_eq!(items.len(), 2);
    let mut platforms: Vec<Platform> = items.iter().map(|i| i.platform).collect();
    platforms.sort();
    assert_eq!(platforms, vec![Platform::LinkedIn, Platform::Twitter]);
}

#[tokio::test]
async fn paused_and_crisis_skip_the_tick() {
    let h = harness();
    seed_brand(
        &h,
        Some(schedule(
            Frequency::Daily,
            vec![],
            &["09:00"],
            vec![Platform::LinkedIn],
        )),
    )
    .await;
    let scheduler = GenerationScheduler::new(h.orchestrator.clone());

    h.orchestrator
        .set_mode(SystemMode::Paused, "ops", None, None)
        .await
        .unwrap();
    assert_eq!(scheduler.tick(monday_at(9, 0, 0)).await.unwrap(), 0);

    h.orchestrator
        .set_mode(SystemMode::Crisis, "ops", None, None)
        .await
        .unwrap();
    assert_eq!(scheduler.tick(monday_at(9, 1, 0)).await.unwrap(), 0);

    assert!(h.content.list(None, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn manual_only_still_generates_drafts() {
    let h = harness();
    seed_brand(
        &h,
        Some(schedule(
            Frequency::Daily,
            vec![],
            &["09:00"],
            vec![Platform::LinkedIn],
        )),
    )
    .await;
    let scheduler = GenerationScheduler::new(h.orchestrator.clone());

    h.orchestrator
        .set_mode(SystemMode::ManualOnly, "ops", None, None)
        .await
        .unwrap();
    assert_eq!(scheduler.tick(monday_at(9, 0, 0)).await.unwrap(), 1);
}

#[tokio::test]
async fn generator_failure_does_not_abort_the_tick() {
    let h = harness_with(Arc::new(FakeGenerator::failing()), registry(false));
    seed_brand(
        &h,
        Some(schedule(
            Frequency::Daily,
            vec![],
            &["09:00"],
            vec![Platform::LinkedIn, Platform::Twitter],
        )),
    )
    .await;
    let scheduler = GenerationScheduler::new(h.orchestrator.clone());

    // Both fan-outs run; each lands as a visible failed draft.
    assert_eq!(scheduler.tick(monday_at(9, 0, 0)).await.unwrap(), 2);

    let items = h.content.list(None, None).await.unwrap();
    assert_eq!(items.len(), 2);
    for item in items {
        assert_eq!(item.status, ContentStatus::Pending);
        assert_eq!(item.generation_status, Some(GenerationStatus::Failed));
        assert!(item.generation_error.is_some());
    }
}

#[tokio::test]
async fn upcoming_replays_matching_without_mutating_state() {
    let h = harness();
    let brand = seed_brand(
        &h,
        Some(schedule(
            Frequency::Daily,
            vec![],
            &["09:00"],
            vec![Platform::LinkedIn],
        )),
    )
    .await;
    let scheduler = GenerationScheduler::new(h.orchestrator.clone());

    // A 24h window from Monday 08:00 ends Tuesday 08:00, so only today's
    // 09:00 slot is inside it.
    let upcoming = scheduler.upcoming(24, monday_at(8, 0, 0)).await.unwrap();
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].brand_id, brand.id);
    assert_eq!(upcoming[0].scheduled_for, monday_at(9, 0, 0));
    assert_eq!(upcoming[0].platform, Platform::LinkedIn);

    // Look-ahead is pure: nothing was created.
    assert!(h.content.list(None, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn upcoming_honors_weekly_day_matching() {
    let h = harness();
    seed_brand(
        &h,
        Some(schedule(
            Frequency::Weekly,
            vec![],
            &["09:00"],
            vec![Platform::LinkedIn],
        )),
    )
    .await;
    let scheduler = GenerationScheduler::new(h.orchestrator.clone());

    // From Tuesday morning, nothing fires within 24h; the next slot is the
    // following Monday.
    let from_tuesday = scheduler.upcoming(24, tuesday_at(8, 0)).await.unwrap();
    assert!(from_tuesday.is_empty());

    let week_out = scheduler.upcoming(7 * 24, tuesday_at(8, 0)).await.unwrap();
    assert_eq!(week_out.len(), 1);
    assert_eq!(
        week_out[0].scheduled_for,
        Utc.with_ymd_and_hms(2026, 8, 10, 9, 0, 0).unwrap()
    );
}
