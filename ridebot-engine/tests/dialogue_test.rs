//! Integration tests for [`ridebot_engine::DialogueEngine`].
//!
//! Drives whole conversations through `respond` and checks both the replies
//! and the resulting record-store state: creation flows, validation
//! re-prompts, cancellation, booking arithmetic, search, and delete cascades.

use std::sync::Arc;

use chrono::{Days, Local};
use ridebot_core::OutboundMessage;
use ridebot_engine::DialogueEngine;
use ridebot_store::{Driver, RecordStore, Travel};

const CHAT: i64 = 42;

fn engine_with_store() -> (DialogueEngine, Arc<RecordStore>) {
    let store = Arc::new(RecordStore::new());
    (DialogueEngine::new(store.clone()), store)
}

fn future_date() -> String {
    Local::now()
        .date_naive()
        .checked_add_days(Days::new(30))
        .unwrap()
        .format("%d-%m-%Y")
        .to_string()
}

async fn seed_driver(store: &RecordStore, name: &str, rating: i64) -> Driver {
    let mut draft = Driver::draft();
    draft.name = name.to_string();
    draft.age = 40;
    draft.vehicle = "Panda".to_string();
    draft.rating = rating;
    store.add_driver(draft).await
}

async fn seed_travel(store: &RecordStore, destination: &str, token: &str, seats: i64) -> Travel {
    let mut draft = Travel::draft();
    draft.destination = destination.to_string();
    draft.date = Local::now()
        .date_naive()
        .checked_add_days(Days::new(10))
        .unwrap();
    draft.driver_token = token.to_string();
    draft.price = 12.5;
    draft.seats = seats;
    store.add_travel(draft).await
}

fn last_text(replies: &[OutboundMessage]) -> &str {
    &replies.last().expect("expected at least one reply").text
}

/// **Test: Full driver-creation flow ends with the driver stored, unrated.**
///
/// **Setup:** Empty store.
/// **Action:** /agg_guidatore → "Mario" → "40" → "Fiat Panda" → "s".
/// **Expected:** Each step prompts for the next field; confirm echoes the
/// listing plus "Ok"; the stored driver has rating 0 and a fresh id.
#[tokio::test]
async fn test_add_driver_end_to_end() {
    let (engine, store) = engine_with_store();

    let replies = engine.respond(CHAT, "/agg_guidatore").await;
    assert_eq!(replies.len(), 1);

    let replies = engine.respond(CHAT, "Mario").await;
    assert!(last_text(&replies).contains("Mario"));

    engine.respond(CHAT, "40").await;
    let replies = engine.respond(CHAT, "Fiat Panda").await;
    assert!(replies[0].markdown);
    assert!(replies[0].text.contains("Fiat Panda"));
    assert!(last_text(&replies).contains("[S/N]"));

    let replies = engine.respond(CHAT, "s").await;
    assert!(replies[0].text.contains("Mario"));
    assert!(replies[0].text.contains("0/10"));
    assert_eq!(last_text(&replies), "Ok");

    let drivers = store.list_drivers().await;
    assert_eq!(drivers.len(), 1);
    assert_eq!(drivers[0].name, "Mario");
    assert_eq!(drivers[0].age, 40);
    assert_eq!(drivers[0].rating, 0);
}

/// **Test: Rejecting the confirmation discards the draft.**
#[tokio::test]
async fn test_add_driver_rejected_leaves_store_empty() {
    let (engine, store) = engine_with_store();

    engine.respond(CHAT, "/agg_guidatore").await;
    engine.respond(CHAT, "Mario").await;
    engine.respond(CHAT, "40").await;
    engine.respond(CHAT, "Fiat Panda").await;
    let replies = engine.respond(CHAT, "n").await;

    assert!(last_text(&replies).contains("annullata"));
    assert!(store.list_drivers().await.is_empty());
}

/// **Test: Rating succeeds iff 1 ≤ r ≤ 10; otherwise re-prompt, no change.**
///
/// **Setup:** One unrated driver.
/// **Action:** /valuta → driver id → "0", "11", "abc", then "7".
/// **Expected:** The three bad values re-prompt and leave the rating at 0;
/// "7" commits and the flow ends.
#[tokio::test]
async fn test_rating_bounds() {
    let (engine, store) = engine_with_store();
    let driver = seed_driver(&store, "Anna", 0).await;

    engine.respond(CHAT, "/valuta").await;
    engine.respond(CHAT, &driver.id.to_string()).await;

    for bad in ["0", "11", "abc"] {
        let replies = engine.respond(CHAT, bad).await;
        assert!(last_text(&replies).contains("Valutazione incorretta"));
        assert_eq!(store.driver_by_id(driver.id).await.unwrap().rating, 0);
    }

    let replies = engine.respond(CHAT, "7").await;
    assert!(last_text(&replies).contains("feedback"));
    assert_eq!(store.driver_by_id(driver.id).await.unwrap().rating, 7);
}

/// **Test: An unknown driver id re-prompts without leaving the step.**
#[tokio::test]
async fn test_select_unknown_driver_reprompts() {
    let (engine, store) = engine_with_store();
    let driver = seed_driver(&store, "Anna", 0).await;

    engine.respond(CHAT, "/valuta").await;
    let replies = engine.respond(CHAT, "99").await;
    assert!(last_text(&replies).contains("ID incorretto"));

    // Still selecting: a valid id now advances to the rating prompt.
    let replies = engine.respond(CHAT, &driver.id.to_string()).await;
    assert!(last_text(&replies).contains("da 1 a 10"));
}

/// **Test: /annulla from any state discards the draft and mutates nothing.**
#[tokio::test]
async fn test_cancel_mid_flow() {
    let (engine, store) = engine_with_store();

    engine.respond(CHAT, "/agg_guidatore").await;
    engine.respond(CHAT, "Mario").await;
    let replies = engine.respond(CHAT, "/annulla").await;
    assert!(last_text(&replies).contains("annullata"));
    assert!(store.list_drivers().await.is_empty());

    // Back to idle: the next message dispatches as a command.
    let replies = engine.respond(CHAT, "/ping").await;
    assert_eq!(last_text(&replies), "Hey!");
}

/// **Test: Booking decrements seats by exactly the requested amount.**
///
/// **Setup:** Driver plus a travel with 3 seats.
/// **Action:** /prenota → travel id → "5" (too many) → "2" → "s".
/// **Expected:** The over-request re-prompts in place; the booking then
/// confirms and the travel ends with 1 seat.
#[tokio::test]
async fn test_booking_decrements_seats() {
    let (engine, store) = engine_with_store();
    let driver = seed_driver(&store, "Anna", 8).await;
    let travel = seed_travel(&store, "Roma", &driver.token, 3).await;

    engine.respond(CHAT, "/prenota").await;
    engine.respond(CHAT, &travel.id.to_string()).await;

    let replies = engine.respond(CHAT, "5").await;
    assert!(last_text(&replies).contains("insufficiente"));
    assert_eq!(store.travel_by_id(travel.id).await.unwrap().seats, 3);

    let replies = engine.respond(CHAT, "2").await;
    assert!(replies[0].text.contains("Posti da prenotare"));

    let replies = engine.respond(CHAT, "s").await;
    assert_eq!(last_text(&replies), "Ok");
    assert_eq!(store.travel_by_id(travel.id).await.unwrap().seats, 1);
}

/// **Test: Rejecting a booking confirmation leaves the seats untouched.**
#[tokio::test]
async fn test_booking_rejected_leaves_seats() {
    let (engine, store) = engine_with_store();
    let driver = seed_driver(&store, "Anna", 8).await;
    let travel = seed_travel(&store, "Roma", &driver.token, 3).await;

    engine.respond(CHAT, "/prenota").await;
    engine.respond(CHAT, &travel.id.to_string()).await;
    engine.respond(CHAT, "2").await;
    engine.respond(CHAT, "n").await;

    assert_eq!(store.travel_by_id(travel.id).await.unwrap().seats, 3);
}

/// **Test: Search flow filters by seats and substring, sorted by price.**
///
/// **Setup:** Driver and a travel to "Roma" with 3 seats.
/// **Action:** /cerca → "2" → "x" (bad order) → "p" → "Roma"; then a second
/// search asking for 4 seats.
/// **Expected:** First search returns the card and returns to idle; the
/// second reports no results.
#[tokio::test]
async fn test_search_flow() {
    let (engine, store) = engine_with_store();
    let driver = seed_driver(&store, "Anna", 8).await;
    seed_travel(&store, "Roma", &driver.token, 3).await;

    engine.respond(CHAT, "/cerca").await;
    engine.respond(CHAT, "2").await;

    let replies = engine.respond(CHAT, "x").await;
    assert!(last_text(&replies).contains("non valida"));

    engine.respond(CHAT, "p").await;
    let replies = engine.respond(CHAT, "Roma").await;
    assert_eq!(replies.len(), 1);
    assert!(replies[0].markdown);
    assert!(replies[0].text.contains("Roma"));

    engine.respond(CHAT, "/cerca").await;
    engine.respond(CHAT, "4").await;
    engine.respond(CHAT, "v").await;
    let replies = engine.respond(CHAT, "Roma").await;
    assert!(last_text(&replies).contains("Nessun viaggio"));
}

/// **Test: Deleting a driver through the dialogue cascades to its travels.**
#[tokio::test]
async fn test_delete_driver_cascades() {
    let (engine, store) = engine_with_store();
    let driver = seed_driver(&store, "Anna", 8).await;
    seed_travel(&store, "Roma", &driver.token, 3).await;

    engine.respond(CHAT, "/canc_guidatore").await;
    let replies = engine.respond(CHAT, &driver.id.to_string()).await;

    assert!(last_text(&replies).contains("cancellato"));
    assert!(store.driver_by_id(driver.id).await.is_none());
    assert!(store.list_travels().await.is_empty());
}

/// **Test: Modify re-collects every field but keeps id, token, and rating.**
#[tokio::test]
async fn test_modify_driver_flow() {
    let (engine, store) = engine_with_store();
    let driver = seed_driver(&store, "Anna", 6).await;

    engine.respond(CHAT, "/mod_guidatore").await;
    let replies = engine.respond(CHAT, &driver.id.to_string()).await;
    assert!(last_text(&replies).contains("Anna"));

    engine.respond(CHAT, "Annalisa").await;
    engine.respond(CHAT, "35").await;
    engine.respond(CHAT, "Tesla").await;
    engine.respond(CHAT, "s").await;

    let updated = store.driver_by_id(driver.id).await.unwrap();
    assert_eq!(updated.name, "Annalisa");
    assert_eq!(updated.age, 35);
    assert_eq!(updated.vehicle, "Tesla");
    assert_eq!(updated.rating, 6);
    assert_eq!(updated.token, driver.token);
}

/// **Test: An unrecognized confirmation token re-prompts; "S" then commits.**
#[tokio::test]
async fn test_confirm_reprompts_then_commits() {
    let (engine, store) = engine_with_store();

    engine.respond(CHAT, "/agg_guidatore").await;
    engine.respond(CHAT, "Mario").await;
    engine.respond(CHAT, "40").await;
    engine.respond(CHAT, "Fiat Panda").await;

    let replies = engine.respond(CHAT, "boh").await;
    assert!(last_text(&replies).contains("non valida"));
    assert!(store.list_drivers().await.is_empty());

    engine.respond(CHAT, "S").await;
    assert_eq!(store.list_drivers().await.len(), 1);
}

/// **Test: Travel dates must parse as GG-MM-AAAA and not lie in the past.**
#[tokio::test]
async fn test_travel_date_validation() {
    let (engine, store) = engine_with_store();
    seed_driver(&store, "Anna", 8).await;

    engine.respond(CHAT, "/agg_viaggio").await;
    engine.respond(CHAT, "Roma").await;

    for bad in ["31-02-2030", "2030-01-01", "01-01-2020", "domani"] {
        let replies = engine.respond(CHAT, bad).await;
        assert!(last_text(&replies).contains("Data non valida"));
    }

    let replies = engine.respond(CHAT, &future_date()).await;
    assert!(last_text(&replies).contains("ID del guidatore"));
}

/// **Test: Create a driver and a travel, then search for it.**
///
/// **Setup:** Empty store.
/// **Action:** Create driver "Mario" via dialogue; create a travel to Rome
/// (12.5 €, 3 seats) linked to him; search "Rome" min 2 by price, then min 4.
/// **Expected:** First search returns the travel card; second returns the
/// no-results message.
#[tokio::test]
async fn test_create_driver_and_travel_then_search() {
    let (engine, store) = engine_with_store();

    engine.respond(CHAT, "/agg_guidatore").await;
    engine.respond(CHAT, "Mario").await;
    engine.respond(CHAT, "40").await;
    engine.respond(CHAT, "Fiat Panda").await;
    engine.respond(CHAT, "s").await;
    let drivers = store.list_drivers().await;
    let mario = &drivers[0];
    assert_eq!(mario.rating, 0);

    engine.respond(CHAT, "/agg_viaggio").await;
    engine.respond(CHAT, "Rome").await;
    engine.respond(CHAT, &future_date()).await;
    engine.respond(CHAT, &mario.id.to_string()).await;
    engine.respond(CHAT, "12.50").await;
    let replies = engine.respond(CHAT, "3").await;
    assert!(replies[0].text.contains("Mario"));
    let replies = engine.respond(CHAT, "s").await;
    assert_eq!(last_text(&replies), "Ok");

    engine.respond(CHAT, "/cerca").await;
    engine.respond(CHAT, "2").await;
    engine.respond(CHAT, "p").await;
    let replies = engine.respond(CHAT, "Rome").await;
    assert_eq!(replies.len(), 1);
    assert!(replies[0].text.contains("12.50"));

    engine.respond(CHAT, "/cerca").await;
    engine.respond(CHAT, "4").await;
    engine.respond(CHAT, "p").await;
    let replies = engine.respond(CHAT, "Rome").await;
    assert!(last_text(&replies).contains("Nessun viaggio"));
}

/// **Test: Price must parse and be non-negative.**
#[tokio::test]
async fn test_price_validation() {
    let (engine, store) = engine_with_store();
    let driver = seed_driver(&store, "Anna", 8).await;

    engine.respond(CHAT, "/agg_viaggio").await;
    engine.respond(CHAT, "Roma").await;
    engine.respond(CHAT, &future_date()).await;
    engine.respond(CHAT, &driver.id.to_string()).await;

    for bad in ["-1", "gratis"] {
        let replies = engine.respond(CHAT, bad).await;
        assert!(last_text(&replies).contains("Prezzo non valido"));
    }

    let replies = engine.respond(CHAT, "9.90").await;
    assert!(last_text(&replies).contains("posti"));
}

/// **Test: Unrecognized idle input gets no reply.**
#[tokio::test]
async fn test_unknown_idle_input_is_silent() {
    let (engine, _store) = engine_with_store();
    let replies = engine.respond(CHAT, "ciao bot").await;
    assert!(replies.is_empty());
}

/// **Test: /start lists the command vocabulary.**
#[tokio::test]
async fn test_start_presentation() {
    let (engine, _store) = engine_with_store();
    let replies = engine.respond(CHAT, "/start").await;
    assert_eq!(replies.len(), 1);
    assert!(replies[0].text.contains("/agg_guidatore"));
    assert!(replies[0].text.contains("/annulla"));
}

/// **Test: Conversations are per chat; one chat's workflow never leaks.**
#[tokio::test]
async fn test_chats_are_independent() {
    let (engine, store) = engine_with_store();

    engine.respond(1, "/agg_guidatore").await;
    engine.respond(1, "Mario").await;

    // Chat 2 is still idle: free text is ignored, commands dispatch.
    assert!(engine.respond(2, "Luigi").await.is_empty());
    assert_eq!(engine.respond(2, "/ping").await[0].text, "Hey!");

    // Chat 1 continues where it left off.
    engine.respond(1, "40").await;
    engine.respond(1, "Kart").await;
    engine.respond(1, "s").await;
    assert_eq!(store.list_drivers().await[0].name, "Mario");
}

/// **Test: /miglior_guidatore returns every driver tied at the maximum.**
#[tokio::test]
async fn test_best_drivers_command() {
    let (engine, store) = engine_with_store();
    seed_driver(&store, "A", 7).await;
    seed_driver(&store, "B", 9).await;
    seed_driver(&store, "C", 9).await;
    seed_driver(&store, "D", 3).await;

    let replies = engine.respond(CHAT, "/miglior_guidatore").await;
    assert_eq!(replies.len(), 2);
    assert!(replies.iter().all(|r| r.text.contains("9/10")));
}
