//! The dialogue engine: a two-level state machine over (command, step).
//!
//! Each inbound line is validated against the current step. Valid input
//! advances the workflow or commits to the record store; invalid input
//! re-prompts in place without losing context; `/annulla` pre-empts every
//! state. No input is a hard error: the worst outcome of a bad message is a
//! re-prompt within the same conversation.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use ridebot_core::{Handler, HandlerResponse, Message, OutboundMessage};
use ridebot_store::{Driver, RecordStore, SortOrder, StoreError, Travel};
use tracing::{debug, info, instrument, warn};

use crate::commands;
use crate::render;
use crate::session::{Command, Conversation, Sessions, Step};
use crate::texts;

pub struct DialogueEngine {
    store: Arc<RecordStore>,
    sessions: Sessions,
}

impl DialogueEngine {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self {
            store,
            sessions: Sessions::new(),
        }
    }

    /// Handles one line of text from a chat and returns the replies, in
    /// order. Holding the conversation lock for the whole call serializes
    /// messages from the same chat.
    #[instrument(skip(self, text))]
    pub async fn respond(&self, chat_id: i64, text: &str) -> Vec<OutboundMessage> {
        let session = self.sessions.get_or_create(chat_id).await;
        let mut convo = session.lock().await;
        let text = text.trim();

        // Universal cancel, checked before any per-state dispatch.
        if text == commands::CANCEL {
            info!(
                chat_id,
                command = ?convo.command,
                step = ?convo.step,
                "Dialogue cancelled"
            );
            convo.reset();
            return vec![OutboundMessage::plain(texts::CANCELLED)];
        }

        debug!(
            chat_id,
            command = ?convo.command,
            step = ?convo.step,
            "step: dispatching input"
        );

        match convo.step {
            Step::Idle => self.dispatch_command(&mut convo, chat_id, text).await,
            Step::SelectDriver => self.select_driver(&mut convo, text).await,
            Step::SelectTravel => self.select_travel(&mut convo, text).await,
            Step::Rating => self.collect_rating(&mut convo, text).await,
            Step::Name => self.collect_name(&mut convo, text),
            Step::Age => self.collect_age(&mut convo, text),
            Step::Vehicle => self.collect_vehicle(&mut convo, text),
            Step::Destination => self.collect_destination(&mut convo, text),
            Step::Date => self.collect_date(&mut convo, text).await,
            Step::DriverId => self.collect_driver_id(&mut convo, text).await,
            Step::Price => self.collect_price(&mut convo, text),
            Step::Seats => self.collect_seats(&mut convo, text).await,
            Step::SortOrder => self.select_sort_order(&mut convo, text),
            Step::Query => self.run_search(&mut convo, text).await,
            Step::Confirm => self.confirm(&mut convo, text).await,
        }
    }

    // --- Idle dispatch ---

    async fn dispatch_command(
        &self,
        convo: &mut Conversation,
        chat_id: i64,
        text: &str,
    ) -> Vec<OutboundMessage> {
        match text {
            commands::PING => vec![OutboundMessage::plain(texts::PONG)],
            commands::START => vec![OutboundMessage::plain(texts::presentation())],
            commands::LIST_DRIVERS => self.render_drivers().await,
            commands::BEST_DRIVERS => {
                let best = self.store.best_rated_drivers().await;
                best.iter().map(render::driver_card).collect()
            }
            commands::LIST_TRAVELS => self.render_travels().await,
            commands::RATE_DRIVER => {
                self.start_driver_selection(convo, Command::RateDriver, texts::ASK_DRIVER_ID_RATE)
                    .await
            }
            commands::MODIFY_DRIVER => {
                self.start_driver_selection(
                    convo,
                    Command::ModifyDriver,
                    texts::ASK_DRIVER_ID_MODIFY,
                )
                .await
            }
            commands::DELETE_DRIVER => {
                self.start_driver_selection(
                    convo,
                    Command::DeleteDriver,
                    texts::ASK_DRIVER_ID_DELETE,
                )
                .await
            }
            commands::BOOK_TRAVEL => {
                self.start_travel_selection(convo, Command::BookTravel, texts::ASK_TRAVEL_ID_BOOK)
                    .await
            }
            commands::MODIFY_TRAVEL => {
                self.start_travel_selection(
                    convo,
                    Command::ModifyTravel,
                    texts::ASK_TRAVEL_ID_MODIFY,
                )
                .await
            }
            commands::DELETE_TRAVEL => {
                self.start_travel_selection(
                    convo,
                    Command::DeleteTravel,
                    texts::ASK_TRAVEL_ID_DELETE,
                )
                .await
            }
            commands::ADD_DRIVER => {
                convo.command = Command::AddDriver;
                convo.step = Step::Name;
                convo.draft_driver = Some(Driver::draft());
                info!(chat_id, "step: add-driver workflow started");
                vec![OutboundMessage::plain(texts::ASK_NAME)]
            }
            commands::ADD_TRAVEL => {
                convo.command = Command::AddTravel;
                convo.step = Step::Destination;
                convo.draft_travel = Some(Travel::draft());
                info!(chat_id, "step: add-travel workflow started");
                vec![OutboundMessage::plain(texts::ASK_DESTINATION)]
            }
            commands::SEARCH_TRAVELS => {
                convo.command = Command::SearchTravels;
                convo.step = Step::Seats;
                let mut replies = self.render_travels().await;
                replies.push(OutboundMessage::plain(texts::ASK_SEATS_SEARCH));
                replies
            }
            _ => {
                debug!(chat_id, "Unrecognized idle input ignored");
                Vec::new()
            }
        }
    }

    /// Starts a workflow whose first step is picking a driver id: shows the
    /// current listing so the user can see valid ids, then prompts.
    async fn start_driver_selection(
        &self,
        convo: &mut Conversation,
        command: Command,
        prompt: &str,
    ) -> Vec<OutboundMessage> {
        convo.command = command;
        convo.step = Step::SelectDriver;
        let mut replies = self.render_drivers().await;
        replies.push(OutboundMessage::plain(prompt));
        replies
    }

    async fn start_travel_selection(
        &self,
        convo: &mut Conversation,
        command: Command,
        prompt: &str,
    ) -> Vec<OutboundMessage> {
        convo.command = command;
        convo.step = Step::SelectTravel;
        let mut replies = self.render_travels().await;
        replies.push(OutboundMessage::plain(prompt));
        replies
    }

    // --- Selection steps ---

    async fn select_driver(&self, convo: &mut Conversation, text: &str) -> Vec<OutboundMessage> {
        let driver = match parse_id(text) {
            Some(id) => self.store.driver_by_id(id).await,
            None => None,
        };
        let Some(driver) = driver else {
            return vec![OutboundMessage::plain(texts::BAD_DRIVER_ID)];
        };

        match convo.command {
            Command::RateDriver => {
                let prompt = texts::ask_rating(&driver.name);
                convo.draft_driver = Some(driver);
                convo.step = Step::Rating;
                vec![OutboundMessage::plain(prompt)]
            }
            Command::ModifyDriver => {
                let prompt = texts::ask_new_name(&driver.name);
                convo.draft_driver = Some(driver);
                convo.step = Step::Name;
                vec![OutboundMessage::plain(prompt)]
            }
            Command::DeleteDriver => {
                self.store.delete_driver(driver.id).await;
                convo.reset();
                vec![OutboundMessage::plain(texts::DRIVER_DELETED)]
            }
            _ => self.broken_state(convo),
        }
    }

    async fn select_travel(&self, convo: &mut Conversation, text: &str) -> Vec<OutboundMessage> {
        let travel = match parse_id(text) {
            Some(id) => self.store.travel_by_id(id).await,
            None => None,
        };
        let Some(travel) = travel else {
            return vec![OutboundMessage::plain(texts::BAD_TRAVEL_ID)];
        };

        match convo.command {
            Command::BookTravel => {
                convo.draft_travel = Some(travel);
                convo.step = Step::Seats;
                vec![OutboundMessage::plain(texts::ASK_SEATS_BOOK)]
            }
            Command::ModifyTravel => {
                convo.draft_travel = Some(travel);
                convo.step = Step::Destination;
                vec![OutboundMessage::plain(texts::ASK_DESTINATION)]
            }
            Command::DeleteTravel => {
                self.store.delete_travel(travel.id).await;
                convo.reset();
                vec![OutboundMessage::plain(texts::TRAVEL_DELETED)]
            }
            _ => self.broken_state(convo),
        }
    }

    // --- Driver fields ---

    async fn collect_rating(&self, convo: &mut Conversation, text: &str) -> Vec<OutboundMessage> {
        let Some(target) = convo.draft_driver.as_ref() else {
            return self.broken_state(convo);
        };

        let rating = text.parse::<i64>().ok().filter(|r| (1..=10).contains(r));
        let Some(rating) = rating else {
            return vec![OutboundMessage::plain(texts::bad_rating(&target.name))];
        };

        // The one field committed without a confirmation step.
        let result = self.store.rate_driver(target.id, rating).await;
        convo.reset();
        match result {
            Ok(_) => vec![OutboundMessage::plain(texts::RATING_SAVED)],
            // Driver deleted by another chat mid-flow; nothing left to rate.
            Err(_) => vec![OutboundMessage::plain(texts::BAD_DRIVER_ID)],
        }
    }

    fn collect_name(&self, convo: &mut Conversation, text: &str) -> Vec<OutboundMessage> {
        let Some(draft) = convo.draft_driver.as_mut() else {
            return self.broken_state(convo);
        };
        if text.is_empty() {
            return vec![OutboundMessage::plain(texts::ASK_NAME)];
        }

        draft.name = text.to_string();
        convo.step = Step::Age;
        vec![OutboundMessage::plain(texts::ask_age(&draft.name))]
    }

    fn collect_age(&self, convo: &mut Conversation, text: &str) -> Vec<OutboundMessage> {
        let Some(draft) = convo.draft_driver.as_mut() else {
            return self.broken_state(convo);
        };

        let age = text.parse::<i64>().ok().filter(|a| *a > 0);
        let Some(age) = age else {
            return vec![OutboundMessage::plain(texts::bad_age(&draft.name))];
        };

        draft.age = age;
        convo.step = Step::Vehicle;
        vec![OutboundMessage::plain(texts::ask_vehicle(&draft.name))]
    }

    fn collect_vehicle(&self, convo: &mut Conversation, text: &str) -> Vec<OutboundMessage> {
        let Some(draft) = convo.draft_driver.as_mut() else {
            return self.broken_state(convo);
        };
        if text.is_empty() {
            return vec![OutboundMessage::plain(texts::ask_vehicle(&draft.name))];
        }

        draft.vehicle = text.to_string();
        convo.step = Step::Confirm;
        vec![
            render::driver_preview(draft),
            OutboundMessage::plain(texts::CONFIRM),
        ]
    }

    // --- Travel fields ---

    fn collect_destination(&self, convo: &mut Conversation, text: &str) -> Vec<OutboundMessage> {
        let Some(draft) = convo.draft_travel.as_mut() else {
            return self.broken_state(convo);
        };
        if text.is_empty() {
            return vec![OutboundMessage::plain(texts::ASK_DESTINATION)];
        }

        draft.destination = text.to_string();
        convo.step = Step::Date;
        vec![OutboundMessage::plain(texts::ASK_DATE)]
    }

    async fn collect_date(&self, convo: &mut Conversation, text: &str) -> Vec<OutboundMessage> {
        let Some(draft) = convo.draft_travel.as_mut() else {
            return self.broken_state(convo);
        };

        let today = Local::now().date_naive();
        let date = NaiveDate::parse_from_str(text, render::DATE_FORMAT)
            .ok()
            .filter(|d| *d >= today);
        let Some(date) = date else {
            return vec![OutboundMessage::plain(texts::BAD_DATE)];
        };

        draft.date = date;
        convo.step = Step::DriverId;
        let mut replies = self.render_drivers().await;
        replies.push(OutboundMessage::plain(texts::ASK_TRAVEL_DRIVER_ID));
        replies
    }

    async fn collect_driver_id(
        &self,
        convo: &mut Conversation,
        text: &str,
    ) -> Vec<OutboundMessage> {
        let driver = match parse_id(text) {
            Some(id) => self.store.driver_by_id(id).await,
            None => None,
        };
        let Some(driver) = driver else {
            return vec![OutboundMessage::plain(texts::BAD_DRIVER_ID)];
        };

        let Some(draft) = convo.draft_travel.as_mut() else {
            return self.broken_state(convo);
        };
        draft.driver_token = driver.token;
        convo.step = Step::Price;
        vec![OutboundMessage::plain(texts::ASK_PRICE)]
    }

    fn collect_price(&self, convo: &mut Conversation, text: &str) -> Vec<OutboundMessage> {
        let Some(draft) = convo.draft_travel.as_mut() else {
            return self.broken_state(convo);
        };

        let price = text.parse::<f64>().ok().filter(|p| *p >= 0.0);
        let Some(price) = price else {
            return vec![OutboundMessage::plain(texts::BAD_PRICE)];
        };

        draft.price = price;
        convo.step = Step::Seats;
        vec![OutboundMessage::plain(texts::ASK_SEATS)]
    }

    async fn collect_seats(&self, convo: &mut Conversation, text: &str) -> Vec<OutboundMessage> {
        let seats = text.parse::<i64>().ok().filter(|s| *s >= 1);
        let Some(seats) = seats else {
            return vec![OutboundMessage::plain(texts::BAD_SEATS)];
        };

        match convo.command {
            Command::AddTravel | Command::ModifyTravel => {
                let Some(draft) = convo.draft_travel.as_mut() else {
                    return self.broken_state(convo);
                };
                draft.seats = seats;
                let preview = draft.clone();

                let Some(driver) = self.store.driver_by_token(&preview.driver_token).await else {
                    // Driver vanished since the id was collected.
                    convo.reset();
                    return vec![OutboundMessage::plain(texts::BAD_DRIVER_ID)];
                };

                convo.step = Step::Confirm;
                vec![
                    render::travel_preview(&preview, &driver.name),
                    OutboundMessage::plain(texts::CONFIRM),
                ]
            }
            Command::BookTravel => {
                let Some(target) = convo.draft_travel.as_ref() else {
                    return self.broken_state(convo);
                };

                if seats > target.seats {
                    return vec![OutboundMessage::plain(texts::NOT_ENOUGH_SEATS)];
                }

                convo.pending_seats = seats;
                convo.step = Step::Confirm;
                vec![
                    render::booking_preview(&target.destination, seats),
                    OutboundMessage::plain(texts::CONFIRM),
                ]
            }
            Command::SearchTravels => {
                convo.pending_seats = seats;
                convo.step = Step::SortOrder;
                vec![OutboundMessage::plain(texts::ASK_SORT_ORDER)]
            }
            _ => self.broken_state(convo),
        }
    }

    // --- Search ---

    fn select_sort_order(&self, convo: &mut Conversation, text: &str) -> Vec<OutboundMessage> {
        match text.chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('p') => convo.sort_order = SortOrder::Price,
            Some('v') => convo.sort_order = SortOrder::Rating,
            _ => return vec![OutboundMessage::plain(texts::BAD_SORT_ORDER)],
        }

        convo.step = Step::Query;
        vec![OutboundMessage::plain(texts::ASK_QUERY)]
    }

    async fn run_search(&self, convo: &mut Conversation, text: &str) -> Vec<OutboundMessage> {
        let results = self
            .store
            .search(text, convo.pending_seats, convo.sort_order)
            .await;

        info!(
            query = %text,
            min_seats = convo.pending_seats,
            results = results.len(),
            "Travel search executed"
        );
        convo.reset();

        if results.is_empty() {
            return vec![OutboundMessage::plain(texts::NO_TRAVELS_FOUND)];
        }
        results
            .iter()
            .map(|(travel, driver)| render::travel_card(travel, driver))
            .collect()
    }

    // --- Confirmation ---

    async fn confirm(&self, convo: &mut Conversation, text: &str) -> Vec<OutboundMessage> {
        match text.chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('s') => self.commit(convo).await,
            Some('n') => {
                convo.reset();
                vec![OutboundMessage::plain(texts::REJECTED)]
            }
            _ => vec![OutboundMessage::plain(texts::BAD_CONFIRM)],
        }
    }

    /// Applies the pending effect of the active command, echoes the updated
    /// listing, and returns to idle.
    async fn commit(&self, convo: &mut Conversation) -> Vec<OutboundMessage> {
        let command = convo.command;
        let replies = match command {
            Command::AddDriver => {
                let Some(draft) = convo.draft_driver.take() else {
                    return self.broken_state(convo);
                };
                let added = self.store.add_driver(draft).await;
                info!(driver_id = added.id, "step: add-driver committed");
                self.render_drivers().await
            }
            Command::ModifyDriver => {
                let Some(draft) = convo.draft_driver.take() else {
                    return self.broken_state(convo);
                };
                match self.store.update_driver(draft).await {
                    Ok(_) => self.render_drivers().await,
                    Err(_) => {
                        convo.reset();
                        return vec![OutboundMessage::plain(texts::BAD_DRIVER_ID)];
                    }
                }
            }
            Command::AddTravel => {
                let Some(draft) = convo.draft_travel.take() else {
                    return self.broken_state(convo);
                };
                let added = self.store.add_travel(draft).await;
                info!(travel_id = added.id, "step: add-travel committed");
                self.render_travels().await
            }
            Command::ModifyTravel => {
                let Some(draft) = convo.draft_travel.take() else {
                    return self.broken_state(convo);
                };
                match self.store.update_travel(draft).await {
                    Ok(_) => self.render_travels().await,
                    Err(_) => {
                        convo.reset();
                        return vec![OutboundMessage::plain(texts::BAD_TRAVEL_ID)];
                    }
                }
            }
            Command::BookTravel => {
                let Some(target) = convo.draft_travel.take() else {
                    return self.broken_state(convo);
                };
                match self.store.book_seats(target.id, convo.pending_seats).await {
                    Ok(_) => self.render_travels().await,
                    Err(StoreError::InsufficientSeats { .. }) => {
                        // Another chat took the seats between prompt and confirm.
                        convo.reset();
                        return vec![OutboundMessage::plain(texts::BOOKING_LOST)];
                    }
                    Err(_) => {
                        convo.reset();
                        return vec![OutboundMessage::plain(texts::BAD_TRAVEL_ID)];
                    }
                }
            }
            _ => return self.broken_state(convo),
        };

        convo.reset();
        let mut replies = replies;
        replies.push(OutboundMessage::plain(texts::COMMITTED));
        replies
    }

    // --- Rendering helpers ---

    async fn render_drivers(&self) -> Vec<OutboundMessage> {
        self.store
            .list_drivers()
            .await
            .iter()
            .map(render::driver_card)
            .collect()
    }

    async fn render_travels(&self) -> Vec<OutboundMessage> {
        self.store
            .list_travels_joined()
            .await
            .iter()
            .map(|(travel, driver)| render::travel_card(travel, driver))
            .collect()
    }

    /// A step that presumes a draft found none: the state machine can only
    /// get here through a bug, so log it and recover by resetting.
    fn broken_state(&self, convo: &mut Conversation) -> Vec<OutboundMessage> {
        warn!(
            command = ?convo.command,
            step = ?convo.step,
            "Conversation in inconsistent state, resetting"
        );
        convo.reset();
        Vec::new()
    }
}

fn parse_id(text: &str) -> Option<i64> {
    text.parse().ok()
}

#[async_trait]
impl Handler for DialogueEngine {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> ridebot_core::Result<HandlerResponse> {
        let replies = self.respond(message.chat_id, &message.text).await;
        if replies.is_empty() {
            Ok(HandlerResponse::Stop)
        } else {
            Ok(HandlerResponse::Replies(replies))
        }
    }
}
