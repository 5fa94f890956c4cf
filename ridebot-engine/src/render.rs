//! Markdown cards for drivers and travels, plus the pre-confirmation
//! previews shown before a commit.

use ridebot_core::OutboundMessage;
use ridebot_store::{Driver, Travel};

/// Date format shown to users and accepted as input (GG-MM-AAAA).
pub const DATE_FORMAT: &str = "%d-%m-%Y";

pub fn driver_card(driver: &Driver) -> OutboundMessage {
    OutboundMessage::markdown(format!(
        "*ID*: {}\n*Nome*: {}\n*Età*: {}\n*Veicolo*: {}\n*Valutazione*: {}/10",
        driver.id, driver.name, driver.age, driver.vehicle, driver.rating
    ))
}

pub fn travel_card(travel: &Travel, driver: &Driver) -> OutboundMessage {
    OutboundMessage::markdown(format!(
        "*ID*: {}\n*Destinazione*: {}\n*Data*: {}\n*Guidatore*: {}\n*Valutazione*: {}/10\n*Prezzo*: {:.2} €\n*Posti*: {}",
        travel.id,
        travel.destination,
        travel.date.format(DATE_FORMAT),
        driver.name,
        driver.rating,
        travel.price,
        travel.seats
    ))
}

/// Recap of a draft driver before the confirm step; no id or rating yet.
pub fn driver_preview(draft: &Driver) -> OutboundMessage {
    OutboundMessage::markdown(format!(
        "*Nome*: {}\n*Età*: {}\n*Veicolo*: {}",
        draft.name, draft.age, draft.vehicle
    ))
}

/// Recap of a draft travel before the confirm step.
pub fn travel_preview(draft: &Travel, driver_name: &str) -> OutboundMessage {
    OutboundMessage::markdown(format!(
        "*Destinazione*: {}\n*Data*: {}\n*Guidatore*: {}\n*Prezzo*: {:.2} €\n*Posti*: {}",
        draft.destination,
        draft.date.format(DATE_FORMAT),
        driver_name,
        draft.price,
        draft.seats
    ))
}

/// Recap of a booking before the confirm step.
pub fn booking_preview(destination: &str, seats: i64) -> OutboundMessage {
    OutboundMessage::markdown(format!(
        "*Destinazione*: {destination}\n*Posti da prenotare*: {seats}"
    ))
}
