//! User-facing texts (Italian). Kept in one module so the dialogue logic
//! never embeds literal prose.

use crate::commands;

pub const PONG: &str = "Hey!";
pub const CANCELLED: &str = "Azione annullata 👍🏻";
pub const REJECTED: &str = "Azione annullata ❌";
pub const COMMITTED: &str = "Ok";
pub const CONFIRM: &str = "Confermi? [S/N]";
pub const BAD_CONFIRM: &str =
    "Risposta non valida 😓, scrivi 's' per confermare o 'n' per annullare";

pub const ASK_DRIVER_ID_RATE: &str = "Scrivimi l'ID del guidatore che vuoi valutare";
pub const ASK_DRIVER_ID_MODIFY: &str = "Scrivimi l'ID del guidatore che vuoi modificare";
pub const ASK_DRIVER_ID_DELETE: &str = "Scrivimi l'ID del guidatore che vuoi cancellare";
pub const BAD_DRIVER_ID: &str = "ID incorretto.\n💡 Scrivi solo l'ID del guidatore";
pub const DRIVER_DELETED: &str = "Guidatore cancellato 👍🏻";
pub const RATING_SAVED: &str = "Grazie per il tuo feedback! 😁";

pub const ASK_TRAVEL_ID_BOOK: &str = "Scrivimi l'ID del viaggio che vuoi prenotare";
pub const ASK_TRAVEL_ID_MODIFY: &str = "Scrivimi l'ID del viaggio che vuoi modificare";
pub const ASK_TRAVEL_ID_DELETE: &str = "Scrivimi l'ID del viaggio che vuoi cancellare";
pub const BAD_TRAVEL_ID: &str = "ID incorretto.\n💡 Scrivi solo l'ID del viaggio";
pub const TRAVEL_DELETED: &str = "Viaggio cancellato 👍🏻";

pub const ASK_NAME: &str = "Scrivimi il nome del guidatore che vuoi aggiungere";
pub const ASK_DESTINATION: &str = "Scrivimi la destinazione del viaggio";
pub const ASK_DATE: &str = "Inviami la data del viaggio nel formato GG-MM-AAAA";
pub const BAD_DATE: &str = "Data non valida, inviami una data valida";
pub const ASK_TRAVEL_DRIVER_ID: &str = "Inviami l'ID del guidatore collegato al viaggio";
pub const ASK_PRICE: &str = "Inviami il prezzo del viaggio";
pub const BAD_PRICE: &str = "Prezzo non valido 😓, inviami il prezzo del viaggio";
pub const ASK_SEATS: &str = "Inviami il numero di posti disponibili nel veicolo";
pub const BAD_SEATS: &str = "Numero posti non valido 😓, inviami un numero valido di posti";
pub const ASK_SEATS_BOOK: &str = "Quanti posti vuoi prenotare?";
pub const ASK_SEATS_SEARCH: &str = "Quanti posti disponibili vuoi cercare?";
pub const NOT_ENOUGH_SEATS: &str = "Numero di posti disponibili insufficiente 😓\nInviami i posti da prenotare oppure /annulla per annullare l'azione corrente.";
pub const BOOKING_LOST: &str =
    "Posti non più disponibili 😓, la prenotazione non è andata a buon fine.";
pub const ASK_SORT_ORDER: &str =
    "Vuoi ordinare la lista per prezzo o valutazione del guidatore? [P/V]";
pub const BAD_SORT_ORDER: &str = "Risposta non valida 😓, scrivi 'P' per ordinare i viaggi per prezzo, 'V' per ordinarli in base alla valutazione del guidatore";
pub const ASK_QUERY: &str = "Scrivimi il nome della località da cercare";
pub const NO_TRAVELS_FOUND: &str = "Nessun viaggio trovato.\nProva con criteri diversi 😅";

pub fn ask_rating(name: &str) -> String {
    format!("Scrivi la valutazione da dare a {name}, da 1 a 10")
}

pub fn bad_rating(name: &str) -> String {
    format!("Valutazione incorretta.\n💡 Scrivi la valutazione da dare a {name}, da 1 a 10")
}

pub fn ask_new_name(name: &str) -> String {
    format!("Scrivi il nuovo nome di {name}")
}

pub fn ask_age(name: &str) -> String {
    format!("Inviami l'età di {name} scrivendo solo il numero degli anni")
}

pub fn bad_age(name: &str) -> String {
    format!("Età incorretta.\n💡 Scrivi l'età di {name} mandando solo il numero degli anni")
}

pub fn ask_vehicle(name: &str) -> String {
    format!("Inviami il tipo di veicolo guidato da {name}")
}

/// Help message listing the whole command vocabulary.
pub fn presentation() -> String {
    format!(
        "RideBot\nLa tua spalla durante tutti i tuoi viaggi.\n\nLista dei comandi del bot:\n\n\
{list_drivers} - visualizza l'elenco dei guidatori\n\
{best_drivers} - visualizza i guidatori col punteggio più alto\n\
{list_travels} - visualizza l'elenco dei viaggi\n\
{rate} - valuta un guidatore\n\
{search} - cerca tra i viaggi disponibili\n\
{book} - prenota un viaggio tra quelli disponibili\n\
{add_driver} - aggiunge un guidatore\n\
{mod_driver} - modifica un guidatore\n\
{del_driver} - cancella un guidatore\n\
{add_travel} - aggiunge un viaggio\n\
{mod_travel} - modifica un viaggio\n\
{del_travel} - cancella un viaggio\n\
{cancel} - annulla l'azione corrente",
        list_drivers = commands::LIST_DRIVERS,
        best_drivers = commands::BEST_DRIVERS,
        list_travels = commands::LIST_TRAVELS,
        rate = commands::RATE_DRIVER,
        search = commands::SEARCH_TRAVELS,
        book = commands::BOOK_TRAVEL,
        add_driver = commands::ADD_DRIVER,
        mod_driver = commands::MODIFY_DRIVER,
        del_driver = commands::DELETE_DRIVER,
        add_travel = commands::ADD_TRAVEL,
        mod_travel = commands::MODIFY_TRAVEL,
        del_travel = commands::DELETE_TRAVEL,
        cancel = commands::CANCEL,
    )
}
