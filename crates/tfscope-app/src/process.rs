//! Message processing
//!
//! Runs a message through the TEA update function, following up chained
//! messages, and collects the actions the event loop must perform.

use crate::handler::{self, UpdateAction};
use crate::message::Message;
use crate::state::AppState;

/// Process a message and every follow-up it produces
pub fn process_message(state: &mut AppState, message: Message) -> Vec<UpdateAction> {
    let mut actions = Vec::new();
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);
        if let Some(action) = result.action {
            actions.push(action);
        }
        msg = result.message;
    }
    actions
}
