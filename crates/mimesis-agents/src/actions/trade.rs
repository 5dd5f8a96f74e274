//! Selling goods to a buyer.
//!
//! The seller hands over their most recently added carried item and the
//! buyer pays its value in gold. A sale only happens if the buyer is alive,
//! has room, and can afford the price; otherwise nothing moves and the
//! seller logs the refusal.

use mimesis_types::EpisodeKind;
use tracing::debug;

use crate::agent::Agent;

/// Why a sale did not happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeRefusal {
    /// The seller carries nothing.
    NothingToSell,
    /// The buyer is dead.
    BuyerGone,
    /// The buyer's pack is full.
    BuyerFull,
    /// The buyer cannot pay.
    BuyerBroke,
}

/// How a sale attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TradeOutcome {
    /// The item and gold changed hands.
    Sold {
        /// Item name.
        item: String,
        /// Gold paid.
        price: u32,
    },
    /// Nothing moved.
    Refused(TradeRefusal),
}

/// Sell the seller's newest carried item to `buyer`.
pub fn sell(seller: &mut Agent, buyer: &mut Agent, tick: u64) -> TradeOutcome {
    let outcome = match check(seller, buyer) {
        Err(refusal) => TradeOutcome::Refused(refusal),
        Ok(price) => match seller.inventory.pop_newest() {
            Some(item) if buyer.inventory.spend_gold(price) => {
                let name = item.name().to_owned();
                match buyer.inventory.try_add(item) {
                    Ok(()) => {
                        seller.inventory.add_gold(price);
                        TradeOutcome::Sold { item: name, price }
                    }
                    Err(item) => {
                        buyer.inventory.add_gold(price);
                        seller.inventory.add(item);
                        TradeOutcome::Refused(TradeRefusal::BuyerFull)
                    }
                }
            }
            Some(item) => {
                seller.inventory.add(item);
                TradeOutcome::Refused(TradeRefusal::BuyerBroke)
            }
            None => TradeOutcome::Refused(TradeRefusal::NothingToSell),
        },
    };

    match &outcome {
        TradeOutcome::Sold { item, price } => {
            seller.log_event(tick, EpisodeKind::Trade, format!("Sold {item}"), 2.0);
            buyer.log_event(
                tick,
                EpisodeKind::Trade,
                format!("Bought {item} from {} for {price} gold.", seller.name),
                1.0,
            );
        }
        TradeOutcome::Refused(refusal) => {
            let line = match refusal {
                TradeRefusal::NothingToSell => String::from("Nothing to sell."),
                TradeRefusal::BuyerGone => format!("{} is gone.", buyer.name),
                TradeRefusal::BuyerFull => format!("{} has no room.", buyer.name),
                TradeRefusal::BuyerBroke => format!("{} cannot pay.", buyer.name),
            };
            seller.log_event(tick, EpisodeKind::Failure, line, -1.0);
        }
    }

    debug!(tick, seller = %seller.id, buyer = %buyer.id, ?outcome, "trade resolved");
    outcome
}

fn check(seller: &Agent, buyer: &Agent) -> Result<u32, TradeRefusal> {
    let item = seller.inventory.newest().ok_or(TradeRefusal::NothingToSell)?;
    if !buyer.alive {
        return Err(TradeRefusal::BuyerGone);
    }
    if buyer.inventory.gold() < item.value() {
        return Err(TradeRefusal::BuyerBroke);
    }
    Ok(item.value())
}
