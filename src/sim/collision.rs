//! Collision detection and outcome resolution
//!
//! Plain rectangle overlap between the player's body and every live entity,
//! no swept tests. Outcomes are applied in priority order: obstacles
//! (shielded, then lethal), coins, power-ups. A lethal hit stops resolution
//! so nothing else is credited on the frame the player dies.

use super::entity::{CollectibleKind, ObstacleKind, PowerUpKind};
use super::player::Player;
use super::state::SimulationState;
use crate::geometry::{Aabb, ContactSide};

/// Overlap found by the detection pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    Obstacle { id: u32 },
    Coin { id: u32 },
    PowerUp { id: u32, kind: PowerUpKind },
}

/// What resolving a contact did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    ShieldAbsorbed { id: u32, kind: ObstacleKind },
    Lethal { id: u32, kind: ObstacleKind, side: ContactSide },
    CoinCollected { id: u32 },
    PowerUpCollected { id: u32, kind: PowerUpKind },
}

/// All overlaps with the player body, obstacles first, then collectibles
pub fn detect(state: &SimulationState, body: &Aabb) -> Vec<Contact> {
    let mut contacts: Vec<Contact> = state
        .obstacles
        .obstacles
        .iter()
        .filter(|o| o.alive && o.bounds().overlaps(body))
        .map(|o| Contact::Obstacle { id: o.id })
        .collect();

    let collectibles = &state.collectibles;
    for c in collectibles.coins.iter().chain(collectibles.power_ups.iter()) {
        if !c.alive || !c.bounds().overlaps(body) {
            continue;
        }
        contacts.push(match c.kind {
            CollectibleKind::Coin => Contact::Coin { id: c.id },
            CollectibleKind::PowerUp(kind) => Contact::PowerUp { id: c.id, kind },
        });
    }

    contacts
}

/// Apply every contact this tick. Destroyed entities leave their pool
/// immediately, so a second contact with the same id resolves to nothing.
pub fn resolve(state: &mut SimulationState) -> Vec<CollisionOutcome> {
    if state.player.is_dead() {
        return Vec::new();
    }

    let body = state.player.bounds();
    let contacts = detect(state, &body);
    let mut outcomes = Vec::with_capacity(contacts.len());

    for contact in contacts {
        match contact {
            Contact::Obstacle { id } => {
                let Some(obstacle) = state.obstacles.obstacles.iter().find(|o| o.id == id && o.alive)
                else {
                    continue;
                };
                let kind = obstacle.kind;
                let side = body.contact_side(&obstacle.bounds()).unwrap_or(ContactSide::Left);

                if state.player.shielded {
                    state.player.remove_shield();
                    state.obstacles.destroy(id);
                    outcomes.push(CollisionOutcome::ShieldAbsorbed { id, kind });
                } else {
                    state.player.die(&state.config.player);
                    outcomes.push(CollisionOutcome::Lethal { id, kind, side });
                    break;
                }
            }
            Contact::Coin { id } => {
                if state.collectibles.destroy(id).is_some() {
                    state.score.add_coins(1);
                    outcomes.push(CollisionOutcome::CoinCollected { id });
                }
            }
            Contact::PowerUp { id, kind } => {
                if state.collectibles.destroy(id).is_some() {
                    state
                        .effects
                        .activate(kind, &mut state.player, &mut state.speed);
                    outcomes.push(CollisionOutcome::PowerUpCollected { id, kind });
                }
            }
        }
    }

    outcomes
}

/// Ground contact after being airborne. Returns true on the landing tick.
pub fn resolve_ground_contact(player: &mut Player) -> bool {
    if player.is_airborne() && player.touches_ground() {
        player.land();
        return true;
    }
    false
}
