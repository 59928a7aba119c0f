//! AI decision-making and behavior systems.
//!
//! Every enemy runs the same three-state machine (idle, chasing, attacking).
//! Archetype behaviors layer on top of it: kiters back off before it runs,
//! dashers and teleporters close the gap on their own timers, regenerators
//! heal on a timer, and hovering archetypes bob after everything else.

use glam::Vec2;
use hecs::World;

use crate::components::{AIState, Body, Enemy, Vitals};
use crate::constants::*;
use crate::events::{EventQueue, GameEvent};
use crate::grid::Grid;
use crate::player::Player;
use crate::spawning::Behavior;
use crate::systems::movement::move_body;

/// What the state machine wants the enemy to do this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiAction {
    Wait,
    Advance,
    Strike,
}

/// Advance the state machine one step.
///
/// Leaving the chase requires the target to be past `1.5 × aggro`, so an
/// enemy that just acquired its target does not flicker back to idle at the
/// edge of its aggro radius.
pub fn update_state_machine(
    state: AIState,
    distance: f32,
    aggro_range: f32,
    attack_range: f32,
    cooldown_ready: bool,
) -> (AIState, AiAction) {
    match state {
        AIState::Idle => {
            if distance <= aggro_range {
                (AIState::Chasing, AiAction::Wait)
            } else {
                (AIState::Idle, AiAction::Wait)
            }
        }
        AIState::Chasing => {
            if distance <= attack_range && cooldown_ready {
                (AIState::Attacking, AiAction::Strike)
            } else if distance > aggro_range * AGGRO_LEASH_FACTOR {
                (AIState::Idle, AiAction::Wait)
            } else {
                (AIState::Chasing, AiAction::Advance)
            }
        }
        AIState::Attacking => {
            if distance > attack_range {
                (AIState::Chasing, AiAction::Wait)
            } else if cooldown_ready {
                (AIState::Attacking, AiAction::Strike)
            } else {
                (AIState::Attacking, AiAction::Wait)
            }
        }
    }
}

/// Run one frame of AI for every live enemy.
///
/// Movement produced by the AI is resolved against the floor afterwards, so a
/// dash or teleport that would end inside a wall is cancelled outright.
/// Strikes land on the player immediately and are reported as `PlayerHurt`.
pub fn update_enemies(world: &mut World, grid: &Grid, player: &mut Player, dt: f32, events: &mut EventQueue) {
    puffin::profile_function!();

    for (_, (body, vitals, enemy)) in world.query_mut::<(&mut Body, &mut Vitals, &mut Enemy)>() {
        if !vitals.is_alive() {
            continue;
        }

        let start = body.position;
        let target = enemy
            .target
            .filter(|_| player.is_alive())
            .map(|_| player.position());

        let strike = update_enemy(enemy, body, vitals, target, dt);

        let delta = body.position - start;
        body.position = start;
        move_body(body, grid, delta);

        if let Some(damage) = strike {
            if player.is_alive() {
                let dealt = player.vitals.take_damage(damage);
                events.push(GameEvent::PlayerHurt {
                    damage: dealt,
                    attacker: enemy.archetype,
                });
            }
        }
    }
}

/// One enemy's frame. Returns the damage of a strike that landed this frame.
/// `target` is `None` when there is nothing alive to hunt.
fn update_enemy(enemy: &mut Enemy, body: &mut Body, vitals: &mut Vitals, target: Option<Vec2>, dt: f32) -> Option<i32> {
    enemy.time_since_attack += dt;
    enemy.hit_flash = (enemy.hit_flash - dt).max(0.0);

    if let Behavior::Regenerator { amount, interval } = enemy.behavior {
        enemy.ability_timer += dt;
        if enemy.ability_timer >= interval {
            vitals.heal(amount);
            enemy.ability_timer = 0.0;
        }
    }

    let strike = target.and_then(|target| run_behavior(enemy, body, target, dt));

    if let Some(phase) = enemy.bob_phase.as_mut() {
        *phase += dt * BAT_BOB_SPEED;
        body.position.y += phase.sin() * BAT_BOB_AMPLITUDE;
    }

    strike
}

fn run_behavior(enemy: &mut Enemy, body: &mut Body, target: Vec2, dt: f32) -> Option<i32> {
    let mut distance = body.position.distance(target);
    let toward = (target - body.position).normalize_or_zero();

    match enemy.behavior {
        Behavior::Kiter { band } => {
            if distance < enemy.attack_range - band {
                body.position -= toward * enemy.speed * dt;
                distance = body.position.distance(target);
            }
        }
        Behavior::Teleporter { cooldown, behind } => {
            enemy.ability_timer += dt;
            if enemy.ability_timer >= cooldown && distance < GAP_CLOSER_RANGE {
                body.position = target - toward * behind;
                enemy.ability_timer = 0.0;
                if body.position.distance(target) <= enemy.attack_range {
                    return try_strike(enemy);
                }
                return None;
            }
        }
        Behavior::Dasher {
            cooldown,
            distance: dash,
            strike_bonus,
        } => {
            enemy.ability_timer += dt;
            if enemy.ability_timer >= cooldown && distance < GAP_CLOSER_RANGE {
                body.position += toward * dash;
                enemy.ability_timer = 0.0;
                if let Some(bonus) = strike_bonus {
                    return Some(enemy.attack_damage + bonus);
                }
            }
        }
        Behavior::Melee | Behavior::Regenerator { .. } => {}
    }

    let (state, action) = update_state_machine(
        enemy.state,
        distance,
        enemy.aggro_range,
        enemy.attack_range,
        enemy.cooldown_elapsed(),
    );
    enemy.state = state;

    match action {
        AiAction::Wait => None,
        AiAction::Advance => {
            let offset = target - body.position;
            if offset.length() > 0.0 {
                body.position += offset.normalize() * enemy.speed * dt;
            }
            None
        }
        AiAction::Strike => try_strike(enemy),
    }
}

/// Consume the attack cooldown and return the strike's damage
fn try_strike(enemy: &mut Enemy) -> Option<i32> {
    if !enemy.cooldown_elapsed() {
        return None;
    }
    enemy.time_since_attack = 0.0;
    Some(enemy.strike_damage())
}
