//! Per-frame simulation update
//!
//! `tick` is driven by the host's frame clock, so `dt` varies with frame
//! rate. Every rate-based behavior in here scales by `dt`.

use glam::Vec2;
use rand::Rng;

use super::collision::{cancel_surges, circles_touch};
use super::effects::SparkColor;
use super::enemy::{Enemy, WorldView};
use super::state::{GameEvent, GamePhase, GameState, Glitch};
use super::surge::Faction;
use crate::consts::*;
use crate::{jitter, random_between};

/// Input snapshot for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held movement axes, each component in -1..=1
    pub movement: Vec2,
    /// Pointer position in playfield space; `None` falls back to facing
    pub aim_target: Option<Vec2>,
    pub fire: bool,
    /// Overclock blast (only acts when the meter is full)
    pub blast: bool,
    /// Pause toggle
    pub pause: bool,
    /// Leave the menu
    pub start: bool,
    /// Reboot after game over
    pub restart: bool,
    /// Proceed after a sector clear
    pub advance_sector: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// Advance the session by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = dt.max(0.0);

    let input = if input.idle_mode {
        autopilot(state, input)
    } else {
        input.clone()
    };
    let input = &input;

    if input.pause {
        match state.phase {
            GamePhase::Play => {
                state.phase = GamePhase::Paused;
                log::info!("Paused");
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Play;
                log::info!("Resumed");
            }
            _ => {}
        }
    }

    match state.phase {
        GamePhase::Menu => {
            if input.start {
                state.start_run();
            }
        }
        GamePhase::GameOver => {
            if input.restart {
                state.start_run();
            }
        }
        GamePhase::SectorClear => {
            if input.advance_sector {
                state.next_sector();
            }
        }
        GamePhase::Paused => {}
        GamePhase::Play => step_play(state, input, dt),
    }
}

fn step_play(state: &mut GameState, input: &TickInput, dt: f32) {
    state.frames += 1;

    state.hero.advance(dt, input.movement);

    if input.blast && state.hero.meter.is_full() {
        fire_blast(state);
    }
    if state.blast_timer > 0.0 {
        state.blast_timer = (state.blast_timer - dt).max(0.0);
        state.effects.add_shake(OC_BLAST_SHAKE_STRENGTH * 0.75);
    }

    if input.fire && state.hero.can_fire() {
        let aim = input
            .aim_target
            .map(|target| target - state.hero.pos)
            .unwrap_or(Vec2::ZERO);
        let surge = state.hero.fire(aim);
        state.surges.push(surge);
        state.emit(GameEvent::Fire);
        state.effects.add_shake(SHAKE_SHOOT);
    }

    advance_natural(state, dt);
    advance_enemies(state, dt);
    mitosis(state);
    advance_glitches(state, dt);

    state.surges.retain_mut(|s| s.advance(dt));
    state.effects.update_particles(dt);

    resolve_cancels(state);
    resolve_hits(state);

    debug_assert!(state.enemies.len() <= state.tuning.max_enemies);
    debug_assert!(state.hero.meter.charge() <= state.hero.meter.cap());

    if !state.hero.is_alive() {
        state.phase = GamePhase::GameOver;
        state.emit(GameEvent::Lose);
        state.record_high_score();
        log::info!(
            "Game over in sector {} with score {} (high {})",
            state.sector,
            state.score,
            state.high_score
        );
    } else if state.enemies.is_empty() {
        state.phase = GamePhase::SectorClear;
        state.emit(GameEvent::Win);
        state.record_high_score();
        log::info!("Sector {} stabilized, score {}", state.sector, state.score);
    }

    state.effects.decay_shake(dt);
}

/// Four piercing surges from the hero; drains the meter
fn fire_blast(state: &mut GameState) {
    let origin = state.hero.pos;
    let arms = state.hero.discharge();
    state.surges.extend(arms);
    state.blast_timer = OC_BLAST_SHAKE_TIME;
    state.effects.add_shake(OC_BLAST_SHAKE_STRENGTH);
    state.emit(GameEvent::OverclockOn);
    state.effects.spark(origin, SparkColor::Blast, 14);
    log::debug!("Overclock blast at ({:.0}, {:.0})", origin.x, origin.y);
}

/// Natural train scheduling: one train at a time across both axes
fn advance_natural(state: &mut GameState, dt: f32) {
    if !state.train_active() {
        state.natural_timer -= dt;
        if state.natural_timer <= 0.0 {
            let emitter = if state.rng.random_bool(0.5) {
                &mut state.emit_row
            } else {
                &mut state.emit_col
            };
            emitter.schedule(&mut state.rng);
            state.natural_timer = random_between(state.tuning.natural_interval, &mut state.rng);
        }
    }

    for emitter in [&mut state.emit_row, &mut state.emit_col] {
        if let Some(surge) = emitter.advance(dt) {
            state.surges.push(surge);
            state.events.push(GameEvent::Natural);
        }
    }
}

fn advance_enemies(state: &mut GameState, dt: f32) {
    let world = WorldView {
        hero_pos: state.hero.pos,
    };
    let mut spawned = Vec::new();
    for enemy in state.enemies.iter_mut() {
        let out = enemy.advance(dt, &world, &mut state.rng);
        if out.fired() {
            state.events.push(GameEvent::EnemyFire);
            state.effects.add_shake(enemy.species().volley_shake());
        }
        if let Some(pos) = out.glitch {
            state.glitches.push(Glitch::new(pos));
        }
        spawned.extend(out.surges);
    }
    state.surges.extend(spawned);
}

/// Same-species touching pairs spawn a third, under cooldown and the cap
fn mitosis(state: &mut GameState) {
    let cooldown = state.tuning.mitosis_cooldown;
    let n = state.enemies.len();
    let mut born: Vec<Enemy> = Vec::new();

    for i in 0..n {
        for j in (i + 1)..n {
            let (a, b) = (&state.enemies[i], &state.enemies[j]);
            if a.species() != b.species() || !a.can_divide() || !b.can_divide() {
                continue;
            }
            if !circles_touch(a.pos, a.radius, b.pos, b.radius) {
                continue;
            }
            if !state.has_room(born.len()) {
                continue;
            }
            let at = (a.pos + b.pos) * 0.5 + jitter(MITOSIS_JITTER, &mut state.rng);
            let mut child = a.offspring(at, &mut state.rng);
            child.mitosis_cooldown = cooldown;
            state.enemies[i].mitosis_cooldown = cooldown;
            state.enemies[j].mitosis_cooldown = cooldown;
            born.push(child);
            state.events.push(GameEvent::Clone);
            state.effects.spark(at, SparkColor::Clone, 10);
        }
    }

    if !born.is_empty() {
        log::debug!("Mitosis: {} spawned, field {}", born.len(), n + born.len());
        state.enemies.extend(born);
    }
}

/// Decay worm hazards and apply contact damage to the hero
fn advance_glitches(state: &mut GameState, dt: f32) {
    state.glitches.retain_mut(|g| g.decay(dt));

    let hero = &mut state.hero;
    for glitch in &state.glitches {
        if circles_touch(hero.pos, hero.radius + GLITCH_REACH, glitch.pos, 0.0) && hero.hurt() {
            state.events.push(GameEvent::Hurt);
            state.effects.add_shake(SHAKE_HURT_GLITCH);
        }
    }
}

fn resolve_cancels(state: &mut GameState) {
    for cancel in cancel_surges(&mut state.surges) {
        state.emit(GameEvent::Cancel);
        state.effects.spark(cancel.at, SparkColor::Cancel, 8);
        if cancel.feeds_meter {
            state.hero.meter.add(state.tuning.meter_per_cancel);
        }
    }
}

/// Friendly surges vs enemies, hostile surges vs the hero
fn resolve_hits(state: &mut GameState) {
    let mut consumed = vec![false; state.surges.len()];

    for (si, spent) in consumed.iter_mut().enumerate() {
        let surge = &state.surges[si];
        let (owner, pos, radius, damage, pierce) =
            (surge.owner, surge.pos, surge.radius, surge.damage, surge.pierce);

        if owner.is_hostile() {
            let hero = &mut state.hero;
            if circles_touch(hero.pos, hero.radius, pos, radius) {
                *spent = true;
                if hero.hurt() {
                    state.events.push(GameEvent::Hurt);
                    state.effects.add_shake(SHAKE_HURT_SURGE);
                }
            }
            continue;
        }

        let plain = owner == Faction::Player;
        let mut orphans: Vec<Enemy> = Vec::new();
        let mut idx = 0;
        while idx < state.enemies.len() {
            let enemy = &mut state.enemies[idx];
            if !circles_touch(enemy.pos, enemy.radius, pos, radius) {
                idx += 1;
                continue;
            }

            let died = enemy.take_damage(damage);
            state.events.push(GameEvent::Hit);
            let color = if plain {
                SparkColor::PlayerHit
            } else {
                SparkColor::OverclockHit
            };
            state.effects.spark(pos, color, 10);
            if plain {
                state.score += SCORE_HIT_PLAYER;
                state.hero.meter.add(state.tuning.meter_per_hit);
            } else {
                state.score += SCORE_HIT_OVERCLOCK;
            }

            if died {
                let dead = state.enemies.remove(idx);
                state.events.push(GameEvent::Explode);
                state.effects.spark(dead.pos, SparkColor::Explosion, 18);
                for child in dead.on_death(&mut state.rng) {
                    if state.has_room(orphans.len()) {
                        orphans.push(child);
                    }
                }
                state.score += if plain {
                    SCORE_KILL_PLAYER
                } else {
                    SCORE_KILL_OVERCLOCK
                };
            } else {
                idx += 1;
            }

            if !pierce {
                *spent = true;
                break;
            }
        }
        state.enemies.extend(orphans);
    }

    if consumed.iter().any(|&c| c) {
        let mut idx = 0;
        state.surges.retain(|_| {
            let keep = !consumed[idx];
            idx += 1;
            keep
        });
    }
}

/// Demo-mode driver: hunt the nearest enemy, dodge incoming surges
fn autopilot(state: &GameState, base: &TickInput) -> TickInput {
    let mut input = base.clone();
    match state.phase {
        GamePhase::Menu => input.start = true,
        GamePhase::GameOver => input.restart = true,
        GamePhase::SectorClear => input.advance_sector = true,
        _ => {}
    }

    let hero = state.hero.pos;
    let nearest = state.enemies.iter().min_by(|a, b| {
        a.pos
            .distance_squared(hero)
            .partial_cmp(&b.pos.distance_squared(hero))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    if let Some(target) = nearest {
        input.aim_target = Some(target.pos);
        input.fire = true;
        // Shots only travel along wires: close the smaller offset to line up
        let delta = target.pos - hero;
        input.movement = if delta.x.abs() < delta.y.abs() {
            if delta.x.abs() > JUNC_TOL {
                Vec2::new(delta.x.signum(), 0.0)
            } else {
                Vec2::ZERO
            }
        } else if delta.y.abs() > JUNC_TOL {
            Vec2::new(0.0, delta.y.signum())
        } else {
            Vec2::ZERO
        };
    }
    input.blast = state.hero.meter.is_full();

    let threat = state
        .surges
        .iter()
        .filter(|s| s.owner.is_hostile())
        .filter(|s| (hero - s.pos).dot(s.dir) > 0.0 && s.pos.distance(hero) < 120.0)
        .min_by(|a, b| {
            a.pos
                .distance_squared(hero)
                .partial_cmp(&b.pos.distance_squared(hero))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    if let Some(threat) = threat {
        let perp = Vec2::new(-threat.dir.y, threat.dir.x);
        input.movement = if (hero - threat.pos).dot(perp) >= 0.0 {
            perp
        } else {
            -perp
        };
    }

    input
}
