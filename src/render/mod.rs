//! Drawing: the renderer seam and the frame composition built on top of it.
//!
//! The core never talks to a graphics API. It issues primitive calls through
//! [`Renderer`] in screen space; textures are requested by name and fall back
//! to solid rectangles when the backend does not have them.

use std::collections::HashSet;

use glam::{Vec2, Vec3};
use log::warn;

use crate::camera::Camera;
use crate::components::{Body, Enemy, Vitals};
use crate::engine::GameState;
use crate::systems::combat::CombatLog;
use crate::vfx::{palette, EffectType, VfxManager};

/// Primitive drawing backend
pub trait Renderer {
    fn draw_rect(&mut self, position: Vec2, size: Vec2, color: Vec3, alpha: f32);
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Vec3, alpha: f32);
    fn draw_text(&mut self, text: &str, position: Vec2, size: f32, color: Vec3);
    /// Draw a named texture. Returns false if the texture is unavailable.
    fn draw_texture(&mut self, name: &str, position: Vec2, size: Vec2, tint: Vec3) -> bool;
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect { position: Vec2, size: Vec2, color: Vec3, alpha: f32 },
    Circle { center: Vec2, radius: f32, color: Vec3, alpha: f32 },
    Text { text: String, position: Vec2, size: f32 },
    Texture { name: String, position: Vec2, size: Vec2 },
}

/// Records every call; knows no textures, so sprites come out as rectangles.
/// Used by the headless shell and tests.
#[derive(Debug, Default)]
pub struct CommandRecorder {
    pub commands: Vec<DrawCommand>,
    /// Texture names this recorder pretends to have loaded
    pub textures: Vec<String>,
    missing: HashSet<String>,
}

impl CommandRecorder {
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Names that were requested but not loaded
    pub fn missing_textures(&self) -> &HashSet<String> {
        &self.missing
    }
}

impl Renderer for CommandRecorder {
    fn draw_rect(&mut self, position: Vec2, size: Vec2, color: Vec3, alpha: f32) {
        self.commands.push(DrawCommand::Rect {
            position,
            size,
            color,
            alpha,
        });
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Vec3, alpha: f32) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            alpha,
        });
    }

    fn draw_text(&mut self, text: &str, position: Vec2, size: f32, _color: Vec3) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position,
            size,
        });
    }

    fn draw_texture(&mut self, name: &str, position: Vec2, size: Vec2, _tint: Vec3) -> bool {
        if !self.textures.iter().any(|t| t == name) {
            if self.missing.insert(name.to_string()) {
                warn!("Texture '{}' not loaded, drawing a plain rectangle", name);
            }
            return false;
        }
        self.commands.push(DrawCommand::Texture {
            name: name.to_string(),
            position,
            size,
        });
        true
    }
}

/// Draw a sprite, falling back to a tinted rectangle
fn draw_sprite(renderer: &mut dyn Renderer, name: &str, position: Vec2, size: Vec2, tint: Vec3) {
    if !renderer.draw_texture(name, position, size, tint) {
        renderer.draw_rect(position, size, tint, 1.0);
    }
}

fn draw_health_bar(renderer: &mut dyn Renderer, position: Vec2, width: f32, vitals: &Vitals) {
    let bar = Vec2::new(width, 4.0);
    let above = position - Vec2::new(0.0, 8.0);
    renderer.draw_rect(above, bar, palette::RED, 1.0);
    renderer.draw_rect(above, Vec2::new(width * vitals.percentage(), bar.y), palette::GREEN, 1.0);
}

/// Compose one frame: tiles, decorations, companion, player, attack flash,
/// enemies, particles, effects, damage numbers, then the HUD.
pub fn draw_frame(
    renderer: &mut dyn Renderer,
    state: &GameState,
    camera: &Camera,
    vfx: &VfxManager,
    log: &CombatLog,
) {
    puffin::profile_function!();

    let grid = &state.grid;
    let tile = Vec2::splat(grid.tile_size);

    {
        puffin::profile_scope!("render_tiles");
        let (min_x, max_x, min_y, max_y) = camera.visible_tiles(grid.tile_size);
        for y in min_y.max(0)..max_y.min(grid.height as i32) {
            for x in min_x.max(0)..max_x.min(grid.width as i32) {
                let Some(tile_type) = grid.get(x, y) else {
                    continue;
                };
                let world = Vec2::new(x as f32, y as f32) * grid.tile_size;
                renderer.draw_rect(camera.world_to_screen(world), tile, tile_type.color(), 1.0);
            }
        }
    }

    {
        puffin::profile_scope!("render_decorations");
        for decoration in &grid.decorations {
            let screen = camera.world_to_screen(decoration.position);
            renderer.draw_circle(screen + tile / 2.0, grid.tile_size / 4.0, decoration.kind.color(), 1.0);
        }
    }

    {
        puffin::profile_scope!("render_entities");
        if let Some(companion) = state.companions.companion() {
            let screen = camera.world_to_screen(companion.body.position);
            draw_sprite(renderer, "companion", screen, companion.body.size, palette::TAME);
            draw_health_bar(renderer, screen, companion.body.size.x, &companion.vitals);
        }

        let player = &state.player;
        let screen = camera.world_to_screen(player.position());
        let alpha = if player.is_stealthed() { 0.4 } else { 1.0 };
        if !renderer.draw_texture("player", screen, player.body.size, palette::WHITE) {
            renderer.draw_rect(screen, player.body.size, palette::SKYBLUE, alpha);
        }
        if player.shield_timer > 0.0 {
            renderer.draw_circle(screen + player.body.size / 2.0, player.body.size.x, palette::SKYBLUE, 0.3);
        }

        if state.attack_flash > 0.0 {
            let hitbox = player.attack_box();
            let size = Vec2::new(hitbox.width, hitbox.height);
            let corner = Vec2::new(hitbox.x, hitbox.y);
            renderer.draw_rect(camera.world_to_screen(corner), size, palette::YELLOW, 0.3);
        }

        for (_, (body, vitals, enemy)) in state.world.query::<(&Body, &Vitals, &Enemy)>().iter() {
            let screen = camera.world_to_screen(body.position);
            let tint = if enemy.hit_flash > 0.0 { palette::WHITE } else { enemy.tint };
            draw_sprite(renderer, enemy.name(), screen, body.size, tint);
            draw_health_bar(renderer, screen, body.size.x, vitals);
        }
    }

    {
        puffin::profile_scope!("render_vfx");
        for particle in &vfx.particles {
            renderer.draw_circle(camera.world_to_screen(particle.position), particle.size, particle.color, particle.alpha);
        }
        for effect in &vfx.effects {
            let screen = camera.world_to_screen(effect.position);
            let alpha = 1.0 - effect.progress();
            match effect.effect_type {
                EffectType::ChainLightning { to } => {
                    let end = camera.world_to_screen(to);
                    for step in 0..=4 {
                        let point = screen.lerp(end, step as f32 / 4.0);
                        renderer.draw_circle(point, effect.size, palette::YELLOW, alpha);
                    }
                }
                EffectType::Fireball => renderer.draw_circle(screen, effect.size, palette::ORANGE, alpha),
                EffectType::FrostWave => renderer.draw_circle(screen, effect.size, palette::SKYBLUE, alpha),
                EffectType::WhirlwindSpin => renderer.draw_circle(screen, effect.size, palette::RED, alpha),
                EffectType::SpellCastReady | EffectType::ShieldActivate => {
                    renderer.draw_circle(screen, effect.size, palette::GREEN, alpha)
                }
            }
        }
        for number in &vfx.damage_numbers {
            renderer.draw_text(&number.value.to_string(), camera.world_to_screen(number.position), 20.0, number.color);
        }
    }

    draw_hud(renderer, state, log);
}

fn draw_hud(renderer: &mut dyn Renderer, state: &GameState, log: &CombatLog) {
    let player = &state.player;
    let lines = [
        format!("{}  Lv {}", player.name, player.level()),
        format!("HP {}/{}", player.vitals.health, player.vitals.max_health),
        format!("Floor {}  Score {}  Kills {}", state.floor, state.stats.score, state.stats.enemies_killed),
    ];
    for (row, line) in lines.iter().enumerate() {
        renderer.draw_text(line, Vec2::new(10.0, 10.0 + row as f32 * 22.0), 20.0, palette::WHITE);
    }

    for (row, entry) in log.entries().rev().take(5).enumerate() {
        renderer.draw_text(&entry.text, Vec2::new(10.0, 120.0 + row as f32 * 18.0), 16.0, palette::WHITE);
    }

    if state.inventory_menu.open {
        renderer.draw_text("INVENTORY", Vec2::new(400.0, 100.0), 24.0, palette::YELLOW);
        for (row, slot) in player.inventory.slots.iter().enumerate() {
            let color = if row == state.inventory_menu.selected {
                palette::YELLOW
            } else {
                palette::WHITE
            };
            let text = format!("{} x{}", slot.name, slot.quantity);
            renderer.draw_text(&text, Vec2::new(400.0, 140.0 + row as f32 * 20.0), 18.0, color);
        }
    }
    if state.paused {
        renderer.draw_text("PAUSED", Vec2::new(580.0, 380.0), 40.0, palette::WHITE);
    }
    if state.game_over {
        renderer.draw_text("GAME OVER", Vec2::new(540.0, 380.0), 40.0, palette::RED);
    }
}
