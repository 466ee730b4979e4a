//! Canvas 2D draw target for the browser build

use web_sys::CanvasRenderingContext2d;

use super::Draw;
use crate::sim::{Enemy, EnemyKind, Modifier, Platform, Player, Viewport};

const BACKGROUND: &str = "#87ceeb";
const PLATFORM: &str = "#4a4a4a";
const FALLING: &str = "#8a8a8a";
const SPRING: &str = "#2ecc40";
const STAR: &str = "#ffd700";
const CHEST: &str = "#8b4513";
const BOOT: &str = "#1e90ff";
const ENEMY: &str = "#d62828";
const PATROL: &str = "#9d0208";
const PLAYER: &str = "#e63946";
const PLAYER_SHIELDED: &str = "#ffdd00";
const TEXT: &str = "#000000";

/// Pickup marker size
const MARKER: f64 = 10.0;

pub struct CanvasDraw {
    ctx: CanvasRenderingContext2d,
    show_labels: bool,
}

impl CanvasDraw {
    pub fn new(ctx: CanvasRenderingContext2d, show_labels: bool) -> Self {
        Self { ctx, show_labels }
    }

    fn rect(&self, color: &str, x: f32, y: f32, w: f32, h: f32) {
        self.ctx.set_fill_style_str(color);
        self.ctx
            .fill_rect(f64::from(x), f64::from(y), f64::from(w), f64::from(h));
    }

    fn text(&self, font: &str, text: &str, x: f64, y: f64) {
        self.ctx.set_fill_style_str(TEXT);
        self.ctx.set_font(font);
        let _ = self.ctx.fill_text(text, x, y);
    }
}

impl Draw for CanvasDraw {
    fn clear(&mut self, viewport: Viewport) {
        let (w, h) = (f64::from(viewport.width), f64::from(viewport.height));
        self.ctx.clear_rect(0.0, 0.0, w, h);
        self.ctx.set_fill_style_str(BACKGROUND);
        self.ctx.fill_rect(0.0, 0.0, w, h);
    }

    fn draw_platform(&mut self, platform: &Platform) {
        let y = platform.surface_y();
        let body = if platform.is_falling() { FALLING } else { PLATFORM };
        self.rect(body, platform.pos.x, y, platform.width, platform.height);

        // Pickups sit centred on the surface
        let marker = match platform.modifier {
            Modifier::Spring => Some(SPRING),
            Modifier::Star => Some(STAR),
            Modifier::Chest => Some(CHEST),
            Modifier::Boot => Some(BOOT),
            Modifier::None | Modifier::Enemy(_) => None,
        };
        if let Some(color) = marker {
            let m = MARKER as f32;
            let x = platform.pos.x + (platform.width - m) / 2.0;
            self.rect(color, x, y - m, m, m);
        }

        if self.show_labels
            && let Some(label) = platform.label
        {
            self.text(
                "12px sans-serif",
                &label.to_string(),
                f64::from(platform.pos.x),
                f64::from(y) + 24.0,
            );
        }
    }

    fn draw_enemy(&mut self, enemy: &Enemy) {
        let color = match enemy.kind {
            EnemyKind::Static => ENEMY,
            EnemyKind::Patrol => PATROL,
        };
        self.rect(color, enemy.pos.x, enemy.pos.y, enemy.size.x, enemy.size.y);
    }

    fn draw_player(&mut self, player: &Player) {
        let color = if player.invincible {
            PLAYER_SHIELDED
        } else {
            PLAYER
        };
        self.rect(color, player.pos.x, player.pos.y, player.size.x, player.size.y);
    }

    fn draw_score(&mut self, score: u64) {
        self.text("20px sans-serif", &format!("Score: {score}"), 10.0, 30.0);
    }
}
