//! ASCII debug view of the arena.
//!
//! Boards are drawn with `- | / \`, nets as `G`, home players as `x` and
//! away players as `o` (upper case for the ball carrier, `_` when stunned)
//! with their roster number at the centre, and a loose ball as `B`. The far
//! (+z) end is at the top.

use tracing::debug;

use super::MatchEngine;
use crate::geometry::Vec2;
use crate::models::TeamSide;

struct Canvas {
    rows: usize,
    cols: usize,
    cells: Vec<char>,
    min_x: f32,
    min_z: f32,
}

impl Canvas {
    fn new(width: usize, length: usize, min_x: f32, min_z: f32) -> Self {
        let (rows, cols) = (length + 2, width + 2);
        let mut cells = vec![' '; rows * cols];
        for c in 0..cols {
            cells[c] = '-';
            cells[(rows - 1) * cols + c] = '-';
        }
        for r in 0..rows {
            cells[r * cols] = '|';
            cells[r * cols + cols - 1] = '|';
        }
        cells[0] = '/';
        cells[rows * cols - 1] = '/';
        cells[cols - 1] = '\\';
        cells[(rows - 1) * cols] = '\\';
        Self { rows, cols, cells, min_x, min_z }
    }

    /// Plot at an arena position; off-canvas points are dropped.
    fn plot(&mut self, p: Vec2, ch: char) {
        let row = (p.y - self.min_z + 1.0).round();
        let col = (p.x - self.min_x + 1.0).round();
        if row < 0.0 || col < 0.0 {
            return;
        }
        let (row, col) = (row as usize, col as usize);
        if row < self.rows && col < self.cols {
            self.cells[row * self.cols + col] = ch;
        }
    }

    fn render(&self) -> String {
        let mut out = String::with_capacity(self.rows * (self.cols * 2 + 1));
        for row in (0..self.rows).rev() {
            let line = &self.cells[row * self.cols..(row + 1) * self.cols];
            let joined: Vec<String> = line.iter().map(char::to_string).collect();
            out.push_str(&joined.join(" "));
            out.push('\n');
        }
        out
    }
}

impl MatchEngine {
    pub fn render_arena(&self) -> String {
        let arena = &self.arena;
        let mut canvas =
            Canvas::new(arena.size[0] as usize, arena.size[1] as usize, arena.min_x, arena.min_z);

        for side in TeamSide::BOTH {
            canvas.plot(arena.scoring_net(side), 'G');
        }

        let radius = self.rules.player_radius;
        let reach = radius.trunc() as i32;
        for side in TeamSide::BOTH {
            let base = if side == TeamSide::Home { 'x' } else { 'o' };
            for player in self.team(side) {
                let glyph = if self.has_control(player.id()) {
                    base.to_ascii_uppercase()
                } else if player.is_stunned() {
                    '_'
                } else {
                    base
                };
                let centre = player.position();
                for dx in -reach..=reach {
                    for dz in -reach..=reach {
                        let offset = Vec2::new(dx as f32, dz as f32);
                        if offset.norm() <= radius {
                            canvas.plot(centre + offset, glyph);
                        }
                    }
                }
                let number = char::from_digit((player.index() + 1) as u32, 10).unwrap_or('#');
                canvas.plot(centre, number);
            }
        }

        if self.control().is_none() {
            canvas.plot(self.state.ball_position(), 'B');
        }

        let mut out = canvas.render();
        out.push_str(&format!(
            "tick {} of {} home score:{} away score:{}\n",
            self.tick(),
            self.rules.max_tick,
            self.score(TeamSide::Home),
            self.score(TeamSide::Away)
        ));
        out
    }

    /// Log the arena when verbosity asks for per-tick drawings.
    pub(crate) fn draw_arena(&self) {
        if self.config.verbosity >= 2 {
            debug!(tick = self.tick(), "\n{}", self.render_arena());
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Rules;
    use crate::engine::test_fixtures::{engine_with_rules, place};
    use crate::geometry::vec2;
    use crate::models::{PlayerId, TeamSide};
    use crate::player::PolicyKind;

    fn small_rules() -> Rules {
        Rules { arena_size: [6, 10], net_inset: 1.0, ..Rules::default() }
    }

    #[test]
    fn test_frame_and_glyphs() {
        let mut engine = engine_with_rules(&[PolicyKind::Simple], &[PolicyKind::Simple], small_rules(), 1);
        place(&mut engine, PlayerId::new(TeamSide::Home, 0), vec2(-1.0, -2.0));
        place(&mut engine, PlayerId::new(TeamSide::Away, 0), vec2(1.0, 2.0));
        engine.give_control(PlayerId::new(TeamSide::Home, 0)).unwrap();

        let drawing = engine.render_arena();
        let lines: Vec<&str> = drawing.lines().collect();
        // 10 rows of ice, two boards, one status line.
        assert_eq!(lines.len(), 13);
        assert!(lines[0].starts_with('\\') && lines[0].ends_with('/'));
        assert_eq!(lines[0].len(), 8 * 2 - 1);
        assert!(drawing.contains('X'));
        assert!(drawing.contains('o'));
        assert!(drawing.contains('G'));
        assert!(!drawing.contains('B'));
        assert!(lines[12].starts_with("tick 0 of"));
    }

    #[test]
    fn test_loose_ball_and_stunned_player() {
        let mut engine = engine_with_rules(&[PolicyKind::Simple], &[], small_rules(), 1);
        let id = PlayerId::new(TeamSide::Home, 0);
        place(&mut engine, id, vec2(0.0, -2.0));
        engine.player_mut(id).unwrap().stun(3);

        let drawing = engine.render_arena();
        assert!(drawing.contains('B'));
        assert!(drawing.contains('_'));
        assert!(drawing.contains('1'));
    }
}
