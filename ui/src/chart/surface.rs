//! Drawing-surface abstraction shared by every chart backend.

use std::ops::{Deref, DerefMut};

use super::style::Rgba;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_css(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub size_px: f64,
    pub bold: bool,
    pub align: TextAlign,
    pub color: Rgba,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Imperative 2D drawing target. Coordinates are logical units once
/// [`DrawSurface::set_scale`] has been applied.
pub trait DrawSurface {
    /// Resize the backing store to physical pixels. Resets any transform.
    fn resize(&mut self, width_px: u32, height_px: u32);
    fn set_scale(&mut self, scale: f64);
    fn clear(&mut self, width: f64, height: f64);
    fn fill_rect(&mut self, rect: Rect, color: Rgba);
    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Rgba);
    /// `y` is the text baseline.
    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle);
    fn save(&mut self);
    fn restore(&mut self);
}

/// Saves the surface state on creation and restores it on drop.
pub struct ScopedSurface<'a, S: DrawSurface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: DrawSurface + ?Sized> ScopedSurface<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        surface.save();
        Self { surface }
    }
}

impl<S: DrawSurface + ?Sized> Deref for ScopedSurface<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: DrawSurface + ?Sized> DerefMut for ScopedSurface<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: DrawSurface + ?Sized> Drop for ScopedSurface<'_, S> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Resize { width_px: u32, height_px: u32 },
    SetScale(f64),
    Clear { width: f64, height: f64 },
    FillRect { rect: Rect, color: Rgba },
    StrokeLine { from: (f64, f64), to: (f64, f64), width: f64, color: Rgba },
    FillText { text: String, x: f64, y: f64, style: TextStyle },
    Save,
    Restore,
}

/// Records every call; used for headless inspection and tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rects(&self) -> Vec<(Rect, Rgba)> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::FillRect { rect, color } => Some((*rect, *color)),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn text_style(&self, needle: &str) -> Option<&TextStyle> {
        self.commands.iter().find_map(|cmd| match cmd {
            DrawCommand::FillText { text, style, .. } if text == needle => Some(style),
            _ => None,
        })
    }

    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::StrokeLine { .. }))
            .count()
    }

    /// Save/restore nesting after replaying every command (0 when balanced).
    pub fn open_saves(&self) -> isize {
        self.commands.iter().fold(0, |depth, cmd| match cmd {
            DrawCommand::Save => depth + 1,
            DrawCommand::Restore => depth - 1,
            _ => depth,
        })
    }
}

impl DrawSurface for RecordingSurface {
    fn resize(&mut self, width_px: u32, height_px: u32) {
        self.commands.push(DrawCommand::Resize {
            width_px,
            height_px,
        });
    }

    fn set_scale(&mut self, scale: f64) {
        self.commands.push(DrawCommand::SetScale(scale));
    }

    fn clear(&mut self, width: f64, height: f64) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Rgba) {
        self.commands.push(DrawCommand::StrokeLine {
            from,
            to,
            width,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            x,
            y,
            style: style.clone(),
        });
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }
}
