//! Draw commands handed to the display driver

/// 24-bit color; the driver packs it to whatever the panel wants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);

    /// RGB565, the native format of the usual SPI panels
    pub const fn to_rgb565(self) -> u16 {
        ((self.r as u16 & 0xF8) << 8) | ((self.g as u16 & 0xFC) << 3) | (self.b as u16 >> 3)
    }
}

/// Where a line of text goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    TopLeft,
    TopCenter,
    Center,
    /// Next line under the previous text
    Below,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
    },
    Circle {
        radius: f32,
        cx: f32,
        cy: f32,
        color: Color,
    },
    Text {
        text: String,
        anchor: TextAnchor,
        color: Color,
    },
    /// End of frame: flip the back buffer
    Present,
}

/// Consumer of draw commands (rasterizer, test recorder, ...)
pub trait Surface {
    fn draw(&mut self, command: &DrawCommand);
}

/// Ordered commands for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(64),
        }
    }

    pub fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.commands.push(DrawCommand::Rect { x, y, w, h, color });
    }

    pub fn circle(&mut self, radius: f32, cx: f32, cy: f32, color: Color) {
        self.commands
            .push(DrawCommand::Circle { radius, cx, cy, color });
    }

    pub fn text(&mut self, text: impl Into<String>, anchor: TextAnchor, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.into(),
            anchor,
            color,
        });
    }

    pub fn present(&mut self) {
        self.commands.push(DrawCommand::Present);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Whether the frame has been closed with `Present`
    pub fn is_presented(&self) -> bool {
        matches!(self.commands.last(), Some(DrawCommand::Present))
    }

    /// Lines of text in draw order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Send every command to `surface`, in order
    pub fn replay(&self, surface: &mut impl Surface) {
        for command in &self.commands {
            surface.draw(command);
        }
    }
}
